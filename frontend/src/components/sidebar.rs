use chrono::Utc;
use leptos::prelude::*;

use crate::format::relative_time;
use crate::state::AppState;

/// Sidebar showing the session list and the "New Chat" button.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let loading = move || state.sync.with(|s| s.directory_loading() && s.directory().is_empty());
    let is_empty = move || state.sync.with(|s| s.directory().is_empty());

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <button class="new-chat-btn" on:click=move |_| state.create()>
                    "+ New Chat"
                </button>
            </div>
            <div class="session-list">
                {move || {
                    if loading() {
                        view! { <div class="sidebar-note">"Loading..."</div> }.into_any()
                    } else if is_empty() {
                        view! { <div class="sidebar-note">"No chats yet"</div> }.into_any()
                    } else {
                        view! {
                            <For
                                each=move || state.sync.with(|s| s.directory().sessions().to_vec())
                                key=|s| (s.id.clone(), s.title.clone(), s.updated_at)
                                let:session
                            >
                                {
                                    let id_click = session.id.clone();
                                    let id_active = session.id.clone();
                                    let updated = relative_time(session.updated_at, Utc::now());
                                    view! {
                                        <button
                                            class="session-item"
                                            class:active=move || {
                                                state.sync.with(|s| s.conversation().session_id() == Some(&id_active))
                                            }
                                            on:click=move |_| state.select(id_click.clone())
                                        >
                                            <p class="session-title">{session.title.clone()}</p>
                                            <p class="session-updated">{updated}</p>
                                        </button>
                                    }
                                }
                            </For>
                        }.into_any()
                    }
                }}
            </div>
        </aside>
    }
}
