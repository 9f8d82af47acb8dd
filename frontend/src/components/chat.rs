use chat_sync::{Message, Sender};
use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::format::clock_time;
use crate::state::AppState;

/// Main chat area with error banner, message history and input.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let has_session = move || state.sync.with(|s| s.conversation().session_id().is_some());

    view! {
        <main class="chat-area">
            // Error banner
            {move || {
                state.sync.with(|s| s.error().map(str::to_string)).map(|err| {
                    view! {
                        <div class="error-banner">
                            <span>{err}</span>
                            <button on:click=move |_| state.dismiss_error()>"×"</button>
                        </div>
                    }
                })
            }}

            <div class="chat-header">
                {move || {
                    state.sync.with(|s| {
                        s.conversation()
                            .session_id()
                            .and_then(|id| s.directory().get(id))
                            .map(|session| session.title.clone())
                            .unwrap_or_else(|| "New conversation".to_string())
                    })
                }}
            </div>

            <MessageList />

            <Show when=has_session>
                <ChatInput />
            </Show>
        </main>
    }
}

/// History of the open session, or a welcome prompt when none is open.
#[component]
fn MessageList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let end = NodeRef::<Div>::new();

    // Keep the newest message in view.
    Effect::new(move |_| {
        state.sync.with(|s| (s.conversation().messages().len(), s.is_sending()));
        if let Some(el) = end.get() {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    });

    view! {
        <div class="messages-container">
            {move || {
                let (selected, empty, loading) = state.sync.with(|s| {
                    let conv = s.conversation();
                    (conv.session_id().is_some(), conv.messages().is_empty(), conv.is_loading())
                });
                if !selected {
                    view! {
                        <div class="empty-state">
                            <p>"Welcome! Start a new conversation"</p>
                            <button class="new-chat-btn" on:click=move |_| state.create()>
                                "New Chat"
                            </button>
                        </div>
                    }.into_any()
                } else if loading {
                    view! { <div class="empty-state">"Loading conversation..."</div> }.into_any()
                } else if empty {
                    view! { <div class="empty-state">"Start a conversation..."</div> }.into_any()
                } else {
                    view! {
                        <For
                            each=move || state.sync.with(|s| {
                                let generation = s.conversation().generation();
                                s.conversation()
                                    .messages()
                                    .iter()
                                    .map(|m| (generation, m.clone()))
                                    .collect::<Vec<_>>()
                            })
                            key=|(generation, m)| (*generation, m.id)
                            let:entry
                        >
                            <MessageBubble message=entry.1 />
                        </For>
                    }.into_any()
                }
            }}
            <Show when=move || state.sync.with(|s| s.is_sending())>
                <div class="message assistant typing">"Typing..."</div>
            </Show>
            <div node_ref=end></div>
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let css_class = match message.sender {
        Sender::User => "message user",
        Sender::Assistant => "message assistant",
    };

    view! {
        <div class=css_class>
            <div class="message-content">{message.content}</div>
            <div class="message-time">{clock_time(message.timestamp)}</div>
        </div>
    }
}

/// Chat input form with text field and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();

    let draft = move || state.sync.with(|s| s.draft().to_string());
    let is_sending = move || state.sync.with(|s| s.is_sending());
    let can_send = move || state.sync.with(|s| s.can_send(s.draft()));
    let placeholder = move || {
        state
            .sync
            .with(|s| s.send_blocker().unwrap_or("Type your message..."))
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.send();
    };

    view! {
        <form class="input-area" on:submit=on_submit>
            <div class="input-row">
                <input
                    type="text"
                    placeholder=placeholder
                    prop:value=draft
                    on:input=move |ev| state.set_draft(event_target_value(&ev))
                    disabled=is_sending
                />
                <button type="submit" class="send-btn" disabled=move || !can_send()>
                    {move || if is_sending() { "Sending…" } else { "Send" }}
                </button>
            </div>
            // A typed message that cannot go out yet says why.
            {move || {
                state
                    .sync
                    .with(|s| if s.draft().trim().is_empty() { None } else { s.send_blocker() })
                    .map(|hint| view! { <div class="input-hint">{hint}</div> })
            }}
        </form>
    }
}
