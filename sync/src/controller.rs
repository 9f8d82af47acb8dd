use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::config::SyncConfig;
use crate::conversation::Generation;
use crate::error::Result;
use crate::gateway::BackendGateway;
use crate::model::{Sender, Session, SessionId};
use crate::state::{Store, Subscription, SyncState};

/// How a call to [`SyncController::send_message`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Preconditions not met; nothing changed.
    Skipped,
    /// The backend replied.
    Delivered,
    /// The backend call failed; an error notice stands in for the reply.
    Failed,
}

#[derive(Debug, Default)]
struct RefreshTickets {
    issued: u64,
    committed: u64,
    in_flight: usize,
}

struct Inner<G> {
    gateway: G,
    config: SyncConfig,
    store: Rc<Store>,
    refresh: RefCell<RefreshTickets>,
}

/// Drives the session directory and the active conversation against the
/// backend.
///
/// Cheap to clone; clones share state. Operations that have an immediate
/// visible effect (selecting, sending) apply it when called and return a
/// future for the network part, so a caller spawning that future still sees
/// the effect synchronously.
pub struct SyncController<G> {
    inner: Rc<Inner<G>>,
}

impl<G> Clone for SyncController<G> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<G: BackendGateway + 'static> SyncController<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, SyncConfig::default())
    }

    pub fn with_config(gateway: G, config: SyncConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                gateway,
                config,
                store: Store::new(),
                refresh: RefCell::new(RefreshTickets::default()),
            }),
        }
    }

    pub fn snapshot(&self) -> SyncState {
        self.inner.store.snapshot()
    }

    /// Register `listener` to receive a snapshot after every state change.
    pub fn subscribe(&self, listener: impl Fn(&SyncState) + 'static) -> Subscription {
        self.inner.store.subscribe(listener)
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.store.update(|s| s.draft = text);
    }

    pub fn dismiss_error(&self) {
        self.inner.store.update(|s| s.error = None);
    }

    /// Reload the session list. On failure the previous list stays.
    ///
    /// If nothing is selected afterwards, the first session is opened and
    /// its history awaited before this returns.
    pub async fn refresh_directory(&self) -> Result<Vec<Session>> {
        let ticket = {
            let mut refresh = self.inner.refresh.borrow_mut();
            refresh.issued += 1;
            refresh.in_flight += 1;
            refresh.issued
        };
        self.inner.store.update(|s| s.directory_loading = true);

        let fetched = self.inner.gateway.list_sessions().await;

        let (committed, loading) = {
            let mut refresh = self.inner.refresh.borrow_mut();
            refresh.in_flight -= 1;
            let newest = fetched.is_ok() && ticket > refresh.committed;
            if newest {
                refresh.committed = ticket;
            }
            (newest, refresh.in_flight > 0)
        };

        let sessions = match fetched {
            Ok(list) => list.sessions.into_iter().map(Session::from).collect::<Vec<_>>(),
            Err(e) => {
                log::warn!("Failed to refresh session list: {e}");
                self.inner.store.update(|s| s.directory_loading = loading);
                return Err(e);
            }
        };

        if !committed {
            log::debug!("Discarding session list #{ticket}; a newer one already landed");
        }
        self.inner.store.update(|s| {
            s.directory_loading = loading;
            if committed {
                s.directory.replace(sessions.clone());
            }
        });

        if self.inner.config.auto_select_first {
            let first = self.inner.store.read(|s| match s.conversation.session_id() {
                Some(_) => None,
                None => s.directory.first().map(|session| session.id.clone()),
            });
            if let Some(id) = first {
                log::debug!("Auto-selecting session {id}");
                self.select_session(id).await;
            }
        }

        Ok(sessions)
    }

    /// Open `session_id`. The selection takes effect immediately; the
    /// returned future fetches the history and installs it unless another
    /// selection happened meanwhile.
    ///
    /// Reopening the session that is already open while it awaits a reply
    /// does nothing; the reply lands where it is.
    pub fn select_session(&self, session_id: SessionId) -> impl Future<Output = ()> + 'static {
        let generation = self.inner.store.update(|s| {
            if s.is_sending() && s.conversation.session_id() == Some(&session_id) {
                return None;
            }
            s.error = None;
            Some(s.conversation.begin_load(session_id.clone()))
        });
        let this = self.clone();
        async move {
            match generation {
                Some(generation) => this.load_history(session_id, generation).await,
                None => log::debug!("Session {session_id} is awaiting a reply; keeping it as is"),
            }
        }
    }

    async fn load_history(&self, session_id: SessionId, generation: Generation) {
        match self.inner.gateway.fetch_history(&session_id).await {
            Ok(history) => {
                let lines = history
                    .messages
                    .into_iter()
                    .map(|m| (m.content, m.role, m.created_at));
                let installed = self
                    .inner
                    .store
                    .update(|s| s.conversation.commit_history(generation, &session_id, lines));
                if !installed {
                    log::debug!("Discarding stale history for session {session_id}");
                }
            }
            Err(e) => {
                log::error!("Failed to load history for session {session_id}: {e}");
                self.inner.store.update(|s| {
                    if s.conversation.fail_history(generation, &session_id) {
                        s.error = Some(format!("Could not load this conversation ({e})"));
                    }
                });
            }
        }
    }

    /// Ask the backend for a new session and open it. Nothing changes
    /// locally if the backend refuses.
    pub async fn create_session(&self) -> Result<Session> {
        let created = self.inner.gateway.create_session().await.map_err(|e| {
            log::error!("Failed to create session: {e}");
            e
        })?;
        let session = created.into_session(Utc::now());
        log::debug!("Created session {}", session.id);

        self.inner.store.update(|s| {
            s.directory.insert_front(session.clone());
            s.conversation.open_empty(session.id.clone());
            s.error = None;
        });
        Ok(session)
    }

    /// Send whatever is in the draft buffer.
    pub fn send_draft(&self) -> impl Future<Output = SendOutcome> + 'static {
        let text = self.inner.store.read(|s| s.draft.clone());
        self.send_message(text)
    }

    /// Send `text` in the selected session.
    ///
    /// A no-op unless a session is selected, its history has loaded, no
    /// other send is outstanding for it, and `text` has non-whitespace
    /// content. Otherwise the user message is appended immediately and the
    /// returned future appends the reply, or an error notice if the backend
    /// call fails. The user message is never withdrawn.
    pub fn send_message(&self, text: impl Into<String>) -> impl Future<Output = SendOutcome> + 'static {
        let text = text.into();
        let launch = if self.inner.store.read(|s| s.can_send(&text)) {
            self.inner.store.update(|s| {
                let session_id = s.conversation.session_id().cloned()?;
                s.conversation.push(Sender::User, text.clone(), Utc::now())?;
                s.draft.clear();
                s.pending.insert(session_id.clone());
                Some(session_id)
            })
        } else {
            None
        };

        let this = self.clone();
        async move {
            match launch {
                Some(session_id) => this.deliver(session_id, text).await,
                None => {
                    log::debug!("Ignoring send: no session, empty text, or a send in flight");
                    SendOutcome::Skipped
                }
            }
        }
    }

    async fn deliver(&self, session_id: SessionId, text: String) -> SendOutcome {
        let outcome = match self.inner.gateway.send_message(&session_id, &text).await {
            Ok(reply) => {
                self.append_reply(&session_id, reply.response, reply.timestamp);
                SendOutcome::Delivered
            }
            Err(e) => {
                log::error!("Failed to send message in session {session_id}: {e}");
                let notice = self.inner.config.send_failure_notice.clone();
                self.append_reply(&session_id, notice, Utc::now());
                SendOutcome::Failed
            }
        };

        self.inner.store.update(|s| {
            s.pending.remove(&session_id);
        });

        // The exchange moved this session's updated_at on the server.
        if outcome == SendOutcome::Delivered {
            if let Err(e) = self.refresh_directory().await {
                log::debug!("Session list not refreshed after send in {session_id}: {e}");
            }
        }
        outcome
    }

    fn append_reply(&self, session_id: &SessionId, content: String, at: DateTime<Utc>) {
        self.inner.store.update(|s| {
            if !s.conversation.push_reply(session_id, content, at) {
                log::debug!("Session {session_id} is no longer open; dropping its reply");
            }
        });
    }
}
