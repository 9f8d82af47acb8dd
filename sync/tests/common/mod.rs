#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use chat_sync::error::Result;
use chat_sync::wire::{CreatedSession, History, HistoryRecord, Reply, SessionList, SessionRecord};
use chat_sync::{BackendGateway, Sender, SessionId, SyncError};
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::oneshot;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
}

pub fn record(id: &str, title: &str, updated_at: DateTime<Utc>) -> SessionRecord {
    SessionRecord { id: SessionId::from(id), title: Some(title.to_string()), updated_at }
}

pub fn line(role: Sender, content: &str, created_at: DateTime<Utc>) -> HistoryRecord {
    HistoryRecord { content: content.to_string(), role, created_at }
}

#[derive(Default)]
struct Backend {
    listing: Vec<SessionRecord>,
    queued_listings: VecDeque<Vec<SessionRecord>>,
    histories: HashMap<String, Vec<HistoryRecord>>,
    created: VecDeque<CreatedSession>,
    replies: VecDeque<Reply>,
    failing: Vec<&'static str>,
    gates: HashMap<String, oneshot::Receiver<()>>,
    calls: Vec<String>,
}

/// In-memory backend with scripted answers.
///
/// Calls keyed `list`, `history:{id}`, `create` or `send:{id}` can be held
/// back with [`MockGateway::gate`] until the returned sender fires. Data is
/// captured when the call is made, not when it is released.
#[derive(Clone, Default)]
pub struct MockGateway {
    backend: Rc<RefCell<Backend>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_listing(&self, sessions: Vec<SessionRecord>) {
        self.backend.borrow_mut().listing = sessions;
    }

    /// Answer the next list call with `sessions`, once.
    pub fn queue_listing(&self, sessions: Vec<SessionRecord>) {
        self.backend.borrow_mut().queued_listings.push_back(sessions);
    }

    pub fn set_history(&self, id: &str, messages: Vec<HistoryRecord>) {
        self.backend.borrow_mut().histories.insert(id.to_string(), messages);
    }

    pub fn queue_created(&self, id: &str, title: &str) {
        self.backend.borrow_mut().created.push_back(CreatedSession {
            session_id: SessionId::from(id),
            title: Some(title.to_string()),
        });
    }

    pub fn queue_reply(&self, response: &str, timestamp: DateTime<Utc>) {
        self.backend
            .borrow_mut()
            .replies
            .push_back(Reply { response: response.to_string(), timestamp });
    }

    /// Make every call of `kind` (`list`, `history`, `create`, `send`) fail.
    pub fn fail(&self, kind: &'static str) {
        self.backend.borrow_mut().failing.push(kind);
    }

    pub fn recover(&self, kind: &'static str) {
        self.backend.borrow_mut().failing.retain(|k| *k != kind);
    }

    pub fn gate(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.backend.borrow_mut().gates.insert(key.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.backend.borrow().calls.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.backend
            .borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn enter(&self, key: &str, kind: &'static str) -> (Option<oneshot::Receiver<()>>, bool) {
        let mut backend = self.backend.borrow_mut();
        backend.calls.push(key.to_string());
        (backend.gates.remove(key), backend.failing.contains(&kind))
    }

    async fn hold(gate: Option<oneshot::Receiver<()>>) {
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait(?Send)]
impl BackendGateway for MockGateway {
    async fn list_sessions(&self) -> Result<SessionList> {
        let (gate, failing) = self.enter("list", "list");
        let sessions = {
            let mut backend = self.backend.borrow_mut();
            match backend.queued_listings.pop_front() {
                Some(queued) => queued,
                None => backend.listing.clone(),
            }
        };
        Self::hold(gate).await;
        if failing {
            return Err(SyncError::status("/api/chat/sessions", 500));
        }
        Ok(SessionList { sessions })
    }

    async fn fetch_history(&self, session_id: &SessionId) -> Result<History> {
        let key = format!("history:{session_id}");
        let (gate, failing) = self.enter(&key, "history");
        let messages = self
            .backend
            .borrow()
            .histories
            .get(session_id.as_str())
            .cloned()
            .unwrap_or_default();
        Self::hold(gate).await;
        if failing {
            return Err(SyncError::network(key, "connection reset"));
        }
        Ok(History { messages })
    }

    async fn create_session(&self) -> Result<CreatedSession> {
        let (gate, failing) = self.enter("create", "create");
        let created = self.backend.borrow_mut().created.pop_front();
        Self::hold(gate).await;
        if failing {
            return Err(SyncError::status("/api/chat/sessions/new", 500));
        }
        created.ok_or_else(|| SyncError::decode("/api/chat/sessions/new", "nothing scripted"))
    }

    async fn send_message(&self, session_id: &SessionId, _message: &str) -> Result<Reply> {
        let key = format!("send:{session_id}");
        let (gate, failing) = self.enter(&key, "send");
        let reply = self.backend.borrow_mut().replies.pop_front();
        Self::hold(gate).await;
        if failing {
            return Err(SyncError::status(key, 502));
        }
        reply.ok_or_else(|| SyncError::decode(key, "nothing scripted"))
    }
}
