use chat_sync::wire::{HistoryRecord, SessionRecord};
use chat_sync::{Sender, SessionId};
use chrono::{DateTime, Local, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: u64,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: Local::now().format("Chat %b %d, %H:%M").to_string(),
            updated_at: Utc::now(),
        }
    }
}

impl From<&ChatSession> for SessionRecord {
    fn from(s: &ChatSession) -> Self {
        Self {
            id: SessionId::from(s.id),
            title: Some(s.title.clone()),
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredMessage {
    pub id: String,
    pub session_id: u64,
    pub role: Sender,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    pub fn new(session_id: u64, role: Sender, content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id,
            role,
            content,
            created_at: Utc::now(),
        }
    }
}

impl From<&StoredMessage> for HistoryRecord {
    fn from(m: &StoredMessage) -> Self {
        Self {
            content: m.content.clone(),
            role: m.role,
            created_at: m.created_at,
        }
    }
}
