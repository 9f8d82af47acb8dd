//! JSON bodies of the backend contract.
//!
//! Shared by the browser gateway (decoding) and the dev backend (encoding).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Sender, Session, SessionId};
use crate::timestamp::iso8601;

pub const SESSIONS_PATH: &str = "/api/chat/sessions";
pub const NEW_SESSION_PATH: &str = "/api/chat/sessions/new";

pub fn history_path(session_id: &SessionId) -> String {
    format!("/api/chat/history/{session_id}")
}

pub fn send_path(session_id: &SessionId) -> String {
    format!("/api/chat/{session_id}")
}

const UNTITLED: &str = "Untitled chat";

/// `GET /api/chat/sessions`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

impl From<SessionRecord> for Session {
    fn from(r: SessionRecord) -> Self {
        Self {
            id: r.id,
            title: r.title.unwrap_or_else(|| UNTITLED.to_string()),
            updated_at: r.updated_at,
        }
    }
}

/// `GET /api/chat/history/{session_id}`, oldest first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub messages: Vec<HistoryRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub content: String,
    pub role: Sender,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
}

/// `POST /api/chat/sessions/new`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
    #[serde(default)]
    pub title: Option<String>,
}

impl CreatedSession {
    /// The server does not report a timestamp for new sessions; `now` stands
    /// in until the next directory refresh.
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        Session {
            id: self.session_id,
            title: self.title.unwrap_or_else(|| UNTITLED.to_string()),
            updated_at: now,
        }
    }
}

/// Body of `POST /api/chat/{session_id}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendRequest {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub response: String,
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
}
