use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::AppError;
use crate::models::ChatSession;

#[derive(Default)]
struct Sessions {
    rows: Vec<ChatSession>,
    last_id: u64,
}

/// In-memory `chat_sessions` table.
#[derive(Clone, Default)]
pub struct SessionRepository {
    inner: Arc<RwLock<Sessions>>,
}

impl SessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently updated first; ties go to the newer session.
    pub async fn find_all(&self) -> Vec<ChatSession> {
        let mut rows = self.inner.read().await.rows.clone();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        rows
    }

    pub async fn find_by_id(&self, id: u64) -> Option<ChatSession> {
        self.inner.read().await.rows.iter().find(|s| s.id == id).cloned()
    }

    pub async fn create(&self) -> ChatSession {
        let mut sessions = self.inner.write().await;
        sessions.last_id += 1;
        let session = ChatSession::new(sessions.last_id);
        sessions.rows.push(session.clone());
        debug!("Created session {} ({})", session.id, session.title);
        session
    }

    pub async fn update_timestamp(&self, id: u64) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::SessionNotFound { id: id.to_string() })?;
        session.updated_at = Utc::now();
        Ok(())
    }
}
