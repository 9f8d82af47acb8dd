use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::StoredMessage;

/// In-memory `chat_messages` table, kept in insertion order.
#[derive(Clone, Default)]
pub struct MessageRepository {
    rows: Arc<RwLock<Vec<StoredMessage>>>,
}

impl MessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest first.
    pub async fn find_by_session_id(&self, session_id: u64) -> Vec<StoredMessage> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect()
    }

    /// Insert, or overwrite the row with the same id in place.
    pub async fn save(&self, message: &StoredMessage) -> StoredMessage {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|m| m.id == message.id) {
            Some(row) => *row = message.clone(),
            None => rows.push(message.clone()),
        }
        message.clone()
    }
}
