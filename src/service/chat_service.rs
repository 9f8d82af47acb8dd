use chat_sync::wire::{CreatedSession, History, HistoryRecord, Reply, SessionList, SessionRecord};
use chat_sync::{Sender, SessionId};
use tracing::{error, info};

use crate::db::message_repository::MessageRepository;
use crate::db::session_repository::SessionRepository;
use crate::errors::AppError;
use crate::models::{ChatSession, StoredMessage};
use crate::responder::DevResponder;

const MAX_MESSAGE_LENGTH: usize = 8000;

#[derive(Clone)]
pub struct ChatService {
    session_repo: SessionRepository,
    message_repo: MessageRepository,
    responder: DevResponder,
}

impl ChatService {
    pub fn new(
        session_repo: SessionRepository,
        message_repo: MessageRepository,
        responder: DevResponder,
    ) -> Self {
        Self { session_repo, message_repo, responder }
    }

    pub async fn list_sessions(&self) -> SessionList {
        let sessions = self.session_repo.find_all().await;
        SessionList { sessions: sessions.iter().map(SessionRecord::from).collect() }
    }

    pub async fn create_session(&self) -> CreatedSession {
        let session = self.session_repo.create().await;
        CreatedSession {
            session_id: SessionId::from(session.id),
            title: Some(session.title),
        }
    }

    pub async fn history(&self, session_id: &str) -> Result<History, AppError> {
        let session = self.find_session(session_id).await?;
        let messages = self.message_repo.find_by_session_id(session.id).await;
        Ok(History { messages: messages.iter().map(HistoryRecord::from).collect() })
    }

    pub async fn chat(&self, session_id: &str, message: &str) -> Result<Reply, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        if message.trim().is_empty() {
            return Err(AppError::EmptyField { field_name: "message".to_string() });
        }
        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "message".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: message.len(),
            });
        }
        let session = self.find_session(session_id).await?;

        // ── History before this turn, then persist the user message ──────────
        let history = self.message_repo.find_by_session_id(session.id).await;
        self.message_repo
            .save(&StoredMessage::new(session.id, Sender::User, message.to_string()))
            .await;

        // ── Answer, persist the reply & bump the session timestamp ───────────
        let answer = self.responder.reply(&history, message);
        let reply = self
            .message_repo
            .save(&StoredMessage::new(session.id, Sender::Assistant, answer))
            .await;
        if let Err(e) = self.session_repo.update_timestamp(session.id).await {
            error!("Failed to update session timestamp: {e}");
        }
        info!("Answered message in session {}", session.id);

        Ok(Reply { response: reply.content, timestamp: reply.created_at })
    }

    async fn find_session(&self, raw_id: &str) -> Result<ChatSession, AppError> {
        let not_found = || AppError::SessionNotFound { id: raw_id.to_string() };
        let id: u64 = raw_id.parse().map_err(|_| not_found())?;
        self.session_repo.find_by_id(id).await.ok_or_else(not_found)
    }
}
