use axum::extract::{Path, State};
use axum::Json;
use chat_sync::wire::{CreatedSession, History, Reply, SendRequest, SessionList};

use crate::errors::AppError;
use crate::service::chat_service::ChatService;

/// GET `/api/chat/sessions`: sessions, most recently updated first
pub async fn list_sessions_handler(State(svc): State<ChatService>) -> Json<SessionList> {
    Json(svc.list_sessions().await)
}

/// POST `/api/chat/sessions/new`: open an empty session
pub async fn new_session_handler(State(svc): State<ChatService>) -> Json<CreatedSession> {
    Json(svc.create_session().await)
}

/// GET `/api/chat/history/{session_id}`: messages, oldest first
pub async fn history_handler(
    Path(session_id): Path<String>,
    State(svc): State<ChatService>,
) -> Result<Json<History>, AppError> {
    svc.history(&session_id).await.map(Json)
}

/// POST `/api/chat/{session_id}`: one question/answer turn
pub async fn chat_handler(
    Path(session_id): Path<String>,
    State(svc): State<ChatService>,
    Json(body): Json<SendRequest>,
) -> Result<Json<Reply>, AppError> {
    svc.chat(&session_id, &body.message).await.map(Json)
}
