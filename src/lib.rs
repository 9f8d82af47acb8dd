//! Development stand-in for the chat backend.
//!
//! Serves the session/message REST contract from memory with canned
//! answers, so the browser client can run end to end locally.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod responder;
pub mod routes;
pub mod service;

use axum::routing::{get, post};
use axum::Router;
use chat_sync::wire;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::message_repository::MessageRepository;
use crate::db::session_repository::SessionRepository;
use crate::responder::DevResponder;
use crate::routes::api_routes::{chat_handler, history_handler, list_sessions_handler, new_session_handler};
use crate::service::chat_service::ChatService;

/// Fresh service with empty storage.
pub fn chat_service(responder: DevResponder) -> ChatService {
    ChatService::new(SessionRepository::new(), MessageRepository::new(), responder)
}

pub fn router(svc: ChatService) -> Router {
    Router::new()
        .route(wire::SESSIONS_PATH, get(list_sessions_handler))
        .route(wire::NEW_SESSION_PATH, post(new_session_handler))
        .route("/api/chat/history/{session_id}", get(history_handler))
        .route("/api/chat/{session_id}", post(chat_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(svc)
}
