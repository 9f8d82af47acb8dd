//! The client core driven against the dev backend, in process.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::Router;
use chat_sync::error::Result;
use chat_sync::wire::{self, CreatedSession, History, Reply, SendRequest, SessionList};
use chat_sync::{BackendGateway, SendOutcome, Sender, SessionId, SyncController, SyncError};
use rag_chat_devserver::responder::DevResponder;
use rag_chat_devserver::{chat_service, router};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Gateway that hands requests straight to the router.
#[derive(Clone)]
struct RouterGateway {
    app: Router,
}

impl RouterGateway {
    async fn call<T: DeserializeOwned>(&self, method: &str, path: &str, body: Option<String>) -> Result<T> {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder.header("content-type", "application/json").body(Body::from(json)),
            None => builder.body(Body::empty()),
        }
        .map_err(|e| SyncError::encode(path, e))?;

        let resp = self
            .app
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| SyncError::network(path, e))?;
        if !resp.status().is_success() {
            return Err(SyncError::status(path, resp.status().as_u16()));
        }
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .map_err(|e| SyncError::network(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| SyncError::decode(path, e))
    }
}

#[async_trait(?Send)]
impl BackendGateway for RouterGateway {
    async fn list_sessions(&self) -> Result<SessionList> {
        self.call("GET", wire::SESSIONS_PATH, None).await
    }

    async fn fetch_history(&self, session_id: &SessionId) -> Result<History> {
        self.call("GET", &wire::history_path(session_id), None).await
    }

    async fn create_session(&self) -> Result<CreatedSession> {
        self.call("POST", wire::NEW_SESSION_PATH, None).await
    }

    async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<Reply> {
        let body = serde_json::to_string(&SendRequest { message: message.to_string() })
            .map_err(|e| SyncError::encode("send", e))?;
        self.call("POST", &wire::send_path(session_id), Some(body)).await
    }
}

fn gateway() -> RouterGateway {
    RouterGateway { app: router(chat_service(DevResponder::default())) }
}

fn transcript(c: &SyncController<RouterGateway>) -> Vec<(Sender, String)> {
    c.snapshot()
        .conversation()
        .messages()
        .iter()
        .map(|m| (m.sender, m.content.clone()))
        .collect()
}

#[tokio::test]
async fn new_chat_send_and_reload() {
    let gw = gateway();
    let client = SyncController::new(gw.clone());

    assert!(client.refresh_directory().await.unwrap().is_empty());
    assert!(client.snapshot().conversation().session_id().is_none());

    let session = client.create_session().await.unwrap();
    assert_eq!(session.id, SessionId::from(1));

    assert_eq!(client.send_message("hello").await, SendOutcome::Delivered);
    let messages = transcript(&client);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], (Sender::User, "hello".to_string()));
    assert_eq!(messages[1].0, Sender::Assistant);
    assert!(messages[1].1.contains("You asked: \"hello\""));

    // A second client on the same backend sees the persisted exchange.
    let reloaded = SyncController::new(gw);
    reloaded.refresh_directory().await.unwrap();
    assert_eq!(reloaded.snapshot().conversation().session_id(), Some(&session.id));
    assert_eq!(transcript(&reloaded), messages);
}

#[tokio::test]
async fn most_recently_used_session_is_opened_on_load() {
    let gw = gateway();
    let client = SyncController::new(gw.clone());
    let first = client.create_session().await.unwrap();
    let second = client.create_session().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;

    client.select_session(first.id.clone()).await;
    client.send_message("revive the first chat").await;

    let ids: Vec<SessionId> = client
        .snapshot()
        .directory()
        .sessions()
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(ids, [first.id.clone(), second.id]);

    let reloaded = SyncController::new(gw);
    reloaded.refresh_directory().await.unwrap();
    assert_eq!(reloaded.snapshot().conversation().session_id(), Some(&first.id));
}

#[tokio::test]
async fn backend_rejection_becomes_an_error_notice() {
    let client = SyncController::new(gateway());
    // Never created on the backend, so the send is answered with 404.
    client.select_session(SessionId::from(7)).await;
    assert!(client.snapshot().error().is_some());

    assert_eq!(client.send_message("anyone there?").await, SendOutcome::Failed);
    assert_eq!(
        transcript(&client),
        [
            (Sender::User, "anyone there?".to_string()),
            (Sender::Assistant, chat_sync::config::SEND_FAILURE_NOTICE.to_string()),
        ]
    );
}
