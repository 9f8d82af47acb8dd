use async_trait::async_trait;
use chat_sync::error::Result;
use chat_sync::wire::{self, CreatedSession, History, Reply, SendRequest, SessionList};
use chat_sync::{BackendGateway, SessionId, SyncError};
use gloo_net::http::{Request, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base URL of the backend API server, overridable at build time.
const API_BASE: &str = match option_env!("RAG_CHAT_API_BASE") {
    Some(base) => base,
    None => "http://localhost:8000",
};

/// Supplies the bearer token for API calls. How it got there is not this
/// module's concern.
pub trait AuthProvider {
    fn bearer_token(&self) -> Option<String>;
}

/// Reads the token the login page left in `localStorage`.
pub struct LocalStorageAuth {
    key: &'static str,
}

impl Default for LocalStorageAuth {
    fn default() -> Self {
        Self { key: "token" }
    }
}

impl AuthProvider for LocalStorageAuth {
    fn bearer_token(&self) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage
            .get_item(self.key)
            .ok()?
            .filter(|token| !token.is_empty())
    }
}

/// [`BackendGateway`] over `fetch`.
pub struct HttpGateway {
    base: String,
    auth: Box<dyn AuthProvider>,
}

impl HttpGateway {
    pub fn new(base: impl Into<String>, auth: impl AuthProvider + 'static) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            auth: Box::new(auth),
        }
    }

    fn builder(&self, method: fn(&str) -> RequestBuilder, path: &str) -> RequestBuilder {
        let builder = method(&format!("{}{path}", self.base));
        match self.auth.bearer_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self
            .builder(Request::get, path)
            .build()
            .map_err(|e| SyncError::encode(path, e))?;
        dispatch(path, request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: Option<&B>) -> Result<T> {
        let builder = self.builder(Request::post, path);
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| SyncError::encode(path, e))?;
        dispatch(path, request).await
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new(API_BASE, LocalStorageAuth::default())
    }
}

async fn dispatch<T: DeserializeOwned>(path: &str, request: Request) -> Result<T> {
    let resp = request
        .send()
        .await
        .map_err(|e| SyncError::network(path, e))?;

    if !resp.ok() {
        return Err(SyncError::status(path, resp.status()));
    }

    resp.json::<T>()
        .await
        .map_err(|e| SyncError::decode(path, e))
}

#[async_trait(?Send)]
impl BackendGateway for HttpGateway {
    async fn list_sessions(&self) -> Result<SessionList> {
        self.get(wire::SESSIONS_PATH).await
    }

    async fn fetch_history(&self, session_id: &SessionId) -> Result<History> {
        self.get(&wire::history_path(session_id)).await
    }

    async fn create_session(&self) -> Result<CreatedSession> {
        self.post::<_, SendRequest>(wire::NEW_SESSION_PATH, None).await
    }

    async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<Reply> {
        let body = SendRequest { message: message.to_string() };
        self.post(&wire::send_path(session_id), Some(&body)).await
    }
}
