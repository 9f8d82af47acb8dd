use async_trait::async_trait;

use crate::error::Result;
use crate::model::SessionId;
use crate::wire::{CreatedSession, History, Reply, SessionList};

/// The REST backend, seen from the client.
///
/// Futures are not required to be `Send`: the browser implementation holds
/// JS handles across awaits. Timeouts are the implementation's business and
/// surface as ordinary errors.
#[async_trait(?Send)]
pub trait BackendGateway {
    async fn list_sessions(&self) -> Result<SessionList>;

    async fn fetch_history(&self, session_id: &SessionId) -> Result<History>;

    async fn create_session(&self) -> Result<CreatedSession>;

    async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<Reply>;
}
