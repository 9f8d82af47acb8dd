//! Client-side synchronization of chat sessions and their messages.
//!
//! [`SyncController`] owns a [`SessionDirectory`] (the sidebar list) and an
//! [`ActiveConversation`] (the open session's history) and keeps both
//! consistent with a [`BackendGateway`] while requests overlap and fail:
//!
//! - user messages appear before the network round trip and are never
//!   withdrawn,
//! - a history response is installed only if its session is still the one
//!   open,
//! - a session list never overwrites a list fetched after it.
//!
//! The controller is single-threaded (`Rc` inside). The presentation layer
//! reads [`SyncState`] snapshots through [`SyncController::subscribe`] and
//! never mutates them.

pub mod config;
pub mod controller;
pub mod conversation;
pub mod directory;
pub mod error;
pub mod gateway;
pub mod model;
pub mod state;
pub mod timestamp;
pub mod wire;

pub use config::SyncConfig;
pub use controller::{SendOutcome, SyncController};
pub use conversation::ActiveConversation;
pub use directory::SessionDirectory;
pub use error::SyncError;
pub use gateway::BackendGateway;
pub use model::{Message, MessageId, Sender, Session, SessionId};
pub use state::{Subscription, SyncState};
