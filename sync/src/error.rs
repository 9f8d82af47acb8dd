use thiserror::Error;

/// Failure of a single backend call.
///
/// The controller treats every variant the same way; the distinction only
/// matters for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Network error calling {endpoint}: {message}")]
    Network { endpoint: String, message: String },

    #[error("Server returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Could not encode request for {endpoint}: {message}")]
    Encode { endpoint: String, message: String },
}

impl SyncError {
    pub fn network(endpoint: impl Into<String>, message: impl ToString) -> Self {
        SyncError::Network { endpoint: endpoint.into(), message: message.to_string() }
    }

    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        SyncError::Status { endpoint: endpoint.into(), status }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl ToString) -> Self {
        SyncError::Decode { endpoint: endpoint.into(), message: message.to_string() }
    }

    pub fn encode(endpoint: impl Into<String>, message: impl ToString) -> Self {
        SyncError::Encode { endpoint: endpoint.into(), message: message.to_string() }
    }

    /// HTTP status, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SyncError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
