use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the dev backend. Each maps onto an HTTP status; the
/// body is `{ "detail": "<message>" }`.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Lookup errors ────────────────────────────────────────────────────────
    #[error("Session '{id}' not found")]
    SessionNotFound { id: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::SessionNotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptyField { .. } | AppError::FieldTooLong { .. })
    }

    pub fn status(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::NOT_FOUND
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            AppError::SessionNotFound { id: "9".into() }.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::EmptyField { field_name: "message".into() }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FieldTooLong { field_name: "message".into(), max_length: 1, actual_length: 2 }.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
