//! Unified error handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::openai::CompletionError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Completion service call failed.
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing state (e.g., duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body: a short machine-readable reason, never internals.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side faults with Sentry
        if matches!(
            self,
            Self::Database(RepositoryError::Database(_)) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }
        if matches!(self, Self::Completion(_)) {
            tracing::warn!(error = %self, "Completion service unavailable");
        }

        let (status, message) = match &self {
            Self::Database(RepositoryError::Database(_)) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
            Self::Database(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, "not found".to_string())
            }
            Self::Database(RepositoryError::Conflict(_)) => {
                (StatusCode::CONFLICT, "conflict".to_string())
            }
            Self::Completion(_) => (StatusCode::BAD_GATEWAY, "completion unavailable".to_string()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            Self::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
