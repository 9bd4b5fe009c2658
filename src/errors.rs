//! Application error type and its HTTP rendering.
//!
//! Every fallible path in the crate funnels into [`AppError`]. The axum
//! layer renders it as `{"error": {"code", "message"}}`; storage and
//! internal failures are logged server-side and reported to clients
//! without their underlying detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy of the friend-graph service.
///
/// Client-facing variants carry the offending identifier(s) in their
/// display message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("user {0} not found")]
    UserNotFound(String),

    /// Both identifiers of a pair were missing
    #[error("users {0} and {1} not found")]
    UsersNotFound(String, String),

    #[error("users {0} and {1} are already friends")]
    AlreadyFriends(String, String),

    #[error("{0}")]
    Validation(String),

    #[error("storage error")]
    Storage(#[from] mongodb::error::Error),

    #[error("internal server error")]
    Internal(String),
}

impl AppError {
    /// HTTP status and machine-readable code for the rendered response.
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::UserNotFound(_) | AppError::UsersNotFound(_, _) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            AppError::AlreadyFriends(_, _) => (StatusCode::CONFLICT, "ALREADY_FRIENDS"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message for the response body. Server-side failures are logged here
    /// and replaced with a generic message.
    fn client_message(&self) -> String {
        match self {
            AppError::Storage(error) => {
                tracing::error!("storage operation failed: {:?}", error);
                "A storage error occurred".to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!("internal error: {}", detail);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        AppError::UserNotFound(id.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// Wire shape of a rendered error
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.client_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
