//! Unified error handling
//!
//! Application-level error type and the JSON envelope every error response
//! is serialized into:
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Event event:abc not found"
//! }
//! ```
//!
//! Database and internal errors are logged server-side and returned to the
//! client with a generic message. Authentication failures are always mapped
//! to the same 401 body, regardless of which check failed.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

/// Response envelope used for message-style responses and all errors
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not authorized")]
    /// Missing, expired or invalid credential (401, uniform message)
    Unauthorized,

    #[error("Permission denied: {0}")]
    /// Authenticated but lacking the required role (403)
    Forbidden(String),

    #[error("Resource not found: {0}")]
    /// Record id has no match (404)
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// Duplicate unique field (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// Missing or malformed input, rejected before persistence (400)
    Validation(String),

    #[error("Dependency failure: {0}")]
    /// External collaborator (PDF renderer) failed (502)
    Dependency(String),

    #[error("Database error: {0}")]
    /// Storage failure (500, generic client message)
    Database(String),

    #[error("Internal server error: {0}")]
    /// Anything else unexpected (500, generic client message)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Uniform body: the caller never learns whether the token was
            // missing, expired or malformed.
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not authorized".to_string()),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::Dependency(msg) => {
                error!(target: "dependency", error = %msg, "Dependency failure");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            success: false,
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn dependency(msg: impl Into<String>) -> Self {
        Self::Dependency(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// ========== Helper functions ==========

/// Message-only success response
pub fn ok_message(message: impl Into<String>) -> Json<AppResponse<()>> {
    Json(AppResponse {
        success: true,
        message: message.into(),
        data: None,
    })
}

/// Success response carrying data alongside a message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    })
}
