//! Error types for the photo server
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::records::StoreError;

// == App Error Enum ==
/// Unified error type for the photo server.
#[derive(Error, Debug)]
pub enum AppError {
    /// Cache key is neither a string nor a number
    #[error("{0}")]
    InvalidKey(String),

    /// Invalid request data (missing file, malformed body, rejected input)
    #[error("{0}")]
    Validation(String),

    /// Record, file or cache entry not found
    #[error("{0}")]
    NotFound(String),

    /// Cache entry outlived its TTL
    #[error("Key expired: {0}")]
    Expired(String),

    /// Record store rejected or failed the operation
    #[error("{0}")]
    Persistence(String),

    /// Filesystem failure
    #[error("{0}")]
    Transport(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidKey(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::Expired(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) | AppError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %message, "request rejected");
        }

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Conversions ==
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the photo server.
pub type Result<T> = std::result::Result<T, AppError>;
