//! Relay-specific error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use shared::{MessageResponse, SharedError};

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Result not found")]
    NotFound { id: String },

    #[error("Invalid result: {0}")]
    InvalidResult(#[from] SharedError),

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Invalid configuration: {field} = {value}")]
    ConfigError { field: String, value: String },

    #[error("HTTP server startup failed on {addr}")]
    ServerStartupFailed { addr: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::NotFound { .. } => StatusCode::NOT_FOUND,
            RelayError::InvalidResult(_) | RelayError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            RelayError::NotFound { .. } => (status, Json(MessageResponse::new(self.to_string()))).into_response(),
            _ => {
                let body = json!({
                    "error": self.to_string(),
                    "message": "Failed to save result",
                });
                (status, Json(body)).into_response()
            }
        }
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
