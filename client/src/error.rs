//! Client-specific error types

use thiserror::Error;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Fetch failed with unexpected status: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Unexpected response payload: {details}")]
    UnexpectedPayload { details: String },

    #[error("{operation} failed: {message}")]
    MutationFailed { operation: String, message: String },

    #[error("Realtime transport error: {message}")]
    TransportError { message: String },

    #[error("Cache persistence failed: {message}")]
    PersistenceError { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    ConfigError { field: String, value: String },

    #[error("Provider already started")]
    AlreadyStarted,

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError { message: message.into() }
    }

    pub fn mutation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MutationFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
