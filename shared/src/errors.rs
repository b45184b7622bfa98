//! Shared error types for the results system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Notification payload rejected: missing {field}")]
    InvalidNotification { field: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
