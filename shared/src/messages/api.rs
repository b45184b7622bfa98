//! REST response envelopes used by the relay

use serde::{Deserialize, Serialize};

use crate::types::ResultRecord;

/// Body of a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub data: ResultRecord,
}

/// Plain acknowledgement or error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
