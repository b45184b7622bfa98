//! Realtime change events
//!
//! Every mutation accepted by the relay is rebroadcast as one of these.
//! Delivery is at-least-once and unordered.

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{ResultId, ResultRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChangeEvent {
    #[serde(rename = "new-result")]
    New { result: ResultRecord },
    #[serde(rename = "update-result")]
    Update { result: ResultRecord },
    #[serde(rename = "delete-result")]
    Delete { id: ResultId },
}

impl ChangeEvent {
    /// Id of the record the event affects
    pub fn target_id(&self) -> &ResultId {
        match self {
            ChangeEvent::New { result } | ChangeEvent::Update { result } => &result.id,
            ChangeEvent::Delete { id } => id,
        }
    }

    /// Wire name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::New { .. } => "new-result",
            ChangeEvent::Update { .. } => "update-result",
            ChangeEvent::Delete { .. } => "delete-result",
        }
    }

    pub fn to_json(&self) -> SharedResult<String> {
        serde_json::to_string(self).map_err(|e| SharedError::SerializationError {
            message: e.to_string(),
        })
    }

    pub fn from_json(text: &str) -> SharedResult<Self> {
        serde_json::from_str(text).map_err(|e| SharedError::DeserializationError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Points};

    fn record(id: &str) -> ResultRecord {
        ResultRecord {
            id: ResultId::from(id),
            student_name: "Amina".to_string(),
            team_name: Some("Alpha".to_string()),
            program_name: "Essay".to_string(),
            category: Category::Single,
            points: Points::Number(10.0),
            prize: "First".to_string(),
        }
    }

    #[test]
    fn test_event_wire_shape() {
        let event = ChangeEvent::New { result: record("r1") };
        let value: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

        assert_eq!(value["type"], "new-result");
        assert_eq!(value["result"]["_id"], "r1");
    }

    #[test]
    fn test_delete_event_parses() {
        let event = ChangeEvent::from_json(r#"{"type":"delete-result","id":"r9"}"#).unwrap();
        assert_eq!(event, ChangeEvent::Delete { id: ResultId::from("r9") });
        assert_eq!(event.target_id().as_str(), "r9");
        assert_eq!(event.kind(), "delete-result");
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result = ChangeEvent::from_json(r#"{"type":"reset"}"#);
        assert!(matches!(result, Err(SharedError::DeserializationError { .. })));
    }
}
