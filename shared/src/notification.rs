//! Push notification content for newly published results
//!
//! Only the payload is built here; delivery belongs to whichever
//! notifier the client is configured with.

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{Category, ResultRecord};

/// Title used when none is configured
pub const DEFAULT_EVENT_TITLE: &str = "Funoon Fiesta";

/// Notification payload for one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub heading: String,
    pub contents: String,
    pub subtitle: String,
}

impl NotificationContent {
    /// Build the payload, rejecting records that lack the fields it shows
    pub fn for_result(event_title: &str, record: &ResultRecord) -> SharedResult<Self> {
        validate(record)?;

        Ok(Self {
            heading: format!("{event_title} Result Update"),
            contents: format!("New Result Added: {} - {}", record.student_name, record.program_name),
            subtitle: format!("{} - {}", record.category, record.prize),
        })
    }
}

fn validate(record: &ResultRecord) -> SharedResult<()> {
    let required = [
        ("studentName", record.student_name.as_str()),
        ("programName", record.program_name.as_str()),
        ("prize", record.prize.as_str()),
    ];

    for (field, value) in required {
        if value.is_empty() {
            return Err(SharedError::InvalidNotification { field: field.to_string() });
        }
    }

    if record.category == Category::Unknown {
        return Err(SharedError::InvalidNotification { field: "category".to_string() });
    }

    Ok(())
}
