//! Core shared types: the result record and its identifiers

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::errors::{SharedError, SharedResult};

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Reported by `ProcessId::current()` before any `init_*` call (tests, embedding)
static EMBEDDED: ProcessId = ProcessId::Embedded;

/// Process identifier for any component in the system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Results client process
    Client,
    /// CRUD relay backend
    Relay,
    /// Library used without a process entry point
    Embedded,
}

impl ProcessId {
    /// Initialize the global process ID for the client
    pub fn init_client() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Client)
    }

    /// Initialize the global process ID for the relay
    pub fn init_relay() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Relay)
    }

    /// Get the global process ID, `Embedded` when nothing was initialized
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&EMBEDDED)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Client => write!(f, "client"),
            ProcessId::Relay => write!(f, "relay"),
            ProcessId::Embedded => write!(f, "embedded"),
        }
    }
}

/// Opaque identifier assigned by the document store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResultId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ResultId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Competition category of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Single,
    Group,
    General,
    /// Any tag outside the three known categories
    #[serde(other)]
    Unknown,
}

impl Category {
    /// Categories that own a program list, in publication order
    pub const RANKED: [Category; 3] = [Category::Group, Category::Single, Category::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Single => "SINGLE",
            Category::Group => "GROUP",
            Category::General => "GENERAL",
            Category::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SINGLE" => Ok(Category::Single),
            "GROUP" => Ok(Category::Group),
            "GENERAL" => Ok(Category::General),
            _ => Err(SharedError::InvalidField {
                field: "category".to_string(),
                reason: format!("unknown category '{s}'"),
            }),
        }
    }
}

/// Points as delivered by the backend: a number, a number-like string, or
/// anything else the document store let through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Points {
    Number(f64),
    Text(String),
    /// null, booleans, arrays, objects; always scores 0.0
    Other(serde_json::Value),
}

impl Points {
    /// Numeric value used for ranking. Anything that is not a finite
    /// number coerces to 0.0.
    pub fn score(&self) -> f64 {
        let value = match self {
            Points::Number(value) => *value,
            Points::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
            Points::Other(_) => 0.0,
        };

        if value.is_finite() { value } else { 0.0 }
    }
}

impl Default for Points {
    fn default() -> Self {
        Points::Number(0.0)
    }
}

impl From<f64> for Points {
    fn from(value: f64) -> Self {
        Points::Number(value)
    }
}

impl From<&str> for Points {
    fn from(value: &str) -> Self {
        Points::Text(value.to_string())
    }
}

/// A result without its id: the payload of an add or a full edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDraft {
    #[serde(default)]
    pub student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default)]
    pub program_name: String,
    pub category: Category,
    #[serde(default)]
    pub points: Points,
    #[serde(default)]
    pub prize: String,
}

impl ResultDraft {
    /// Reject drafts the document store would refuse
    pub fn validate(&self) -> SharedResult<()> {
        if self.student_name.trim().is_empty() {
            return Err(SharedError::InvalidField {
                field: "studentName".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.program_name.trim().is_empty() {
            return Err(SharedError::InvalidField {
                field: "programName".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Attach an id, producing a stored record
    pub fn into_record(self, id: ResultId) -> ResultRecord {
        ResultRecord {
            id,
            student_name: self.student_name,
            team_name: self.team_name,
            program_name: self.program_name,
            category: self.category,
            points: self.points,
            prize: self.prize,
        }
    }
}

/// One competition result as stored and broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: ResultId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub student_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_optional_text")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub program_name: String,
    #[serde(default = "unknown_category", deserialize_with = "lenient_category")]
    pub category: Category,
    #[serde(default)]
    pub points: Points,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prize: String,
}

impl ResultRecord {
    /// Uppercased team name, `None` when absent or blank
    pub fn normalized_team(&self) -> Option<String> {
        normalize_name(self.team_name.as_deref())
    }

    /// Uppercased program name, `None` when blank
    pub fn normalized_program(&self) -> Option<String> {
        normalize_name(Some(&self.program_name))
    }

    pub fn score(&self) -> f64 {
        self.points.score()
    }

    /// Strip the id, e.g. to resubmit the record as an edit
    pub fn to_draft(&self) -> ResultDraft {
        ResultDraft {
            student_name: self.student_name.clone(),
            team_name: self.team_name.clone(),
            program_name: self.program_name.clone(),
            category: self.category,
            points: self.points.clone(),
            prize: self.prize.clone(),
        }
    }
}

// Stored documents are read leniently so one malformed record cannot fail
// a whole collection: non-string text fields read as empty, and a category
// that is not a known tag reads as `Unknown`.

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_optional_text(deserializer)?.unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_category<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Category, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(tag) => Ok(tag.parse().unwrap_or(Category::Unknown)),
        _ => Ok(Category::Unknown),
    }
}

fn unknown_category() -> Category {
    Category::Unknown
}

fn normalize_name(name: Option<&str>) -> Option<String> {
    match name {
        Some(name) if !name.is_empty() => Some(name.to_uppercase()),
        _ => None,
    }
}
