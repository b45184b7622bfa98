//! Shared types for the competition results system
//!
//! Contains the result data model, the realtime change events and REST
//! envelopes exchanged between the relay and its clients, and the
//! process-aware logging helpers used by both binaries.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod notification;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{ChangeEvent, CreatedResponse, MessageResponse};
pub use notification::{DEFAULT_EVENT_TITLE, NotificationContent};
