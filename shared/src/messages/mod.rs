//! Message types exchanged between the relay and its clients
//!
//! - `change`: realtime change events pushed over the WebSocket channel
//! - `api`: REST response envelopes

pub mod api;
pub mod change;

pub use api::{CreatedResponse, MessageResponse};
pub use change::ChangeEvent;
