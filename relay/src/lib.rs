//! Results relay
//!
//! REST backend for the festival results collection. Every write is pushed
//! to WebSocket subscribers as a change event so clients stay in sync
//! without refetching.

pub mod error;
pub mod server;
pub mod services;
pub mod state;
pub mod traits;
pub mod web;

// Re-export main types
pub use error::{RelayError, RelayResult};
pub use server::RelayServer;
pub use services::RealResultRepository;
pub use state::RelayState;
pub use traits::ResultRepository;
