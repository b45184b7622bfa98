//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod channel_transport;
pub mod file_persistence;
pub mod http_api;
pub mod notifier;
pub mod websocket_transport;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use channel_transport::ChannelTransport;
pub use file_persistence::{NoPersistence, RealFilePersistence};
pub use http_api::RealResultsApi;
pub use notifier::{NoNotifier, TracingNotifier};
pub use websocket_transport::RealWebSocketTransport;
