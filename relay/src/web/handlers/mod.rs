//! Request handlers

pub mod api;
pub mod websocket;

pub use api::{create_result, delete_result, health_check, list_results, not_found, update_result};
pub use websocket::websocket_handler;
