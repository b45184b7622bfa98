//! HTTP and WebSocket surface of the relay

pub mod handlers;
