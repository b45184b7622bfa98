//! Service tests for the results client

pub mod helpers;
mod channel_transport;
mod http_api;
