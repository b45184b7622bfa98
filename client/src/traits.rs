//! Service trait definitions for dependency injection
//!
//! All I/O is abstracted through these traits so the provider can run
//! against the relay, an in-process channel, or mocks in tests.

use async_trait::async_trait;
use tokio::sync::mpsc;

use shared::{NotificationContent, ResultDraft, ResultId, ResultRecord};

use crate::core::PublishedState;
use crate::error::ClientResult;
use crate::types::{Subscription, TransportEvent};

/// REST backend holding the authoritative collection
#[mockall::automock]
#[async_trait]
pub trait ResultsApi: Send + Sync {
    /// Fetch the full collection
    async fn fetch_all(&self) -> ClientResult<Vec<ResultRecord>>;

    /// Create a record; returns it with its assigned id
    async fn create(&self, draft: ResultDraft) -> ClientResult<ResultRecord>;

    /// Replace a record wholesale; returns the stored record
    async fn update(&self, id: &ResultId, draft: ResultDraft) -> ClientResult<ResultRecord>;

    /// Delete a record
    async fn delete(&self, id: &ResultId) -> ClientResult<()>;
}

/// Realtime channel delivering remote change events
#[mockall::automock]
#[async_trait]
pub trait ChangeTransport: Send + Sync {
    /// Start forwarding change events into `sink` until the returned
    /// subscription ends. `TransportEvent::Resync` is sent whenever events
    /// may have been lost since the subscription began.
    async fn subscribe(&self, sink: mpsc::Sender<TransportEvent>) -> ClientResult<Subscription>;
}

/// Optional cache of the published state
#[mockall::automock]
#[async_trait]
pub trait StatePersistence: Send + Sync {
    /// Cached collection from a previous run, if any
    async fn load(&self) -> ClientResult<Option<Vec<ResultRecord>>>;

    /// Called after every published change
    async fn save(&self, state: &PublishedState) -> ClientResult<()>;
}

/// Push notification delivery for newly added results
#[mockall::automock]
#[async_trait]
pub trait ResultNotifier: Send + Sync {
    async fn notify(&self, content: NotificationContent) -> ClientResult<()>;
}
