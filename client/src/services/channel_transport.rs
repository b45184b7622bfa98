//! In-process change transport
//!
//! Fans change events out to subscribers through a tokio broadcast
//! channel. Used when the publisher lives in the same process, and as a
//! deterministic transport in tests.

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};

use shared::{ChangeEvent, ProcessId, process_warn};

use crate::error::ClientResult;
use crate::traits::ChangeTransport;
use crate::types::{Subscription, TransportEvent};

/// Broadcast-backed implementation of `ChangeTransport`
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    events: broadcast::Sender<TransportEvent>,
}

impl ChannelTransport {
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        Self { events }
    }

    /// Publish an event to every current subscriber; returns how many
    /// subscribers received it
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.events.send(TransportEvent::Change(event)).unwrap_or(0)
    }

    /// Tell every subscriber to refetch, as after a lost connection
    pub fn resync(&self) -> usize {
        self.events.send(TransportEvent::Resync).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

impl Default for ChannelTransport {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl ChangeTransport for ChannelTransport {
    async fn subscribe(&self, sink: mpsc::Sender<TransportEvent>) -> ClientResult<Subscription> {
        let mut events = self.events.subscribe();
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => break,
                    received = events.recv() => match received {
                        Ok(event) => {
                            if sink.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            process_warn!(ProcessId::current(), "Change subscriber lagged, {} events skipped", skipped);
                            if sink.send(TransportEvent::Resync).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        });

        Ok(Subscription::new(cancel_tx, task))
    }
}
