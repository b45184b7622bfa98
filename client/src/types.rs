//! Type definitions for the results client
//!
//! Data types used at the service seams that are not traits themselves.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use shared::ChangeEvent;

/// What a change transport delivers to its subscriber
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A change published by the backend
    Change(ChangeEvent),
    /// Changes may have been missed (reconnect or lag); the receiver should
    /// refetch the full collection
    Resync,
}

/// Live subscription to a change transport.
///
/// Delivery stops when the subscription is unsubscribed or dropped.
#[derive(Debug)]
pub struct Subscription {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Subscription whose delivery loop listens on `cancel`
    pub fn new(cancel: oneshot::Sender<()>, task: JoinHandle<()>) -> Self {
        Self {
            cancel: Some(cancel),
            task: Some(task),
        }
    }

    /// Stop delivery and wait for the delivery loop to exit
    pub async fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}
