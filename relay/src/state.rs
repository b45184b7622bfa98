//! Relay state shared by every handler

use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::{Mutex, MutexGuard, broadcast};

use shared::{ChangeEvent, ProcessId, process_debug};

/// Buffered change events per lagging WebSocket client
const BROADCAST_CAPACITY: usize = 1000;

pub struct RelayState<R> {
    pub repository: R,
    changes: broadcast::Sender<ChangeEvent>,
    /// Held from a repository write until its change is published, so
    /// clients see changes in commit order
    writes: Mutex<()>,
    connection_count: AtomicU32,
}

impl<R> RelayState<R> {
    pub fn new(repository: R) -> Self {
        let (changes, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            repository,
            changes,
            writes: Mutex::new(()),
            connection_count: AtomicU32::new(0),
        }
    }

    /// Serialize a write with the publish of its change
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().await
    }

    /// Push a change to every connected client
    pub fn publish(&self, event: ChangeEvent) {
        // No receivers is not an error: nobody is watching yet
        let delivered = self.changes.send(event).unwrap_or(0);
        process_debug!(ProcessId::current(), "📡 Change delivered to {} clients", delivered);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    pub fn increment_connection_count(&self) -> u32 {
        self.connection_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn decrement_connection_count(&self) -> u32 {
        self.connection_count.fetch_sub(1, Ordering::Relaxed).saturating_sub(1)
    }

    pub fn connection_count(&self) -> u32 {
        self.connection_count.load(Ordering::Relaxed)
    }
}
