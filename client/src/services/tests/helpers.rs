//! Test helpers for client service tests

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use shared::ChangeEvent;

use crate::types::TransportEvent;

/// Standard timeout for async operations in tests
pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Receive the next transport event or fail the test after `TEST_TIMEOUT`
pub async fn recv_transport_event(events: &mut mpsc::Receiver<TransportEvent>) -> TransportEvent {
    timeout(TEST_TIMEOUT, events.recv())
        .await
        .expect("timed out waiting for transport event")
        .expect("event channel closed")
}

/// Receive the next event, which must be a change
pub async fn recv_event(events: &mut mpsc::Receiver<TransportEvent>) -> ChangeEvent {
    match recv_transport_event(events).await {
        TransportEvent::Change(event) => event,
        other => panic!("expected a change event, got {other:?}"),
    }
}

/// Assert nothing arrives within a short window
pub async fn assert_no_event(events: &mut mpsc::Receiver<TransportEvent>) {
    let outcome = timeout(Duration::from_millis(50), events.recv()).await;
    assert!(!matches!(outcome, Ok(Some(_))), "unexpected transport event: {outcome:?}");
}
