//! Common test utilities for client integration tests

#![allow(dead_code)]

pub mod fixtures;

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;

use client::PublishedState;

/// Standard timeout for async operations in tests
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Wait until a published state satisfies `condition`
pub async fn wait_for_state<F>(states: &mut watch::Receiver<PublishedState>, condition: F) -> PublishedState
where
    F: Fn(&PublishedState) -> bool,
{
    timeout(TEST_TIMEOUT, async {
        loop {
            {
                let state = states.borrow_and_update();
                if condition(&state) {
                    return state.clone();
                }
            }
            states.changed().await.expect("provider dropped");
        }
    })
    .await
    .expect("timed out waiting for published state")
}
