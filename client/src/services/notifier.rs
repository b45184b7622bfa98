//! Notifier that records notifications in the trace log
//!
//! Push delivery to browsers happens outside this crate; this notifier
//! makes the payload visible to whoever tails the client's logs.

use async_trait::async_trait;

use shared::{NotificationContent, ProcessId, process_info};

use crate::error::ClientResult;
use crate::traits::ResultNotifier;

#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResultNotifier for TracingNotifier {
    async fn notify(&self, content: NotificationContent) -> ClientResult<()> {
        process_info!(
            ProcessId::current(),
            heading = %content.heading,
            subtitle = %content.subtitle,
            "🔔 {}",
            content.contents
        );
        Ok(())
    }
}

/// Notifications disabled
#[derive(Debug, Clone, Default)]
pub struct NoNotifier;

#[async_trait]
impl ResultNotifier for NoNotifier {
    async fn notify(&self, _content: NotificationContent) -> ClientResult<()> {
        Ok(())
    }
}
