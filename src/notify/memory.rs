use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::{Notification, NotificationClient};
use crate::errors::{AppError, AppResult};

/// Keeps every notification in memory
///
/// Clones share the same log, so a test can hand one clone to the daemon and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    capabilities: Vec<String>,
    sent: Arc<Mutex<Vec<Notification>>>,
    fail_after: Option<usize>,
}

impl RecordingClient {
    pub fn new<S: Into<String>>(capabilities: impl IntoIterator<Item = S>) -> Self {
        Self {
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Reject every notification after the first `count`
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|sent| sent.len()).unwrap_or(0)
    }
}

#[async_trait]
impl NotificationClient for RecordingClient {
    async fn capabilities(&self) -> AppResult<Vec<String>> {
        Ok(self.capabilities.clone())
    }

    async fn show(&self, notification: &Notification) -> AppResult<()> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| AppError::internal("recording client lock poisoned"))?;

        if matches!(self.fail_after, Some(limit) if sent.len() >= limit) {
            return Err(AppError::notification_send(
                &notification.summary,
                "rejected by recording client",
            ));
        }
        sent.push(notification.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
