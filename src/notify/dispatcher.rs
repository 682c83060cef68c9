//! Renders line events into notifications and hands them to a client

use std::sync::Arc;

use tracing::{debug, warn};

use super::traits::{DispatchStats, Expiry, Notification, NotificationClient, Urgency};
use crate::config::{Config, FailurePolicy};
use crate::errors::AppResult;
use crate::syslog::LineEvent;

/// Words that mark a message as critical when urgency detection is on
///
/// Same list Vim's `messages` syntax highlights as errors.
pub const ERROR_KEYWORDS: [&str; 5] = ["fatal", "error", "errors", "failed", "failure"];

/// Hints asking servers to merge repeated notifications into one bubble
pub const APPEND_HINTS: [(&str, &str); 2] = [("x-canonical-append", "allowed"), ("append", "allowed")];

/// Urgency for a message body
pub fn detect_urgency(message: &str, enabled: bool) -> Urgency {
    if !enabled {
        return Urgency::Normal;
    }
    let lowered = message.to_lowercase();
    if ERROR_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        Urgency::Critical
    } else {
        Urgency::Normal
    }
}

pub struct Dispatcher {
    client: Arc<dyn NotificationClient>,
    app_name: String,
    urgency_detection: bool,
    expiry: Expiry,
    policy: FailurePolicy,
    stats: DispatchStats,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn NotificationClient>, config: &Config) -> Self {
        Self {
            client,
            app_name: config.notify.app_name.clone(),
            urgency_detection: config.notify.urgency_detection,
            expiry: Expiry::from(config.notify.expire_timeout_ms),
            policy: config.notify.on_dispatch_failure,
            stats: DispatchStats::default(),
        }
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    pub fn render(&self, event: &LineEvent) -> Notification {
        Notification {
            app_name: self.app_name.clone(),
            summary: event.title.clone(),
            body: event.message.clone(),
            urgency: detect_urgency(&event.message, self.urgency_detection),
            expiry: self.expiry,
            hints: APPEND_HINTS
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Show a single event
    pub async fn dispatch(&mut self, event: &LineEvent) -> AppResult<()> {
        let notification = self.render(event);
        debug!(
            "Dispatching '{}' ({}) via {} client",
            notification.summary,
            notification.urgency,
            self.client.name()
        );

        match self.client.show(&notification).await {
            Ok(()) => {
                self.stats.record_success();
                Ok(())
            }
            Err(e) => {
                self.stats.record_failure(e.to_string());
                Err(e)
            }
        }
    }

    /// Show events in order, applying the failure policy
    ///
    /// Under [`FailurePolicy::Exit`] the first failure is returned and the
    /// remaining events are not shown.
    pub async fn dispatch_all(&mut self, events: &[LineEvent]) -> AppResult<()> {
        for event in events {
            if let Err(e) = self.dispatch(event).await {
                match self.policy {
                    FailurePolicy::Exit => return Err(e),
                    FailurePolicy::Skip => warn!("Skipping notification: {}", e),
                }
            }
        }
        Ok(())
    }
}
