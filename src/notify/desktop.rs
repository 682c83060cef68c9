//! Freedesktop notification client
//!
//! Talks to the session's notification daemon over D-Bus via `notify-rust`.
//! The D-Bus calls block, so they run on tokio's blocking pool.

use async_trait::async_trait;
use notify_rust::{Hint, Timeout};
use tracing::debug;

use super::traits::{Expiry, Notification, NotificationClient, Urgency};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopClient;

impl DesktopClient {
    pub fn new() -> Self {
        Self
    }
}

fn to_timeout(expiry: Expiry) -> Timeout {
    match expiry {
        Expiry::ServerDefault => Timeout::Default,
        Expiry::Never => Timeout::Never,
        Expiry::Milliseconds(ms) => Timeout::Milliseconds(ms),
    }
}

fn to_urgency(urgency: Urgency) -> notify_rust::Urgency {
    match urgency {
        Urgency::Normal => notify_rust::Urgency::Normal,
        Urgency::Critical => notify_rust::Urgency::Critical,
    }
}

#[async_trait]
impl NotificationClient for DesktopClient {
    async fn capabilities(&self) -> AppResult<Vec<String>> {
        let caps = tokio::task::spawn_blocking(|| {
            notify_rust::get_capabilities().map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| AppError::internal(format!("capability query task failed: {}", e)))?
        .map_err(AppError::notification_init)?;

        debug!("Notification server capabilities: {:?}", caps);
        Ok(caps)
    }

    async fn show(&self, notification: &Notification) -> AppResult<()> {
        let n = notification.clone();
        let summary = n.summary.clone();

        tokio::task::spawn_blocking(move || {
            let mut desktop = notify_rust::Notification::new();
            desktop
                .appname(&n.app_name)
                .summary(&n.summary)
                .body(&n.body)
                .timeout(to_timeout(n.expiry))
                .urgency(to_urgency(n.urgency));
            for (key, value) in n.hints {
                desktop.hint(Hint::Custom(key, value));
            }
            desktop.show().map(|_| ()).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| AppError::internal(format!("notification task failed: {}", e)))?
        .map_err(|reason| AppError::notification_send(summary, reason))
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_mapping() {
        assert!(matches!(to_timeout(Expiry::ServerDefault), Timeout::Default));
        assert!(matches!(to_timeout(Expiry::Never), Timeout::Never));
        assert!(matches!(
            to_timeout(Expiry::Milliseconds(1500)),
            Timeout::Milliseconds(1500)
        ));
    }

    #[test]
    fn test_urgency_mapping() {
        assert!(matches!(
            to_urgency(Urgency::Critical),
            notify_rust::Urgency::Critical
        ));
        assert!(matches!(to_urgency(Urgency::Normal), notify_rust::Urgency::Normal));
    }
}
