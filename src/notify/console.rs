use async_trait::async_trait;

use super::traits::{Notification, NotificationClient};
use crate::errors::AppResult;

/// Prints notifications to stdout instead of showing them
///
/// Used for `--dry-run`, where no notification server may be running.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    capabilities: Vec<String>,
}

impl ConsoleClient {
    pub fn new() -> Self {
        Self {
            capabilities: vec!["body".to_string()],
        }
    }
}

impl Default for ConsoleClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationClient for ConsoleClient {
    async fn capabilities(&self) -> AppResult<Vec<String>> {
        Ok(self.capabilities.clone())
    }

    async fn show(&self, notification: &Notification) -> AppResult<()> {
        println!("Dry run - would send notification:");
        println!("  Title: {}", notification.summary);
        println!("  Urgency: {}", notification.urgency);
        for line in notification.body.lines() {
            println!("  | {}", line);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
