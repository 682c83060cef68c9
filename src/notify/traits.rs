use async_trait::async_trait;
use std::fmt;

use crate::errors::AppResult;

/// Interface to a notification display service
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// Capabilities the server advertises, such as `body-markup`
    async fn capabilities(&self) -> AppResult<Vec<String>>;

    /// Display a single notification
    async fn show(&self, notification: &Notification) -> AppResult<()>;

    /// Short name used in log lines
    fn name(&self) -> &'static str;
}

/// Severity hint attached to a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// How long the server keeps a notification on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    ServerDefault,
    Never,
    Milliseconds(u32),
}

impl From<i32> for Expiry {
    /// Follows the freedesktop convention: -1 server default, 0 never
    fn from(value: i32) -> Self {
        match value {
            v if v < 0 => Expiry::ServerDefault,
            0 => Expiry::Never,
            v => Expiry::Milliseconds(v as u32),
        }
    }
}

/// A fully rendered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub app_name: String,
    pub summary: String,
    pub body: String,
    pub urgency: Urgency,
    pub expiry: Expiry,
    pub hints: Vec<(String, String)>,
}

/// Dispatch counters, logged when the daemon stops
#[derive(Debug, Clone, Default)]
pub struct DispatchStats {
    pub sent: u64,
    pub failed: u64,
    pub last_error: Option<String>,
}

impl DispatchStats {
    pub fn record_success(&mut self) {
        self.sent += 1;
    }

    pub fn record_failure(&mut self, error: String) {
        self.failed += 1;
        self.last_error = Some(error);
    }
}
