//! syslog-notify library
//!
//! Reads syslog lines from a named pipe, turns them into desktop
//! notifications and keeps bursts of messages from flooding the screen.

pub mod cli;
pub mod config;
pub mod daemon;
pub mod errors;
pub mod notify;
pub mod syslog;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigManager};
pub use errors::{AppError, AppResult};
pub use notify::{Dispatcher, Notification, NotificationClient};
pub use syslog::{BufferProcessor, LineBuffer, LineEvent};
