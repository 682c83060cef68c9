//! Notification clients and dispatching
//!
//! ## Architecture
//!
//! - **NotificationClient**: async interface to a display service
//! - **DesktopClient**: freedesktop notifications over D-Bus
//! - **ConsoleClient**: prints to stdout for dry runs
//! - **RecordingClient**: in-memory log, for tests and embedding
//! - **Dispatcher**: urgency, expiry and hints, plus the failure policy

pub mod console;
pub mod desktop;
pub mod dispatcher;
pub mod memory;
pub mod traits;

pub use console::ConsoleClient;
pub use desktop::DesktopClient;
pub use dispatcher::{detect_urgency, Dispatcher};
pub use memory::RecordingClient;
pub use traits::{DispatchStats, Expiry, Notification, NotificationClient, Urgency};

use std::sync::Arc;

/// Pick the client for a run
pub fn create_client(dry_run: bool) -> Arc<dyn NotificationClient> {
    if dry_run {
        Arc::new(ConsoleClient::new())
    } else {
        Arc::new(DesktopClient::new())
    }
}
