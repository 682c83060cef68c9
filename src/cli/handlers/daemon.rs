//! Daemon start handler
//!
//! Foreground runs the read loop in this process. Background re-executes
//! the binary detached and returns once the child survived startup.

use anyhow::{Context, Result};
use tracing::{error, info};

use super::super::CliContext;
use crate::daemon::{self, become_session_leader, is_detached_child, spawn_background, spawn_signal_bridge};
use crate::notify::create_client;

/// Handler for running the daemon
pub struct DaemonHandler<'a> {
    context: &'a CliContext,
}

impl<'a> DaemonHandler<'a> {
    /// Create new daemon handler
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub async fn handle_run(&self, foreground: bool) -> Result<()> {
        if foreground {
            return self.run_daemon(false).await;
        }

        if is_detached_child() {
            become_session_leader()?;
            return self.run_daemon(true).await;
        }

        let pid = spawn_background().await?;
        println!("syslog-notify started in background with PID: {}", pid);
        Ok(())
    }

    async fn run_daemon(&self, background: bool) -> Result<()> {
        let _log_guard = self.context.init_logging(background)?;
        let config = &self.context.config;

        info!(
            "Starting syslog-notify (PID {}) on {}",
            std::process::id(),
            config.fifo.path.display()
        );
        if let Some(path) = &self.context.config_path {
            info!("Configuration loaded from {}", path.display());
        }

        let (shutdown_sender, shutdown_receiver) = flume::bounded::<()>(1);
        let signal_task = spawn_signal_bridge(shutdown_sender, background)
            .context("Failed to set up signal handling")?;

        let _guard = scopeguard::guard(signal_task, |task| {
            task.abort();
            info!("Daemon cleanup completed");
        });

        let client = create_client(self.context.dry_run);
        match daemon::start(config, client, shutdown_receiver).await {
            Ok(stats) => {
                info!("syslog-notify stopped ({} notifications shown)", stats.sent);
                Ok(())
            }
            Err(e) => {
                error!("syslog-notify stopping on {} error: {}", e.category(), e);
                Err(e.into())
            }
        }
    }
}
