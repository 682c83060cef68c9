//! Daemon runtime
//!
//! This module provides:
//! - FIFO opening, stale-input draining and async reads
//! - The read loop feeding the syslog processor and dispatcher
//! - A signal bridge that turns SIGTERM/SIGINT/SIGHUP into shutdown
//! - Background start by re-executing the binary

pub mod detach;
pub mod fifo;
pub mod server;
pub mod signals;

pub use detach::{become_session_leader, is_detached_child, spawn_background};
pub use fifo::{FifoReader, FifoSource};
pub use server::SyslogDaemon;
pub use signals::{spawn_signal_bridge, ShutdownSignal};

use flume::Receiver;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::errors::AppResult;
use crate::notify::{DispatchStats, NotificationClient};
use crate::syslog::MarkupFilter;

/// Open the FIFO, prepare the notification path and run the read loop
///
/// Startup steps run in a fixed order so each failure maps to its exit
/// code: FIFO open (2), stale-input drain (7), notification service (3).
pub async fn start(
    config: &Config,
    client: Arc<dyn NotificationClient>,
    shutdown_receiver: Receiver<()>,
) -> AppResult<DispatchStats> {
    let mut source = FifoSource::open(&config.fifo.path)?;

    if config.fifo.drain_on_start {
        let discarded = source.drain(config.daemon.max_message_size)?;
        if discarded > 0 {
            info!("Discarded {} bytes of stale input", discarded);
        }
    }

    let reader = source.into_reader()?;

    let capabilities = client.capabilities().await?;
    let filter = MarkupFilter::resolve(config.notify.markup, &capabilities);
    info!(
        "Using {} notification client, markup escaping {}",
        client.name(),
        if filter.is_active() { "on" } else { "off" }
    );

    SyslogDaemon::new(reader, config, filter, client, shutdown_receiver)
        .run()
        .await
}
