//! Signal to shutdown-channel bridge
//!
//! SIGTERM always stops the daemon. In the foreground SIGINT and SIGHUP do
//! too; a background daemon ignores them so closing the launching terminal
//! does not take it down.

use flume::Sender;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{AppResult, ErrorContextExt};

/// Signals the daemon listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Terminate,
    Interrupt,
    Hangup,
}

impl ShutdownSignal {
    pub fn name(self) -> &'static str {
        match self {
            Self::Terminate => "SIGTERM",
            Self::Interrupt => "SIGINT",
            Self::Hangup => "SIGHUP",
        }
    }

    /// Whether this signal ends the daemon in the given mode
    pub fn stops_daemon(self, background: bool) -> bool {
        match self {
            Self::Terminate => true,
            Self::Interrupt | Self::Hangup => !background,
        }
    }
}

pub fn spawn_signal_bridge(shutdown_sender: Sender<()>, background: bool) -> AppResult<JoinHandle<()>> {
    let mut sigterm = signal(SignalKind::terminate()).with_context("install SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).with_context("install SIGINT handler")?;
    let mut sighup = signal(SignalKind::hangup()).with_context("install SIGHUP handler")?;

    Ok(tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                _ = sigterm.recv() => ShutdownSignal::Terminate,
                _ = sigint.recv() => ShutdownSignal::Interrupt,
                _ = sighup.recv() => ShutdownSignal::Hangup,
            };

            if !received.stops_daemon(background) {
                debug!("Ignoring {} in background mode", received.name());
                continue;
            }

            info!("Received {}, shutting down", received.name());
            if let Err(e) = shutdown_sender.send_async(()).await {
                warn!("Failed to deliver shutdown signal: {}", e);
            }
            break;
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_stops_on_every_signal() {
        assert!(ShutdownSignal::Terminate.stops_daemon(false));
        assert!(ShutdownSignal::Interrupt.stops_daemon(false));
        assert!(ShutdownSignal::Hangup.stops_daemon(false));
    }

    #[test]
    fn test_background_only_stops_on_sigterm() {
        assert!(ShutdownSignal::Terminate.stops_daemon(true));
        assert!(!ShutdownSignal::Interrupt.stops_daemon(true));
        assert!(!ShutdownSignal::Hangup.stops_daemon(true));
    }

    #[tokio::test]
    async fn test_sigterm_reaches_the_shutdown_channel() {
        let (sender, receiver) = flume::bounded(1);
        let task = spawn_signal_bridge(sender, true).unwrap();

        let rc = unsafe { libc::kill(libc::getpid(), libc::SIGTERM) };
        assert_eq!(rc, 0);

        tokio::time::timeout(std::time::Duration::from_secs(5), receiver.recv_async())
            .await
            .expect("no shutdown after SIGTERM")
            .unwrap();
        task.await.unwrap();
    }
}
