//! Background start
//!
//! Forking a process that already runs a tokio runtime is unsafe, so the
//! background mode re-executes the current binary with the same arguments
//! and null stdio. The child sees [`DETACHED_ENV`] and becomes a session
//! leader before opening the FIFO. Under a service manager use
//! `--foreground` instead.

use std::process::{self, Stdio};
use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Marks the re-executed child process
pub const DETACHED_ENV: &str = "SYSLOG_NOTIFY_DETACHED";

/// How long the parent watches the child for an early exit
const STARTUP_GRACE: Duration = Duration::from_millis(500);

pub fn is_detached_child() -> bool {
    std::env::var_os(DETACHED_ENV).is_some()
}

/// Start a detached copy of this process and return its PID
///
/// A child that dies within the grace period has its exit code propagated,
/// so a missing FIFO still yields exit status 2 in the parent.
pub async fn spawn_background() -> AppResult<u32> {
    let current_exe = std::env::current_exe().map_err(|source| AppError::Spawn { source })?;

    let mut child = process::Command::new(&current_exe)
        .args(std::env::args_os().skip(1))
        .env(DETACHED_ENV, "1")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| AppError::Spawn { source })?;

    sleep(STARTUP_GRACE).await;

    match child.try_wait().map_err(|source| AppError::Spawn { source })? {
        Some(status) => Err(AppError::ChildExited {
            code: status.code().unwrap_or(1),
        }),
        None => {
            debug!("Background daemon running with PID {}", child.id());
            Ok(child.id())
        }
    }
}

/// Detach from the controlling terminal
pub fn become_session_leader() -> AppResult<()> {
    // SAFETY: setsid takes no arguments and only affects this process
    let rc = unsafe { libc::setsid() };
    if rc == -1 {
        return Err(AppError::Session {
            source: std::io::Error::last_os_error(),
        });
    }
    Ok(())
}
