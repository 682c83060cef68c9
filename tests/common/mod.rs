//! Common test utilities and helpers
//!
//! FIFO setup, writer handles and polling helpers shared by the
//! integration tests.

#![allow(dead_code)]

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use syslog_notify::config::Config;
use syslog_notify::notify::RecordingClient;
use tempfile::TempDir;

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Create a named pipe inside `dir`
pub fn make_fifo(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("syslog-notify.fifo");
    let c_path = CString::new(path.as_os_str().as_bytes()).unwrap();
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) };
    assert_eq!(rc, 0, "mkfifo failed: {}", std::io::Error::last_os_error());
    path
}

/// Open a write end without waiting for a reader
///
/// Opening read-write never blocks on Linux, unlike a write-only open.
pub fn open_writer(path: &Path) -> File {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .expect("Failed to open FIFO for writing")
}

/// Write `data` in one call so the daemon sees it in one read
pub fn write_atomic(writer: &mut File, data: &str) {
    assert!(data.len() <= 4096, "writes above PIPE_BUF may be split");
    writer.write_all(data.as_bytes()).unwrap();
}

/// A classic BSD syslog line
pub fn syslog_line(tag: &str, message: &str) -> String {
    format!("Oct 16 12:00:00 host {}: {}\n", tag, message)
}

/// Defaults pointing at `fifo`, without the stale-input drain
pub fn test_config(fifo: &Path) -> Config {
    let mut config = Config::default();
    config.fifo.path = fifo.to_path_buf();
    config.fifo.drain_on_start = false;
    config
}

/// Poll until the client has recorded `count` notifications
pub async fn wait_for_sent(client: &RecordingClient, count: usize) {
    let deadline = Instant::now() + TIMEOUT;
    while client.sent_count() < count {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {} notifications, got {}",
            count,
            client.sent_count()
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
