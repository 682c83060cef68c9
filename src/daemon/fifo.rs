//! Named pipe input
//!
//! The FIFO is opened for reading *and* writing. Holding a write end keeps
//! reads from returning EOF every time the syslog writer closes and
//! reopens the pipe.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read};
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tokio::net::unix::pipe;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// A freshly opened FIFO that may still hold stale messages
pub struct FifoSource {
    path: PathBuf,
    file: File,
}

impl FifoSource {
    /// Open the FIFO without blocking
    pub fn open(path: &Path) -> AppResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|e| AppError::fifo_open(path, e))?;

        let is_fifo = file
            .metadata()
            .map_err(|e| AppError::fifo_open(path, e))?
            .file_type()
            .is_fifo();
        if !is_fifo {
            return Err(AppError::fifo_open(
                path,
                std::io::Error::new(ErrorKind::InvalidInput, "not a named pipe"),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discard everything queued before the daemon started
    ///
    /// Returns the number of bytes thrown away.
    pub fn drain(&mut self, chunk_size: usize) -> AppResult<usize> {
        let mut scratch = vec![0u8; chunk_size.max(1)];
        let mut total = 0;

        loop {
            match self.file.read(&mut scratch) {
                Ok(0) => return Ok(total),
                Ok(n) => {
                    debug!("Discarding stale input: {}", String::from_utf8_lossy(&scratch[..n]).trim_end());
                    total += n;
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(total),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(AppError::fifo_drain(&self.path, e)),
            }
        }
    }

    /// Register the pipe with the tokio reactor for awaited reads
    pub fn into_reader(self) -> AppResult<FifoReader> {
        let receiver =
            pipe::Receiver::from_file(self.file).map_err(|e| AppError::fifo_open(&self.path, e))?;
        Ok(FifoReader {
            path: self.path,
            receiver,
        })
    }
}

/// Async reader over an opened FIFO
pub struct FifoReader {
    path: PathBuf,
    receiver: pipe::Receiver,
}

impl FifoReader {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for data; returns 0 only when no writer is attached
    pub async fn read(&mut self, buf: &mut [u8]) -> AppResult<usize> {
        self.receiver
            .read(buf)
            .await
            .map_err(|e| AppError::fifo_read(&self.path, e))
    }
}
