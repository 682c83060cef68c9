//! Line reassembly across pipe reads
//!
//! A FIFO read returns whatever the writer had flushed, which can end in the
//! middle of a line. [`LineBuffer`] keeps the unterminated tail and hands
//! only complete lines to the processor.

use crate::errors::{AppError, AppResult};

/// Bounded byte buffer holding input that has not been processed yet
#[derive(Debug, Clone)]
pub struct LineBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    /// How many bytes the next read may deliver
    pub fn spare_capacity(&self) -> usize {
        self.capacity - self.data.len()
    }

    #[cfg(test)]
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Append freshly read bytes after the carried-over tail
    pub fn extend(&mut self, bytes: &[u8]) -> AppResult<()> {
        if bytes.len() > self.spare_capacity() {
            return Err(AppError::internal(format!(
                "read of {} bytes exceeds the {} bytes left in the line buffer",
                bytes.len(),
                self.spare_capacity()
            )));
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Number of leading bytes that form complete lines
    ///
    /// This is everything up to and including the last `\n`. A full buffer
    /// without any terminator can never complete, so it is released whole
    /// and the oversized line gets cut at the buffer capacity.
    pub fn consumable_len(&self) -> usize {
        match self.data.iter().rposition(|&b| b == b'\n') {
            Some(last_newline) => last_newline + 1,
            None if self.is_full() => self.data.len(),
            None => 0,
        }
    }

    /// The bytes [`consumable_len`](Self::consumable_len) covers
    pub fn complete_region(&self) -> &[u8] {
        &self.data[..self.consumable_len()]
    }

    /// Drop a processed prefix, moving the remainder to the front
    pub fn consume(&mut self, count: usize) {
        let count = count.min(self.data.len());
        self.data.drain(..count);
    }
}
