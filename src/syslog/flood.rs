//! Flood detection and message combining
//!
//! When a single read delivers many lines at once (a service restart loop,
//! a noisy kernel driver), showing one popup per line buries the desktop.
//! Reads at or above the threshold are folded into one notification instead.

/// Count the lines a region will produce
pub fn count_lines(region: &[u8]) -> usize {
    if region.is_empty() {
        return 0;
    }
    let terminated = region.iter().filter(|&&b| b == b'\n').count();
    if region.ends_with(b"\n") {
        terminated
    } else {
        // force-flushed region without a terminator
        terminated + 1
    }
}

/// Whether a read of `line_count` lines must be combined
pub fn is_flood(threshold: Option<usize>, line_count: usize) -> bool {
    matches!(threshold, Some(limit) if line_count >= limit)
}

/// Bounded buffer of `"title: message\n"` fragments
///
/// The accumulated text always stays strictly shorter than the capacity.
/// Pieces that do not fit are dropped; whatever was accumulated before is
/// never touched.
#[derive(Debug, Clone)]
pub struct FloodAccumulator {
    text: String,
    capacity: usize,
}

impl FloodAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            capacity,
        }
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }

    /// Append one fragment, piece by piece
    ///
    /// Returns false when any part of the fragment had to be dropped.
    pub fn push(&mut self, title: &str, message: &str) -> bool {
        for piece in [title, ": ", message, "\n"] {
            if !self.try_append(piece) {
                return false;
            }
        }
        true
    }

    fn try_append(&mut self, piece: &str) -> bool {
        if self.text.len() + piece.len() < self.capacity {
            self.text.push_str(piece);
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn as_str(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}
