//! Syslog stream handling
//!
//! This module provides:
//! - Line reassembly across partial pipe reads
//! - Syslog line parsing into tag and message
//! - Markup sanitizing bounded by the configured message size
//! - Flood detection and combining

pub mod flood;
pub mod parser;
pub mod processor;
pub mod reassembler;
pub mod sanitize;

pub use processor::{BufferProcessor, LineEvent};
pub use reassembler::LineBuffer;
pub use sanitize::{MarkupFilter, Sanitizer};

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed reads through the buffer the way the read loop does
    fn run_reads(reads: &[&[u8]], capacity: usize) -> Vec<Vec<LineEvent>> {
        let mut buffer = LineBuffer::new(capacity);
        let mut processor = BufferProcessor::new(
            "syslog-notify",
            None,
            Sanitizer::new(MarkupFilter::PassThrough, capacity),
        );

        reads
            .iter()
            .map(|read| {
                buffer.extend(read).unwrap();
                let region = buffer.complete_region();
                let consumed = region.len();
                let events = processor.process(region);
                buffer.consume(consumed);
                events
            })
            .collect()
    }

    #[test]
    fn test_line_split_across_reads_is_reassembled() {
        let passes = run_reads(
            &[
                b"Nov 29 10:15:01 host cron: first\nNov 29 10:15:02 host cr",
                b"on: second\n",
            ],
            4096,
        );

        assert_eq!(passes[0].len(), 1);
        assert_eq!(passes[0][0].message, "first");
        assert_eq!(passes[1].len(), 1);
        assert_eq!(passes[1][0].title, "cron");
        assert_eq!(passes[1][0].message, "second");
    }

    #[test]
    fn test_fragment_without_newline_dispatches_nothing() {
        let passes = run_reads(&[b"Nov 29 10:15:01 host app: half", b" done\n"], 4096);
        assert!(passes[0].is_empty());
        assert_eq!(passes[1][0].message, "half done");
    }

    #[test]
    fn test_more_input_than_one_buffer() {
        // Mirrors a writer that pushes more than one pipe buffer at once
        let line = |i: usize| {
            format!(
                "Jan  1 00:00:00 test cram_buffer.py: This is a message to fill the buffer, number {:03}\n",
                i
            )
        };
        let stream: String = (0..8).map(line).collect();
        let capacity = 256;

        let mut buffer = LineBuffer::new(capacity);
        let mut processor = BufferProcessor::new(
            "syslog-notify",
            None,
            Sanitizer::new(MarkupFilter::PassThrough, capacity),
        );
        let mut events = Vec::new();
        let mut input = stream.as_bytes();

        while !input.is_empty() {
            let take = buffer.spare_capacity().min(input.len());
            buffer.extend(&input[..take]).unwrap();
            input = &input[take..];

            let region = buffer.complete_region();
            let consumed = region.len();
            events.extend(processor.process(region));
            buffer.consume(consumed);
        }

        assert_eq!(events.len(), 8);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.title, "cram_buffer.py");
            assert!(event.message.ends_with(&format!("number {:03}", i)));
        }
    }
}
