//! Turns a region of complete lines into notification events
//!
//! This is the synchronous core of the daemon: line splitting, flood
//! detection, parsing and sanitizing. It never touches the pipe or the
//! notification service, so the same region always yields the same events.

use std::borrow::Cow;

use tracing::debug;

use super::flood::{count_lines, is_flood, FloodAccumulator};
use super::parser::{parse_line, split_lines};
use super::sanitize::{MarkupFilter, Sanitizer};
use crate::config::Config;

/// A sanitized title/message pair ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent {
    pub title: String,
    pub message: String,
}

pub struct BufferProcessor {
    app_name: String,
    flood_threshold: Option<usize>,
    sanitizer: Sanitizer,
    accumulator: FloodAccumulator,
}

impl BufferProcessor {
    pub fn new(app_name: impl Into<String>, flood_threshold: Option<usize>, sanitizer: Sanitizer) -> Self {
        Self {
            app_name: app_name.into(),
            flood_threshold,
            accumulator: FloodAccumulator::new(sanitizer.capacity()),
            sanitizer,
        }
    }

    pub fn from_config(config: &Config, filter: MarkupFilter) -> Self {
        Self::new(
            config.notify.app_name.clone(),
            config.flood.threshold(),
            Sanitizer::new(filter, config.daemon.max_message_size),
        )
    }

    pub fn flood_title(&self) -> String {
        format!("{} (flood)", self.app_name)
    }

    /// Process every line of `region`
    ///
    /// Returns one event per line, or a single combined event when the
    /// region reaches the flood threshold.
    pub fn process(&mut self, region: &[u8]) -> Vec<LineEvent> {
        let line_count = count_lines(region);
        if line_count == 0 {
            return Vec::new();
        }

        if !is_flood(self.flood_threshold, line_count) {
            return split_lines(region).map(|line| self.parse(line)).collect();
        }

        debug!("Flood detected: {} lines in one read", line_count);
        self.accumulator.reset();
        for line in split_lines(region) {
            let event = self.parse(line);
            if !self.accumulator.push(&event.title, &event.message) {
                debug!("Flood summary full, dropped part of '{}'", event.title);
            }
        }

        vec![LineEvent {
            title: self.flood_title(),
            message: self.accumulator.take(),
        }]
    }

    /// Parse and sanitize a single line
    pub fn parse(&self, line: &[u8]) -> LineEvent {
        let parsed = parse_line(line);
        let title = match parsed.title {
            Some(tag) => String::from_utf8_lossy(tag),
            None => Cow::Borrowed(self.app_name.as_str()),
        };
        let message = String::from_utf8_lossy(parsed.message);

        LineEvent {
            title: self.sanitizer.sanitize(&title),
            message: self.sanitizer.sanitize(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor(threshold: Option<usize>, filter: MarkupFilter) -> BufferProcessor {
        BufferProcessor::new("syslog-notify", threshold, Sanitizer::new(filter, 4096))
    }

    fn syslog(tag: &str, message: &str) -> String {
        format!("Nov 29 10:15:01 host {}: {}\n", tag, message)
    }

    #[test]
    fn test_each_line_becomes_an_event() {
        let mut p = processor(None, MarkupFilter::PassThrough);
        let region = syslog("kernel", "eth0 up") + &syslog("sshd", "accepted key");

        let events = p.process(region.as_bytes());
        assert_eq!(
            events,
            vec![
                LineEvent {
                    title: "kernel".into(),
                    message: "eth0 up".into()
                },
                LineEvent {
                    title: "sshd".into(),
                    message: "accepted key".into()
                },
            ]
        );
    }

    #[test]
    fn test_unparseable_line_uses_app_name() {
        let mut p = processor(None, MarkupFilter::PassThrough);
        let events = p.process(b"short line\n");
        assert_eq!(events[0].title, "syslog-notify");
        assert_eq!(events[0].message, "short line");
    }

    #[test]
    fn test_below_threshold_dispatches_individually() {
        let mut p = processor(Some(3), MarkupFilter::PassThrough);
        let region = syslog("a", "1") + &syslog("b", "2");
        assert_eq!(p.process(region.as_bytes()).len(), 2);
    }

    #[test]
    fn test_flood_combines_all_lines_in_order() {
        let mut p = processor(Some(3), MarkupFilter::PassThrough);
        let region: String = (0..5).map(|i| syslog("cron", &format!("job {}", i))).collect();

        let events = p.process(region.as_bytes());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "syslog-notify (flood)");
        assert_eq!(
            events[0].message,
            "cron: job 0\ncron: job 1\ncron: job 2\ncron: job 3\ncron: job 4\n"
        );
    }

    #[test]
    fn test_flood_summary_is_bounded() {
        let mut p = BufferProcessor::new(
            "syslog-notify",
            Some(2),
            Sanitizer::new(MarkupFilter::PassThrough, 64),
        );
        let region: String = (0..20).map(|i| syslog("tag", &format!("message {}", i))).collect();

        let events = p.process(region.as_bytes());
        assert_eq!(events.len(), 1);
        assert!(events[0].message.len() < 64);
        assert!(events[0].message.starts_with("tag: message 0\n"));
    }

    #[test]
    fn test_consecutive_floods_do_not_leak() {
        let mut p = processor(Some(2), MarkupFilter::PassThrough);
        let first = syslog("a", "1") + &syslog("a", "2");
        let second = syslog("b", "3") + &syslog("b", "4");

        p.process(first.as_bytes());
        let events = p.process(second.as_bytes());
        assert_eq!(events[0].message, "b: 3\nb: 4\n");
    }

    #[test]
    fn test_markup_is_escaped_in_both_fields() {
        let mut p = processor(None, MarkupFilter::Escape);
        let events = p.process(syslog("<tag>", "a<b>c&d").as_bytes());
        assert_eq!(events[0].title, "&lt;tag&gt;");
        assert_eq!(events[0].message, "a&lt;b&gt;c&amp;d");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut p = processor(None, MarkupFilter::PassThrough);
        let events = p.process(b"Nov 29 10:15:01 host app: bad \xff byte\n");
        assert_eq!(events[0].message, "bad \u{fffd} byte");
    }

    #[test]
    fn test_processing_is_idempotent() {
        let mut p = processor(Some(4), MarkupFilter::Escape);
        let region = syslog("x", "<1>") + &syslog("y", "&2");
        let first = p.process(region.as_bytes());
        let second = p.process(region.as_bytes());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_region_yields_nothing() {
        let mut p = processor(Some(1), MarkupFilter::PassThrough);
        assert!(p.process(b"").is_empty());
    }
}
