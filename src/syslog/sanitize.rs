//! Markup neutralization and bounded copying of notification text

use crate::config::MarkupMode;

/// Capability a notification server advertises when it renders markup in
/// notification bodies
pub const BODY_MARKUP_CAPABILITY: &str = "body-markup";

/// Whether `<`, `>` and `&` have to be turned into entities
///
/// Resolved once at startup from the server's capability list; the server is
/// assumed not to change its capabilities while the daemon runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupFilter {
    Escape,
    PassThrough,
}

impl MarkupFilter {
    /// Decide the filter from the configured mode and the server capabilities
    ///
    /// In `auto` mode text reaches a markup-capable server unmodified and
    /// is escaped for every other server.
    pub fn resolve<S: AsRef<str>>(mode: MarkupMode, capabilities: &[S]) -> Self {
        let renders_markup = capabilities
            .iter()
            .any(|cap| cap.as_ref() == BODY_MARKUP_CAPABILITY);

        match mode {
            MarkupMode::Escape => Self::Escape,
            MarkupMode::Raw => Self::PassThrough,
            MarkupMode::Auto if renders_markup => Self::PassThrough,
            MarkupMode::Auto => Self::Escape,
            MarkupMode::EscapeForMarkup if renders_markup => Self::Escape,
            MarkupMode::EscapeForMarkup => Self::PassThrough,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Escape
    }
}

/// Copies text into a bounded destination, escaping markup when required
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    filter: MarkupFilter,
    capacity: usize,
}

impl Sanitizer {
    /// `capacity` is the maximum output size in bytes
    pub fn new(filter: MarkupFilter, capacity: usize) -> Self {
        Self { filter, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Produce the sanitized form of `input`
    ///
    /// Output stops at the first character (or entity) that would push it
    /// past the capacity. A partially fitting entity is dropped entirely and
    /// multi-byte characters are never split.
    pub fn sanitize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len().min(self.capacity));
        let mut utf8 = [0u8; 4];

        for ch in input.chars() {
            let piece: &str = match (self.filter, ch) {
                (MarkupFilter::Escape, '<') => "&lt;",
                (MarkupFilter::Escape, '>') => "&gt;",
                (MarkupFilter::Escape, '&') => "&amp;",
                _ => ch.encode_utf8(&mut utf8),
            };

            if out.len() + piece.len() > self.capacity {
                break;
            }
            out.push_str(piece);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaping(capacity: usize) -> Sanitizer {
        Sanitizer::new(MarkupFilter::Escape, capacity)
    }

    fn raw(capacity: usize) -> Sanitizer {
        Sanitizer::new(MarkupFilter::PassThrough, capacity)
    }

    #[test]
    fn test_entities_when_filtering() {
        assert_eq!(escaping(4096).sanitize("a<b>c&d"), "a&lt;b&gt;c&amp;d");
    }

    #[test]
    fn test_pass_through_when_not_filtering() {
        assert_eq!(raw(4096).sanitize("a<b>c&d"), "a<b>c&d");
    }

    #[test]
    fn test_plain_copy_truncates_at_capacity() {
        assert_eq!(raw(5).sanitize("abcdefgh"), "abcde");
    }

    #[test]
    fn test_partial_entity_is_abandoned() {
        // "ab" fits, "&amp;" would need 7 bytes in total
        assert_eq!(escaping(6).sanitize("ab&cd"), "ab");
        assert_eq!(escaping(7).sanitize("ab&cd"), "ab&amp;");
    }

    #[test]
    fn test_output_never_exceeds_capacity() {
        let input = "<&>".repeat(100) + &"x".repeat(50) + "ünïcödé";
        for capacity in 0..64 {
            for sanitizer in [escaping(capacity), raw(capacity)] {
                let out = sanitizer.sanitize(&input);
                assert!(
                    out.len() <= capacity,
                    "capacity {} produced {} bytes",
                    capacity,
                    out.len()
                );
            }
        }
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        // 'é' is two bytes; only one byte of room is left after "ab"
        assert_eq!(raw(3).sanitize("abé"), "ab");
    }

    #[test]
    fn test_sanitize_is_repeatable() {
        let sanitizer = escaping(32);
        let input = "disk <sda> & friends are failing";
        assert_eq!(sanitizer.sanitize(input), sanitizer.sanitize(input));
    }

    #[test]
    fn test_resolve_auto_passes_through_for_markup_servers() {
        let with_markup = ["actions", "body", "body-markup"];
        let without_markup = ["actions", "body"];

        let filter = MarkupFilter::resolve(MarkupMode::Auto, &with_markup);
        assert_eq!(filter, MarkupFilter::PassThrough);
        assert_eq!(Sanitizer::new(filter, 4096).sanitize("a<b>c&d"), "a<b>c&d");

        let filter = MarkupFilter::resolve(MarkupMode::Auto, &without_markup);
        assert_eq!(filter, MarkupFilter::Escape);
        assert_eq!(
            Sanitizer::new(filter, 4096).sanitize("a<b>c&d"),
            "a&lt;b&gt;c&amp;d"
        );
    }

    #[test]
    fn test_resolve_escape_for_markup_inverts_auto() {
        assert_eq!(
            MarkupFilter::resolve(MarkupMode::EscapeForMarkup, &["body", "body-markup"]),
            MarkupFilter::Escape
        );
        assert_eq!(
            MarkupFilter::resolve(MarkupMode::EscapeForMarkup, &["body"]),
            MarkupFilter::PassThrough
        );
    }

    #[test]
    fn test_resolve_requires_exact_capability_name() {
        assert_eq!(
            MarkupFilter::resolve(MarkupMode::Auto, &["body-markup-extra", "body-hyperlinks"]),
            MarkupFilter::Escape
        );
    }

    #[test]
    fn test_resolve_explicit_modes_ignore_capabilities() {
        let none: [&str; 0] = [];
        assert!(MarkupFilter::resolve(MarkupMode::Escape, &none).is_active());
        assert!(!MarkupFilter::resolve(MarkupMode::Raw, &["body-markup"]).is_active());
    }
}
