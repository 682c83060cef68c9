//! Syslog line splitting
//!
//! The parser is a heuristic, not a syslog grammar. It assumes the classic
//! BSD layout `Mon dd hh:mm:ss host tag: message` and only looks for the
//! first space after the fixed-width timestamp and the first colon after
//! that. Lines that do not fit are shown whole under the application name.
//! Structured (RFC 5424) lines, tags containing spaces and hostnames longer
//! than the timestamp slack are not recognized.

/// Width of the `Mon dd hh:mm:ss ` timestamp that starts every syslog line
pub const SYSLOG_PREFIX_LEN: usize = 16;

/// Title and message slices of one line
///
/// `title` is `None` when the line could not be split, in which case
/// `message` is the entire line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub title: Option<&'a [u8]>,
    pub message: &'a [u8],
}

impl<'a> ParsedLine<'a> {
    fn unparsed(line: &'a [u8]) -> Self {
        Self {
            title: None,
            message: line,
        }
    }
}

/// Split a single line (without its `\n`) into tag and message
pub fn parse_line(line: &[u8]) -> ParsedLine<'_> {
    if line.len() < SYSLOG_PREFIX_LEN {
        return ParsedLine::unparsed(line);
    }

    // Skip date, time and host name
    let after_prefix = &line[SYSLOG_PREFIX_LEN..];
    let tag_start = match after_prefix.iter().position(|&b| b == b' ') {
        Some(space) => SYSLOG_PREFIX_LEN + space + 1,
        None => return ParsedLine::unparsed(line),
    };

    let rest = &line[tag_start..];
    let colon = match rest.iter().position(|&b| b == b':') {
        Some(colon) => colon,
        None => return ParsedLine::unparsed(line),
    };

    let body = &rest[colon + 1..];
    let leading_spaces = body.iter().take_while(|&&b| b == b' ').count();

    ParsedLine {
        title: Some(&rest[..colon]),
        message: &body[leading_spaces..],
    }
}

/// Iterate over the lines of a region handed down by the reassembler
///
/// A trailing `\n` terminates the last line rather than starting an empty
/// one. A region without any `\n` is a single (force-flushed) line.
pub fn split_lines(region: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = region.strip_suffix(b"\n").unwrap_or(region);
    (!region.is_empty())
        .then(|| body.split(|&b| b == b'\n'))
        .into_iter()
        .flatten()
}
