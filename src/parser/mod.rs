//! Input parsing module for extracting avatar identifiers.
//!
//! The input format is one identifier per line. Lines may be quoted and may
//! carry a trailing `.glb` extension. Blank lines are ignored; anything else
//! that is not a hex identifier is counted as a bad line.
//!
//! # Example
//!
//! ```
//! use avatar_downloader::parser::parse_input;
//!
//! let result = parse_input("abc123.glb\n\nnot-hex!\n\"def456\"\n");
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.bad_lines, 1);
//! ```

mod error;
mod input;

pub use error::ParseError;
pub use input::{AvatarId, ParseResult};

use tracing::{debug, info};

/// Parses raw file contents into avatar identifiers.
///
/// Identifiers keep their input order. Rejected lines are counted, not
/// returned, and only surface individually at debug level.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn parse_input(input: &str) -> ParseResult {
    let mut result = ParseResult::new();

    for line in input.lines() {
        if input::is_blank(line) {
            continue;
        }
        match AvatarId::parse(line) {
            Ok(id) => result.ids.push(id),
            Err(e) => {
                debug!(error = %e, "skipping unrecognized line");
                result.bad_lines += 1;
            }
        }
    }

    info!(
        ids = result.len(),
        bad_lines = result.bad_lines,
        "Parsing complete"
    );

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_empty_returns_empty_result() {
        let result = parse_input("");
        assert!(result.is_empty());
        assert_eq!(result.bad_lines, 0);
    }

    #[test]
    fn test_parse_input_blank_lines_not_counted_as_bad() {
        let result = parse_input("  \n\t\n\n");
        assert!(result.is_empty());
        assert_eq!(result.bad_lines, 0);
    }

    #[test]
    fn test_parse_input_quote_only_lines_are_bad() {
        let result = parse_input("abc\n\"\"\n''\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result.bad_lines, 2);

        assert_eq!(parse_input("\"\"\n").bad_lines, 1);
    }

    #[test]
    fn test_parse_input_counts_bad_lines() {
        let result = parse_input("not-hex!\nabc123\nhello world\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result.bad_lines, 2);
    }

    #[test]
    fn test_parse_input_preserves_order_and_duplicates() {
        let result = parse_input("bbb\naaa.glb\nbbb\n");
        let ids: Vec<&str> = result.ids.iter().map(AvatarId::as_str).collect();
        assert_eq!(ids, vec!["bbb", "aaa", "bbb"]);
    }

    #[test]
    fn test_parse_input_handles_crlf_line_endings() {
        let result = parse_input("abc123\r\ndef456.glb\r\n");
        assert_eq!(result.len(), 2);
        assert_eq!(result.ids[1].as_str(), "def456");
    }
}
