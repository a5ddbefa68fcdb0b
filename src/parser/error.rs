//! Error types for input parsing operations.

use thiserror::Error;

/// Maximum number of characters of a rejected line kept for display.
pub const MAX_LINE_PREVIEW: usize = 50;

/// Errors that can occur while parsing identifier lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line is not a hex identifier (optionally followed by `.glb`).
    #[error("invalid avatar identifier '{line_preview}'\n  Suggestion: {suggestion}")]
    InvalidIdentifier {
        /// Truncated line for display
        line_preview: String,
        /// How to fix the issue
        suggestion: &'static str,
    },
}

impl ParseError {
    /// Creates an `InvalidIdentifier` error for a rejected line.
    #[must_use]
    pub fn invalid_identifier(line: &str) -> Self {
        Self::InvalidIdentifier {
            line_preview: line.chars().take(MAX_LINE_PREVIEW).collect(),
            suggestion: "Use one hexadecimal avatar ID per line, optionally ending in .glb",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_identifier_display_contains_line() {
        let error = ParseError::invalid_identifier("not-hex!");
        let msg = error.to_string();
        assert!(msg.contains("not-hex!"), "Expected line in: {msg}");
        assert!(msg.contains("Suggestion"), "Expected suggestion in: {msg}");
    }

    #[test]
    fn test_invalid_identifier_truncates_long_lines() {
        let long_line = "z".repeat(200);
        let ParseError::InvalidIdentifier { line_preview, .. } =
            ParseError::invalid_identifier(&long_line);
        assert_eq!(line_preview.chars().count(), MAX_LINE_PREVIEW);
    }
}
