//! Types representing parsed avatar identifiers and results.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::ParseError;

/// Matches a bare hex identifier, optionally followed by the model extension.
#[allow(clippy::expect_used)]
static ID_OR_GLB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-fA-F0-9]+)(?:\.glb)?$").expect("identifier regex is valid") // Static pattern, safe to panic
});

/// Identifier of one avatar on the remote service.
///
/// Always a non-empty run of hex digits; case is preserved as written in the
/// input file. Only obtainable through [`AvatarId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarId(String);

impl AvatarId {
    /// Parses a single input line into an identifier.
    ///
    /// Surrounding whitespace and quote characters are stripped, and a trailing
    /// `.glb` suffix is removed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidIdentifier`] if what remains is not hex.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let cleaned = clean_line(line);
        ID_OR_GLB_PATTERN
            .captures(cleaned)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| ParseError::invalid_identifier(cleaned))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AvatarId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips whitespace, then any surrounding double or single quotes.
fn clean_line(line: &str) -> &str {
    line.trim().trim_matches('"').trim_matches('\'')
}

/// Returns true if the line is empty or whitespace only.
///
/// Quote characters count as content, so a line of bare quotes is a bad line.
pub(super) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Identifiers extracted from an input file.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Valid identifiers, in input order
    pub ids: Vec<AvatarId>,
    /// Number of non-blank lines that were rejected
    pub bad_lines: usize,
}

impl ParseResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of valid identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no valid identifier was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
