//! Request normalization
//!
//! Every check compares against the canonical form produced here, never
//! against the raw text the user typed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower-cased, whitespace-collapsed form of a raw request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRequest(String);

impl NormalizedRequest {
    /// Normalize raw request text
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of whitespace-delimited tokens
    pub fn token_count(&self) -> usize {
        self.0.split(' ').filter(|t| !t.is_empty()).count()
    }
}

impl AsRef<str> for NormalizedRequest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-case `text` and collapse every whitespace run to a single space.
///
/// Leading and trailing whitespace is dropped. Total and idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unicode whitespace plus the ASCII information separators (U+001C to
/// U+001F), which text splitters commonly treat as blanks too
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
