//! Call tokens.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::span::Span;

/// A token cut from a command call.
///
/// For quoted tokens `value` holds the unquoted contents while `span` still
/// covers the quotes, so `span.text(raw)` is the text exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// The token contents after quote and escape processing.
    pub value: String,
    /// Where the token sits in the raw call.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value: value.into(),
            span: Span::new(start, end),
        }
    }

    /// Byte offset where the token starts.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.span.start
    }

    /// Byte offset where the token ends (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.span.end
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}", self.value, self.span.start)
    }
}
