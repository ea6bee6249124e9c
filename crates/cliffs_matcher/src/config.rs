//! Matcher configuration.

use crate::lexer::DEFAULT_QUOTES;

/// Configuration for a [`CallMatcher`](crate::CallMatcher).
#[derive(Clone, Debug, PartialEq)]
pub struct MatcherConfig {
    /// Whether literals compare case-sensitively.
    pub case_sensitive: bool,

    /// Deepest syntax tree nesting a match may walk.
    pub max_depth: usize,

    /// Jaro-Winkler similarity at or above which a mismatched token is
    /// reported as a likely misspelling of the expected literal.
    pub literal_threshold: f64,

    /// Characters that open and close quoted tokens in calls.
    pub quotes: Vec<char>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            max_depth: 64,
            literal_threshold: 0.75,
            quotes: DEFAULT_QUOTES.to_vec(),
        }
    }
}

impl MatcherConfig {
    /// Builder method to set case sensitivity.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Builder method to set the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder method to set the misspelling threshold.
    #[must_use]
    pub fn with_literal_threshold(mut self, literal_threshold: f64) -> Self {
        self.literal_threshold = literal_threshold;
        self
    }

    /// Builder method to set the quote characters.
    #[must_use]
    pub fn with_quotes(mut self, quotes: impl IntoIterator<Item = char>) -> Self {
        self.quotes = quotes.into_iter().collect();
        self
    }
}
