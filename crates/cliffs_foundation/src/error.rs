//! Error types for cliffs.
//!
//! Matching fails in one of two distinguishable ways:
//!
//! - [`MatchFail`] is a *soft mismatch*: the input does not fit a shape. It is
//!   expected, and ancestors (optional groups, variant groups, the candidate
//!   loop) recover from it by trying something else.
//! - [`Error`] is a *structural error*: the grammar or the matcher setup is
//!   broken. Nothing recovers from it; it aborts the whole top-level call.
//!
//! [`MatchError`] carries either, so `?` propagates both through node code
//! while callers that recover can match on the `Mismatch` arm only.

use std::fmt;

use thiserror::Error;

use crate::span::Span;
use crate::token::Token;

/// A structural error: the grammar, the matcher configuration, or the
/// call's quoting is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Where in the grammar definition or call the error occurred, if known.
    pub span: Option<Span>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, span: None }
    }

    /// Attaches a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Creates an undefined type error.
    #[must_use]
    pub fn undefined_type(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedType(name.into()))
    }

    /// Creates an error for a node matched after a tail terminated the match.
    #[must_use]
    pub fn match_after_termination(node: &'static str) -> Self {
        Self::new(ErrorKind::MatchAfterTermination { node })
    }

    /// Creates a depth limit error.
    #[must_use]
    pub fn depth_exceeded(limit: usize) -> Self {
        Self::new(ErrorKind::DepthExceeded { limit })
    }

    /// Creates an unterminated quote error.
    #[must_use]
    pub fn unterminated_quote(quote: char, offset: usize) -> Self {
        Self::new(ErrorKind::UnterminatedQuote { quote, offset })
    }

    /// Creates a grammar definition syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax {
            message: message.into(),
        })
        .with_span(span)
    }
}

/// Categorized structural error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A parameter names a type that was never registered.
    #[error("undefined type {0:?}")]
    UndefinedType(String),

    /// A node was matched after a tail consumed the rest of the call.
    #[error("tried matching {node} after matching was terminated")]
    MatchAfterTermination {
        /// The kind of node that was matched.
        node: &'static str,
    },

    /// The syntax tree nests deeper than the matcher allows.
    #[error("syntax nesting exceeds the depth limit ({limit})")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// A quoted token in the call was never closed.
    #[error("unterminated quote {quote:?} at {offset}")]
    UnterminatedQuote {
        /// The opening quote character.
        quote: char,
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// The grammar definition string is malformed.
    #[error("syntax error: {message}")]
    Syntax {
        /// Description of the problem.
        message: String,
    },
}

/// A soft mismatch: the call does not fit a syntax shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}")]
pub struct MatchFail {
    /// Why the call did not fit.
    pub reason: FailReason,
}

impl MatchFail {
    /// Creates a mismatch with the given reason.
    #[must_use]
    pub fn new(reason: FailReason) -> Self {
        Self { reason }
    }

    /// Creates a mismatch for a missing or different literal.
    #[must_use]
    pub fn expected_literal(expected: impl Into<String>, found: Option<Token>, similar: bool) -> Self {
        Self::new(FailReason::ExpectedLiteral {
            expected: expected.into(),
            found,
            similar,
        })
    }

    /// Creates a mismatch for a parameter with no token left to consume.
    #[must_use]
    pub fn expected_argument(param: impl Into<String>) -> Self {
        Self::new(FailReason::ExpectedArgument {
            param: param.into(),
        })
    }

    /// Creates a mismatch for a token the parameter's type rejected.
    #[must_use]
    pub fn type_mismatch(
        param: impl Into<String>,
        typename: impl Into<String>,
        found: Token,
        cause: impl Into<String>,
    ) -> Self {
        Self::new(FailReason::TypeMismatch {
            param: param.into(),
            typename: typename.into(),
            found,
            cause: cause.into(),
        })
    }

    /// Creates a mismatch for a tail with nothing left to capture.
    #[must_use]
    pub fn expected_tail(name: impl Into<String>) -> Self {
        Self::new(FailReason::ExpectedTail { name: name.into() })
    }

    /// Creates a mismatch for leftover tokens after the syntax was exhausted.
    #[must_use]
    pub fn too_many_arguments(extra: Token, hint: Option<MatchFail>) -> Self {
        Self::new(FailReason::TooManyArguments {
            extra,
            hint: hint.map(Box::new),
        })
    }

    /// Returns the rejection of the candidate that progressed furthest, if this
    /// mismatch aggregates several candidates.
    ///
    /// Ties go to the earliest candidate.
    #[must_use]
    pub fn best_rejection(&self) -> Option<&Rejection> {
        match &self.reason {
            FailReason::NoCandidate { rejections } => furthest(rejections),
            _ => None,
        }
    }
}

/// Why a call did not fit a syntax shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FailReason {
    /// A literal was expected.
    ExpectedLiteral {
        /// The literal text.
        expected: String,
        /// The token found instead, if any were left.
        found: Option<Token>,
        /// Whether the found token looks like a misspelling of the literal.
        similar: bool,
    },
    /// A parameter had no token left to consume.
    ExpectedArgument {
        /// The parameter name.
        param: String,
    },
    /// A token could not be coerced to the parameter's type.
    TypeMismatch {
        /// The parameter name.
        param: String,
        /// The parameter's type name.
        typename: String,
        /// The rejected token.
        found: Token,
        /// The coercion's own explanation.
        cause: String,
    },
    /// A tail had nothing left to capture.
    ExpectedTail {
        /// The tail name.
        name: String,
    },
    /// No alternative of a variant group matched.
    NoVariant {
        /// The rendered alternatives, in declaration order.
        alternatives: Vec<String>,
        /// The first alternative's mismatch.
        first: Option<Box<MatchFail>>,
    },
    /// Tokens were left after the syntax was fully matched.
    TooManyArguments {
        /// The first leftover token.
        extra: Token,
        /// A mismatch swallowed by an optional group that may explain it.
        hint: Option<Box<MatchFail>>,
    },
    /// None of several candidate syntaxes matched.
    NoCandidate {
        /// One rejection per candidate, in declaration order.
        rejections: Vec<Rejection>,
    },
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedLiteral {
                expected,
                found,
                similar,
            } => {
                write!(f, "expected literal '{expected}'")?;
                if let Some(token) = found {
                    write!(f, ", got {token}")?;
                    if *similar {
                        write!(f, " (did you mean '{expected}'?)")?;
                    }
                }
                Ok(())
            }
            Self::ExpectedArgument { param } => {
                write!(f, "expected argument for parameter <{param}>")
            }
            Self::TypeMismatch {
                param,
                typename,
                found,
                cause,
            } => write!(
                f,
                "argument {found} for parameter <{param}> does not match type {typename}: {cause}"
            ),
            Self::ExpectedTail { name } => write!(f, "expected {name}..."),
            Self::NoVariant {
                alternatives,
                first,
            } => {
                write!(f, "expected one of: {}", alternatives.join(" | "))?;
                if let Some(fail) = first {
                    write!(f, " ({fail})")?;
                }
                Ok(())
            }
            Self::TooManyArguments { extra, hint } => {
                write!(f, "too many arguments, starting with {extra}")?;
                if let Some(hint) = hint {
                    write!(f, " ({hint})")?;
                }
                Ok(())
            }
            Self::NoCandidate { rejections } => match furthest(rejections) {
                Some(rejection) => write!(f, "{}", rejection.fail),
                None => write!(f, "no syntax to match against"),
            },
        }
    }
}

/// One candidate syntax's soft mismatch, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Index of the candidate in the list it was matched from.
    pub index: usize,
    /// Score the candidate reached before it failed.
    pub progress: f64,
    /// Why it failed.
    pub fail: MatchFail,
}

fn furthest(rejections: &[Rejection]) -> Option<&Rejection> {
    rejections.iter().fold(None, |best: Option<&Rejection>, r| match best {
        Some(b) if b.progress >= r.progress => Some(b),
        _ => Some(r),
    })
}

/// Either kind of matching failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// The input does not fit this shape; recoverable.
    #[error(transparent)]
    Mismatch(#[from] MatchFail),
    /// The grammar or matcher setup is broken; fatal to the call.
    #[error(transparent)]
    Structural(#[from] Error),
}

impl MatchError {
    /// Returns true for a soft mismatch.
    #[must_use]
    pub const fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }

    /// Returns true for a structural error.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }

    /// Returns the soft mismatch, if this is one.
    #[must_use]
    pub const fn as_mismatch(&self) -> Option<&MatchFail> {
        match self {
            Self::Mismatch(fail) => Some(fail),
            Self::Structural(_) => None,
        }
    }

    /// Returns the structural error, if this is one.
    #[must_use]
    pub const fn as_structural(&self) -> Option<&Error> {
        match self {
            Self::Structural(err) => Some(err),
            Self::Mismatch(_) => None,
        }
    }
}
