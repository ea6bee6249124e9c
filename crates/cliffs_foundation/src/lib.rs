//! Core types, values, and error taxonomy for cliffs.
//!
//! This crate provides:
//! - [`Span`] - Byte ranges into a raw call or grammar definition
//! - [`Token`] - A position-tagged piece of a command call
//! - [`Value`] - The coerced value bound to a parameter
//! - [`Error`] - Structural errors (broken grammar or matcher setup)
//! - [`MatchFail`] - Soft mismatches (input does not fit a shape)
//! - [`MatchError`] - Either of the two, for `?` propagation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod span;
pub mod token;
pub mod value;

pub use error::{Error, ErrorKind, FailReason, MatchError, MatchFail, Rejection};
pub use span::Span;
pub use token::Token;
pub use value::Value;

/// Result type for operations that can only fail structurally.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for matching operations (soft or structural failure).
pub type MatchResult<T> = std::result::Result<T, MatchError>;
