//! Command call matching for cliffs.
//!
//! This crate matches raw command calls like `give apple --count 3` against
//! compiled syntax trees, binding typed parameter values and choosing
//! between ambiguous candidates by score.
//!
//! # Architecture
//!
//! ```text
//! "give apple --count 3"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   CALL LEXER    │  → ["give" 0..4, "apple" 5..10, "--count" 11..18, "3" 19..20]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   NODE MATCH    │  → each candidate tree walks the tokens on its own accumulator
//! │   (per tree)    │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   BEST MATCH    │  → highest score wins, ties go to the earliest candidate
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`lexer`] - Split calls into position-tagged tokens
//! - [`types`] - Named coercions for typed parameters
//! - [`call_match`] - Per-attempt accumulator and match outcome
//! - [`node`] - How each syntax node consumes tokens
//! - [`scoring`] - Score weights
//! - [`config`] - Matcher configuration
//! - [`matcher`] - Candidate orchestration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod call_match;
pub mod config;
pub mod lexer;
pub mod matcher;
pub mod node;
pub mod scoring;
pub mod types;

pub use call_match::{CallMatch, MatchOutcome};
pub use config::MatcherConfig;
pub use lexer::{CallLexer, tokenize};
pub use matcher::{Attempt, BestMatch, CallMatcher};
pub use node::MatchCall;
pub use scoring::{LITERAL_WEIGHT, PARAMETER_WEIGHT, TAIL_WEIGHT};
pub use types::{ArgError, Coercion, CoercionError, TypeRegistry, loose_bool};
