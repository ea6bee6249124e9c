//! Integration tests for the cliffs_matcher crate.
//!
//! Tests for matching calls against compiled syntaxes:
//! - Literal, parameter and tail matching with scores
//! - Optional and variant groups
//! - Typed parameters and custom types
//! - Best-match selection across candidates
//! - Structural errors
//! - Serialized tokens and bound values

mod best_match_tests;
mod call_matching_tests;
mod serialization_tests;
mod type_tests;
