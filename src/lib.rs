//! cliffs - Command-line call matching
//!
//! This crate re-exports all layers of the cliffs system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: cliffs_dispatch    — Command registry, callback dispatch, usage help
//! Layer 2: cliffs_matcher     — Call tokenizer, type registry, scoring matcher
//! Layer 1: cliffs_syntax      — Grammar lexer, syntax trees, grammar compiler
//! Layer 0: cliffs_foundation  — Core types (Span, Token, Value, Error)
//! ```

pub use cliffs_dispatch as dispatch;
pub use cliffs_foundation as foundation;
pub use cliffs_matcher as matcher;
pub use cliffs_syntax as syntax;
