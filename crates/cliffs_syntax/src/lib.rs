//! Grammar definitions for cliffs.
//!
//! This crate turns a definition string like
//! `set [loud] alarm at <time: int> (am|pm)` into an immutable syntax tree
//! that the matcher walks against a command call.
//!
//! # Architecture
//!
//! ```text
//! "go [quickly] <dir>"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   LEXER         │  → [Symbol(go), '[', Symbol(quickly), ']', '<', Symbol(dir), '>']
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   COMPILER      │  → Sequence [Literal go, Optional [Literal quickly], Parameter dir]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   SIMPLIFY      │  → redundant single-child groups removed (configurable)
//! └─────────────────┘
//! ```
//!
//! # Definition language
//!
//! | Form            | Meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `word`          | literal, case-sensitive                              |
//! | `word^`         | literal, case-insensitive                            |
//! | `<name>`        | parameter bound as a raw string                      |
//! | `<name: type>`  | parameter coerced with a registered type             |
//! | `<name...>`     | tail: the rest of the call, raw                      |
//! | `[ ... ]`       | optional group                                       |
//! | `( a \| b )`    | variant group                                        |
//! | `a \| b`        | variant at the top of a definition or optional group |
//! | `[ ... ]:id`    | optional group bound under `id`                      |
//! | `( ... ):id`    | variant group bound under `id`                       |
//!
//! # Modules
//!
//! - [`lexer`] - Split a definition into symbols and punctuation
//! - [`tree`] - Syntax tree nodes, traversal, and rendering
//! - [`compiler`] - Build syntax trees from definitions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compiler;
pub mod lexer;
pub mod tree;

pub use compiler::{CompilerConfig, SimplifyMode, SyntaxCompiler, compile};
pub use lexer::{SyntaxLexer, SyntaxToken, SyntaxTokenKind};
pub use tree::{Literal, Node, Optional, Parameter, Sequence, Tail, Variant};
