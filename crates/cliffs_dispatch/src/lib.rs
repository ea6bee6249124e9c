//! Command dispatch for cliffs.
//!
//! Pairs compiled syntaxes with callbacks, dispatches calls to the best
//! matching command, and generates usage help.
//!
//! ```text
//! let mut dispatcher = CommandDispatcher::default();
//! dispatcher.command("greet <name>", |m| format!("hello {}", m.get_str("name").unwrap_or("?")))?;
//! dispatcher.dispatch("greet world")  // → Ok("hello world")
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod usage;

pub use command::{Callback, Command};
pub use dispatcher::CommandDispatcher;
pub use error::DispatchError;
pub use usage::UsageOptions;
