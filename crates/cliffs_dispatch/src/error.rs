//! Dispatch errors.

use cliffs_foundation::{Error, MatchFail};
use thiserror::Error;

/// Why a call could not be dispatched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The call resembles a command but does not fit it. Carries the
    /// mismatch of the command that got furthest.
    #[error(transparent)]
    Mismatch(#[from] MatchFail),

    /// The call does not resemble any command.
    #[error("unknown command")]
    UnknownCommand,

    /// A command's syntax or matcher setup is broken, or the call's quoting is.
    #[error(transparent)]
    Structural(#[from] Error),
}
