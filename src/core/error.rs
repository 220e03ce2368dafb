// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An event was rejected because it is invalid in the current state.
    ///
    /// Examples:
    /// - start while already running
    /// - pause while idle
    /// - reset with nothing to reset
    InvalidState(StateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    AlreadyRunning,
    NotRunning,
    NothingToReset,
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidState(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadyRunning =>
                write!(f, "already running"),
            StateError::NotRunning =>
                write!(f, "not running"),
            StateError::NothingToReset =>
                write!(f, "nothing to reset"),
        }
    }
}

impl std::error::Error for Error {}
