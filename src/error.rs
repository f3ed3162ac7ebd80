// error.rs

use std::fmt;
use std::io;
use thiserror::Error;

/// What was being done to the terminal when access failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    Restore,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => f.write_str("reading"),
            Action::Write => f.write_str("setting"),
            Action::Restore => f.write_str("restoring"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal attribute access failed while {action} attributes: {source}")]
    Attributes {
        action: Action,
        #[source]
        source: io::Error,
    },
}

impl TerminalError {
    pub fn action(&self) -> Action {
        match self {
            TerminalError::Attributes { action, .. } => *action,
        }
    }
}
