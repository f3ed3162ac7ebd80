//! Line history and scoped terminal modes for interactive prompts.
//!
//! [`History`] keeps previously entered lines behind a navigable cursor and
//! [`Mode`] runs a unit of work with echo suppressed or raw input engaged,
//! restoring the terminal afterwards.

pub mod config;
pub mod error;
pub mod history;
pub mod mode;
pub mod terminal;

pub use config::ReaderConfig;
pub use error::{Action, TerminalError};
pub use history::{History, HistoryOptions, DEFAULT_SIZE};
pub use mode::Mode;
pub use terminal::{TerminalDevice, Tty};
