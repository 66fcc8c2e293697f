//! Error types for the protocol front end.

use std::fmt;
use std::io;

/// Error type for option writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// No option is registered under this name
    NoSuchOption { name: String },
    /// The value does not fit the option's type or bounds
    InvalidValue { name: String, value: String },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::NoSuchOption { name } => write!(f, "No such option: {name}"),
            OptionError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for OptionError {}

/// Error type for the command loop and the batch driver
#[derive(Debug)]
pub enum UciError {
    /// Reading commands or descriptors failed
    Io(io::Error),
    /// The search worker thread could not be started
    SpawnSearch(io::Error),
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::Io(e) => write!(f, "I/O error: {e}"),
            UciError::SpawnSearch(e) => write!(f, "Failed to start search thread: {e}"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::Io(e) | UciError::SpawnSearch(e) => Some(e),
        }
    }
}

impl From<io::Error> for UciError {
    fn from(e: io::Error) -> Self {
        UciError::Io(e)
    }
}
