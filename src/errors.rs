use std::error::Error;
use std::fmt;

/// Errors at the ambient boundary around the core: config construction
/// and CLI/file I/O. The core itself (`TomasuloCore::step`) is
/// infallible, structural hazards, mispredicts, and division by zero
/// are modeled as events, not `Err` values.
#[derive(Debug)]
pub enum CoreError {
    InvalidConfig(String),
    Io(std::io::Error),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidConfig(msg) => write!(f, "invalid simulator configuration: {}", msg),
            CoreError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl Error for CoreError {}

impl From<std::io::Error> for CoreError {
    fn from(error: std::io::Error) -> Self {
        CoreError::Io(error)
    }
}
