use std::fmt;

/// Result type for nbviews-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A view guid could not be parsed
    InvalidViewId(String),

    /// A cell id was empty or otherwise unusable
    InvalidCellId(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidViewId(raw) => write!(f, "Invalid view id: '{}'", raw),
            Error::InvalidCellId(raw) => write!(f, "Invalid cell id: '{}'", raw),
        }
    }
}

impl std::error::Error for Error {}
