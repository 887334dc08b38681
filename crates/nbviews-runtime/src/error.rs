use std::fmt;
use std::path::PathBuf;

/// Result type for nbviews-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Database/index layer error
    Index(nbviews_index::Error),

    /// Layout engine error
    Engine(nbviews_engine::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// A notebook file could not be read as nbformat JSON
    Import { path: PathBuf, message: String },

    /// No notebook or view matches the given reference
    NotFound(String),

    /// The reference matches more than one notebook or view
    Ambiguous(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::Engine(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Import { path, message } => {
                write!(f, "Failed to import {}: {}", path.display(), message)
            }
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Ambiguous(msg) => write!(f, "Ambiguous reference: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Engine(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::Import { .. } | Error::NotFound(_) | Error::Ambiguous(_) => {
                None
            }
        }
    }
}

impl From<nbviews_index::Error> for Error {
    fn from(err: nbviews_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<nbviews_engine::Error> for Error {
    fn from(err: nbviews_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
