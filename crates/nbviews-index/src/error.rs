use std::fmt;

/// Result type for nbviews-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the index layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// Stored value could not be decoded
    Decode(String),

    /// Invalid input or a reference to an unknown record
    Query(String),
}

// Missing tables or columns mean the file was written by an older layout
// of the index; opening it again rebuilds the tables at the current version.
fn is_stale_index(err: &rusqlite::Error) -> bool {
    let msg = err.to_string();
    msg.contains("no such table") || msg.contains("no such column")
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) if is_stale_index(err) => write!(
                f,
                "View index is out of date ({}); reopen it and re-import the notebook",
                err
            ),
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Query(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Decode(_) | Error::Query(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<nbviews_types::Error> for Error {
    fn from(err: nbviews_types::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
