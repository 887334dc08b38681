use nbviews_types::{CellId, ViewId};
use std::fmt;

use crate::view::ViewState;

/// Result type for nbviews-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the layout engine
#[derive(Debug)]
pub enum Error {
    /// Another view of the same notebook already uses this name
    ViewNameTaken { name: String },

    /// View names must contain at least one non-whitespace character
    InvalidViewName(String),

    /// Operation not allowed in the view's current state
    InvalidState {
        view: ViewId,
        state: ViewState,
        operation: &'static str,
    },

    /// No view with this guid is registered for the notebook
    ViewNotFound(ViewId),

    /// The cell is not part of the notebook
    CellNotFound(CellId),

    /// Error raised by the view store, passed through as-is
    Store(nbviews_index::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ViewNameTaken { name } => {
                write!(f, "A view named '{}' already exists in this notebook", name)
            }
            Error::InvalidViewName(name) => write!(f, "Invalid view name: '{}'", name),
            Error::InvalidState {
                view,
                state,
                operation,
            } => write!(
                f,
                "Cannot {} view {}: view is {}",
                operation,
                view.short(),
                state
            ),
            Error::ViewNotFound(guid) => write!(f, "View not found: {}", guid),
            Error::CellNotFound(cell) => write!(f, "Cell not found: {}", cell),
            Error::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<nbviews_index::Error> for Error {
    fn from(err: nbviews_index::Error) -> Self {
        Error::Store(err)
    }
}
