use crate::CellId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Code,
    Markdown,
    Raw,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Code => "code",
            CellKind::Markdown => "markdown",
            CellKind::Raw => "raw",
        }
    }

    /// Parse an nbformat `cell_type`; unknown kinds are treated as raw
    pub fn from_cell_type(cell_type: &str) -> Self {
        match cell_type {
            "code" => CellKind::Code,
            "markdown" => CellKind::Markdown,
            _ => CellKind::Raw,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single unit of notebook content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub kind: CellKind,
    pub source: String,
}

impl Cell {
    pub fn new(id: CellId, kind: CellKind, source: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            source: source.into(),
        }
    }

    /// First non-empty line of the source, truncated for display
    pub fn snippet(&self, max_chars: usize) -> String {
        let line = self
            .source
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("");

        if line.chars().count() <= max_chars {
            line.to_string()
        } else {
            let truncated: String = line.chars().take(max_chars.saturating_sub(1)).collect();
            format!("{}…", truncated)
        }
    }
}

/// The ordered cell list of one notebook document
///
/// The layout engine reads this but never owns or reorders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: String,
    pub title: String,
    pub cells: Vec<Cell>,
}

impl Notebook {
    pub fn new(id: impl Into<String>, title: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            cells,
        }
    }

    /// Document index of a cell, used for default placement
    pub fn index_of(&self, id: &CellId) -> Option<usize> {
        self.cells.iter().position(|c| &c.id == id)
    }
}
