use serde::{Deserialize, Serialize};

/// Notebook metadata record from the index database.
///
/// The cell list itself lives in the `cells` table and is loaded separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookRecord {
    /// Notebook identifier (hash of the source path).
    pub id: String,
    /// Display title, usually the file stem.
    pub title: String,
    /// Path the notebook was imported from, if any.
    pub source_path: Option<String>,
    /// Last import time (RFC 3339).
    pub imported_at: Option<String>,
}

/// Lightweight notebook summary for list operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookSummary {
    pub id: String,
    pub title: String,
    pub source_path: Option<String>,
    pub imported_at: Option<String>,
    pub cell_count: usize,
    pub view_count: usize,
}
