use crate::{Error, Result};
use nbviews_index::{Database, NotebookRecord};
use nbviews_types::{Cell, CellId, CellKind, Notebook, normalize_path, notebook_id_from_path};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub enum ImportProgress {
    Scanning { root: PathBuf },
    Imported { path: PathBuf, notebook_id: String, cells: usize },
    Skipped { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub imported: Vec<String>,
    pub skipped: usize,
}

// Only the parts of nbformat 4 the views need
#[derive(Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Vec<RawCell>,
    #[serde(default)]
    metadata: serde_json::Value,
}

#[derive(Deserialize)]
struct RawCell {
    cell_type: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    source: RawSource,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for RawSource {
    fn default() -> Self {
        RawSource::Text(String::new())
    }
}

impl RawSource {
    fn into_text(self) -> String {
        match self {
            RawSource::Text(text) => text,
            RawSource::Lines(lines) => lines.concat(),
        }
    }
}

/// Read an `.ipynb` file into a [`Notebook`].
///
/// Cells keep their nbformat `id` when present; cells without one (or with
/// a duplicate) are named after their position, `cell-<index>`, or
/// `cell-<index>-<n>` when an earlier cell already uses that name.
pub fn parse_notebook(path: &Path) -> Result<Notebook> {
    let content = std::fs::read_to_string(path)?;
    let raw: RawNotebook = serde_json::from_str(&content).map_err(|e| Error::Import {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut seen = HashSet::new();
    let mut cells = Vec::with_capacity(raw.cells.len());
    for (index, raw_cell) in raw.cells.into_iter().enumerate() {
        let id = raw_cell
            .id
            .and_then(|id| CellId::new(id).ok())
            .filter(|id| !seen.contains(id))
            .unwrap_or_else(|| free_positional_id(&seen, index));
        seen.insert(id.clone());

        cells.push(Cell::new(
            id,
            CellKind::from_cell_type(&raw_cell.cell_type),
            raw_cell.source.into_text(),
        ));
    }

    let title = raw
        .metadata
        .get("title")
        .and_then(|t| t.as_str())
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "untitled".to_string());

    Ok(Notebook::new(notebook_id_from_path(path), title, cells))
}

fn free_positional_id(seen: &HashSet<CellId>, index: usize) -> CellId {
    let id = CellId::positional(index);
    if !seen.contains(&id) {
        return id;
    }
    (1..)
        .map(|n| CellId::positional_suffixed(index, n))
        .find(|id| !seen.contains(id))
        .unwrap_or(id)
}

/// Import one notebook file, or every `.ipynb` file below a directory.
///
/// Re-importing a notebook replaces its cells. Views and the records of
/// cells that still exist are kept.
pub fn import_path<F>(db: &Database, path: &Path, mut on_progress: F) -> Result<ImportSummary>
where
    F: FnMut(ImportProgress),
{
    let mut summary = ImportSummary::default();

    if path.is_file() {
        let (notebook_id, cells) = import_file(db, path)?;
        on_progress(ImportProgress::Imported {
            path: path.to_path_buf(),
            notebook_id: notebook_id.clone(),
            cells,
        });
        summary.imported.push(notebook_id);
        return Ok(summary);
    }

    if !path.is_dir() {
        return Err(Error::NotFound(format!("{}", path.display())));
    }

    on_progress(ImportProgress::Scanning {
        root: path.to_path_buf(),
    });

    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_checkpoint_dir(e.path()))
        .filter_map(|e| e.ok())
    {
        let file = entry.path();
        if !entry.file_type().is_file() || file.extension().is_none_or(|ext| ext != "ipynb") {
            continue;
        }

        match import_file(db, file) {
            Ok((notebook_id, cells)) => {
                on_progress(ImportProgress::Imported {
                    path: file.to_path_buf(),
                    notebook_id: notebook_id.clone(),
                    cells,
                });
                summary.imported.push(notebook_id);
            }
            // A broken notebook in a tree must not abort the whole import
            Err(err @ Error::Import { .. }) => {
                tracing::warn!(path = %file.display(), error = %err, "skipping notebook");
                on_progress(ImportProgress::Skipped {
                    path: file.to_path_buf(),
                    reason: err.to_string(),
                });
                summary.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

fn import_file(db: &Database, path: &Path) -> Result<(String, usize)> {
    let canonical = normalize_path(path);
    let notebook = parse_notebook(&canonical)?;

    let record = NotebookRecord {
        id: notebook.id.clone(),
        title: notebook.title.clone(),
        source_path: Some(canonical.to_string_lossy().into_owned()),
        imported_at: Some(chrono::Utc::now().to_rfc3339()),
    };
    db.import_notebook(&record, &notebook.cells)?;

    tracing::info!(
        notebook = %notebook.id,
        path = %canonical.display(),
        cells = notebook.cells.len(),
        "imported notebook"
    );
    Ok((notebook.id, notebook.cells.len()))
}

fn is_checkpoint_dir(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == ".ipynb_checkpoints")
}
