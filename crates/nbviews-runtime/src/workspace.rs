use crate::config::Config;
use crate::import::{self, ImportProgress, ImportSummary};
use crate::{Error, Result};
use nbviews_engine::NotebookViews;
use nbviews_index::{Database, NotebookSummary, NotebookViewsStore, ViewExtensionStore};
use nbviews_types::{ViewId, is_64_char_hex};
use std::path::{Path, PathBuf};

/// Views of one notebook, backed by the workspace database
pub type NotebookWorkspace<'db> = NotebookViews<NotebookViewsStore<'db>>;

/// Data directory with the notebook index and the user configuration
pub struct Workspace {
    data_dir: PathBuf,
    db: Database,
    config: Config,
}

impl Workspace {
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        let db_path = data_dir.join("nbviews.db");
        let config_path = Config::path_in(&data_dir);

        let db = Database::open(&db_path)?;
        let config = if config_path.exists() {
            Config::load_from(&config_path)?
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            config
        };

        tracing::debug!(data_dir = %data_dir.display(), "opened workspace");
        Ok(Self {
            data_dir,
            db,
            config,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn import<F>(&self, path: &Path, on_progress: F) -> Result<ImportSummary>
    where
        F: FnMut(ImportProgress),
    {
        import::import_path(&self.db, path, on_progress)
    }

    pub fn notebooks(&self) -> Result<Vec<NotebookSummary>> {
        Ok(self.db.list_notebooks()?)
    }

    /// Resolve a full notebook id or a unique prefix of one
    pub fn resolve_notebook_id(&self, reference: &str) -> Result<String> {
        if is_64_char_hex(reference) {
            return self
                .db
                .get_notebook(reference)?
                .map(|record| record.id)
                .ok_or_else(|| Error::NotFound(format!("notebook '{}'", reference)));
        }
        match self.db.find_notebook_by_prefix(reference) {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(Error::NotFound(format!("notebook '{}'", reference))),
            Err(nbviews_index::Error::Query(msg)) => Err(Error::Ambiguous(msg)),
            Err(err) => Err(err.into()),
        }
    }

    /// Open all views of a notebook. Every persisted view is loaded.
    pub fn open_notebook(&self, reference: &str) -> Result<NotebookWorkspace<'_>> {
        let id = self.resolve_notebook_id(reference)?;
        let notebook = self
            .db
            .load_notebook(&id)?
            .ok_or_else(|| Error::NotFound(format!("notebook '{}'", reference)))?;

        let store = NotebookViewsStore::open(&self.db, &id)?;
        let mut views = NotebookViews::new(notebook, store, self.config.views.clone());
        views.load_all()?;
        Ok(views)
    }

    pub fn remove_notebook(&self, reference: &str) -> Result<()> {
        let id = self.resolve_notebook_id(reference)?;
        self.db.delete_notebook(&id)?;
        tracing::info!(notebook = %id, "removed notebook");
        Ok(())
    }
}

/// Resolve a view by full guid, exact name or unique guid prefix, in that
/// order
pub fn resolve_view<S: ViewExtensionStore>(
    views: &NotebookViews<S>,
    reference: &str,
) -> Result<ViewId> {
    let records = views.views();

    if let Ok(guid) = reference.parse::<ViewId>()
        && records.iter().any(|v| v.guid == guid)
    {
        return Ok(guid);
    }

    if let Some(record) = records.iter().find(|v| v.name == reference) {
        return Ok(record.guid);
    }

    let prefix = reference.to_ascii_lowercase();
    let matches: Vec<ViewId> = if prefix.is_empty() {
        Vec::new()
    } else {
        records
            .iter()
            .filter(|v| v.guid.to_string().starts_with(&prefix))
            .map(|v| v.guid)
            .collect()
    };

    match matches.as_slice() {
        [guid] => Ok(*guid),
        [] => Err(Error::NotFound(format!("view '{}'", reference))),
        _ => Err(Error::Ambiguous(format!(
            "view prefix '{}' matches {} views",
            reference,
            matches.len()
        ))),
    }
}
