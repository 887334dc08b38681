use nbviews_types::{
    CellExtensionMetadata, CellId, CellMetadataDelta, CellViewMetadata, ViewId, ViewRecord,
};
use std::collections::HashMap;

use crate::{Database, Error, Result, store::ViewExtensionStore};

struct Backing<'db> {
    db: &'db Database,
    notebook_id: String,
}

/// [`ViewExtensionStore`] holding one notebook's view state in memory.
///
/// Opened from a [`Database`] it loads the committed state and writes it
/// back on commit; created with [`in_memory`](Self::in_memory) it has no
/// durable copy and commit only clears the dirty flag.
pub struct NotebookViewsStore<'db> {
    backing: Option<Backing<'db>>,
    views: Vec<ViewRecord>,
    view_index: HashMap<ViewId, usize>,
    cells: HashMap<CellId, CellExtensionMetadata>,
    active_view: Option<ViewId>,
    dirty: bool,
}

impl<'db> NotebookViewsStore<'db> {
    pub fn open(db: &'db Database, notebook_id: &str) -> Result<Self> {
        let views = db.list_views(notebook_id)?;
        let active_view = db.active_view(notebook_id)?;

        let mut store = Self {
            backing: Some(Backing {
                db,
                notebook_id: notebook_id.to_string(),
            }),
            views,
            view_index: HashMap::new(),
            cells: HashMap::new(),
            active_view,
            dirty: false,
        };
        store.reindex();

        for (cell, meta) in db.load_cell_views(notebook_id)? {
            if !store.view_index.contains_key(&meta.guid) {
                tracing::warn!(cell = %cell, view = %meta.guid, "skipping record of unknown view");
                continue;
            }
            store.cells.entry(cell).or_default().views.push(meta);
        }

        if let Some(active) = store.active_view
            && !store.view_index.contains_key(&active)
        {
            store.active_view = None;
        }

        tracing::debug!(
            notebook = notebook_id,
            views = store.views.len(),
            cells = store.cells.len(),
            "loaded notebook views"
        );
        Ok(store)
    }

    pub fn in_memory() -> Self {
        Self {
            backing: None,
            views: Vec::new(),
            view_index: HashMap::new(),
            cells: HashMap::new(),
            active_view: None,
            dirty: false,
        }
    }

    fn reindex(&mut self) {
        self.view_index = self
            .views
            .iter()
            .enumerate()
            .map(|(i, v)| (v.guid, i))
            .collect();
    }

    fn require_view(&self, guid: &ViewId) -> Result<usize> {
        self.view_index
            .get(guid)
            .copied()
            .ok_or_else(|| Error::Query(format!("Unknown view: {}", guid)))
    }
}

impl ViewExtensionStore for NotebookViewsStore<'_> {
    fn cell_metadata(&self, cell: &CellId) -> Option<&CellExtensionMetadata> {
        self.cells.get(cell)
    }

    fn initialize_cell(&mut self, cell: &CellId) {
        if !self.cells.contains_key(cell) {
            self.cells.insert(cell.clone(), CellExtensionMetadata::default());
            self.dirty = true;
        }
    }

    fn update_cell(
        &mut self,
        cell: &CellId,
        view: &ViewId,
        delta: &CellMetadataDelta,
        override_existing: bool,
    ) -> Result<()> {
        self.require_view(view)?;

        let container = self.cells.entry(cell.clone()).or_default();
        match container.view_mut(view) {
            Some(existing) if override_existing => {
                let mut replaced = CellViewMetadata::new(*view);
                replaced.apply(delta);
                *existing = replaced;
            }
            Some(existing) => existing.apply(delta),
            None => {
                let mut created = CellViewMetadata::new(*view);
                created.apply(delta);
                container.views.push(created);
            }
        }

        self.dirty = true;
        Ok(())
    }

    fn view_name_is_taken(&self, name: &str) -> bool {
        self.views.iter().any(|v| v.name == name)
    }

    fn views(&self) -> Vec<&ViewRecord> {
        self.views.iter().collect()
    }

    fn view(&self, guid: &ViewId) -> Option<&ViewRecord> {
        self.view_index.get(guid).map(|&i| &self.views[i])
    }

    fn insert_view(&mut self, view: ViewRecord) -> Result<()> {
        if self.view_index.contains_key(&view.guid) {
            return Err(Error::Query(format!("View already exists: {}", view.guid)));
        }
        self.view_index.insert(view.guid, self.views.len());
        self.views.push(view);
        self.dirty = true;
        Ok(())
    }

    fn rename_view(&mut self, guid: &ViewId, name: &str) -> Result<()> {
        let index = self.require_view(guid)?;
        self.views[index].name = name.to_string();
        self.dirty = true;
        Ok(())
    }

    fn remove_view(&mut self, guid: &ViewId) -> Result<()> {
        let index = self.require_view(guid)?;
        self.views.remove(index);
        self.reindex();

        for container in self.cells.values_mut() {
            container.remove_view(guid);
        }
        if self.active_view == Some(*guid) {
            self.active_view = None;
        }

        self.dirty = true;
        Ok(())
    }

    fn active_view(&self) -> Option<ViewId> {
        self.active_view
    }

    fn set_active_view(&mut self, guid: Option<ViewId>) -> Result<()> {
        if let Some(guid) = &guid {
            self.require_view(guid)?;
        }
        self.active_view = guid;
        self.dirty = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(backing) = &self.backing {
            let mut records: Vec<(&CellId, &CellViewMetadata)> = self
                .cells
                .iter()
                .flat_map(|(cell, container)| container.views.iter().map(move |m| (cell, m)))
                .collect();
            records.sort_by(|a, b| a.0.cmp(b.0));

            backing.db.save_views_state(
                &backing.notebook_id,
                &self.views,
                records,
                self.active_view.as_ref(),
            )?;
            tracing::debug!(
                notebook = %backing.notebook_id,
                views = self.views.len(),
                "committed notebook views"
            );
        }

        self.dirty = false;
        Ok(())
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}
