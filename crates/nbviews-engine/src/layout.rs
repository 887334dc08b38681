use nbviews_index::ViewExtensionStore;
use nbviews_types::{
    Cell, CellId, CellMetadataDelta, CellViewMetadata, Notebook, Rect, ViewId,
};

use crate::compact::{Placement, compact};
use crate::{Error, NotebookView, Result, ViewEvent};

/// Layout operations of one view, borrowing the view state, the notebook
/// document and the store together.
///
/// Every cell-mutating operation requires the view to be
/// [`Active`](crate::ViewState::Active).
pub struct ViewLayout<'a, S: ViewExtensionStore> {
    view: &'a mut NotebookView,
    notebook: &'a Notebook,
    store: &'a mut S,
}

impl<'a, S: ViewExtensionStore> ViewLayout<'a, S> {
    pub fn new(view: &'a mut NotebookView, notebook: &'a Notebook, store: &'a mut S) -> Self {
        Self {
            view,
            notebook,
            store,
        }
    }

    pub fn view(&self) -> &NotebookView {
        self.view
    }

    pub fn guid(&self) -> ViewId {
        self.view.guid()
    }

    pub fn name(&self) -> &str {
        self.view.name()
    }

    pub fn is_new(&self) -> bool {
        self.view.is_new()
    }

    pub fn mark_as_viewed(&mut self) {
        self.view.mark_as_viewed();
    }

    /// Make sure every cell has a record for this view and activate the view.
    ///
    /// Existing records are left alone. Missing ones get the default
    /// placement for the cell's document index.
    pub fn initialize(&mut self, is_new_view: bool) -> Result<()> {
        self.view.require_not_deleted("initialize")?;
        let guid = self.view.guid();
        let notebook = self.notebook;

        let mut created = 0usize;
        for (index, cell) in notebook.cells.iter().enumerate() {
            self.store.initialize_cell(&cell.id);
            if self.record(&cell.id, &guid).is_none() {
                let defaults = CellViewMetadata::at_document_index(guid, index);
                self.store
                    .update_cell(&cell.id, &guid, &CellMetadataDelta::from(&defaults), true)?;
                created += 1;
            }
        }

        self.view.activate(is_new_view);
        tracing::debug!(view = %guid, created, "initialized view");
        Ok(())
    }

    /// Rename the view. The new name is visible to the store immediately
    /// and persisted on [`save`](Self::save).
    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        self.view.require_not_deleted("rename")?;

        if new_name == self.view.name() {
            return Ok(());
        }
        if new_name.trim().is_empty() {
            return Err(Error::InvalidViewName(new_name.to_string()));
        }
        if self.store.view_name_is_taken(new_name) {
            return Err(Error::ViewNameTaken {
                name: new_name.to_string(),
            });
        }

        let guid = self.view.guid();
        self.store.rename_view(&guid, new_name)?;
        self.view.set_name(new_name.to_string());
        self.view.emit(ViewEvent::ViewRenamed {
            view: guid,
            name: new_name.to_string(),
        });
        Ok(())
    }

    /// This view's record for the cell, or `None` if the cell was never
    /// initialized for it
    pub fn get_cell_metadata(&self, cell: &CellId) -> Option<&CellViewMetadata> {
        self.record(cell, &self.view.guid())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.notebook.cells
    }

    /// Cells with a visible record, in document order
    pub fn displayed_cells(&self) -> Vec<&Cell> {
        self.notebook
            .cells
            .iter()
            .filter(|c| self.is_displayed(&c.id))
            .collect()
    }

    /// Every other cell, including cells with no record (absence counts as hidden)
    pub fn hidden_cells(&self) -> Vec<&Cell> {
        self.notebook
            .cells
            .iter()
            .filter(|c| !self.is_displayed(&c.id))
            .collect()
    }

    /// Displayed cells with their rectangles, in document order
    pub fn grid_snapshot(&self) -> Vec<(&Cell, Rect)> {
        let guid = self.view.guid();
        self.notebook
            .cells
            .iter()
            .filter_map(|c| match self.record(&c.id, &guid) {
                Some(meta) if !meta.hidden => Some((c, meta.rect())),
                _ => None,
            })
            .collect()
    }

    /// Apply a partial update to the record of `(cell, target_view)`.
    ///
    /// A cell without a record for the target view gets the default
    /// placement first. `override_existing` is forwarded to the store.
    pub fn update_cell(
        &mut self,
        cell: &CellId,
        target_view: &ViewId,
        delta: &CellMetadataDelta,
        override_existing: bool,
    ) -> Result<()> {
        self.view.require_active("update cells of")?;
        let index = self
            .notebook
            .index_of(cell)
            .ok_or_else(|| Error::CellNotFound(cell.clone()))?;

        if self.record(cell, target_view).is_none() {
            self.store.initialize_cell(cell);
            let defaults = CellViewMetadata::at_document_index(*target_view, index);
            self.store
                .update_cell(cell, target_view, &CellMetadataDelta::from(&defaults), true)?;
        }

        self.store
            .update_cell(cell, target_view, delta, override_existing)?;
        Ok(())
    }

    pub fn insert_cell(&mut self, cell: &CellId) -> Result<()> {
        self.set_hidden(cell, false)
    }

    pub fn hide_cell(&mut self, cell: &CellId) -> Result<()> {
        self.set_hidden(cell, true)
    }

    pub fn move_cell(&mut self, cell: &CellId, x: u32, y: u32) -> Result<()> {
        let guid = self.view.guid();
        self.update_cell(cell, &guid, &CellMetadataDelta::position(x, y), false)
    }

    /// Resize a cell; only the dimensions that are given change
    pub fn resize_cell(
        &mut self,
        cell: &CellId,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<()> {
        let guid = self.view.guid();
        self.update_cell(cell, &guid, &CellMetadataDelta::size(width, height), false)
    }

    /// Re-pack all displayed cells into the grid without overlap.
    ///
    /// Positions are written straight to the store. Sizes are kept, except
    /// for cells wider than the grid, which are narrowed to fit.
    pub fn compact_cells(&mut self) -> Result<Vec<Placement>> {
        self.view.require_active("compact")?;
        let guid = self.view.guid();

        let current: Vec<(CellId, Rect)> = self
            .grid_snapshot()
            .into_iter()
            .map(|(cell, rect)| (cell.id.clone(), rect))
            .collect();
        let placements = compact(&current);

        for placement in &placements {
            let mut delta = CellMetadataDelta::position(placement.rect.x, placement.rect.y);
            if placement.clamped {
                delta.width = Some(placement.rect.width);
            }
            self.store.update_cell(&placement.cell, &guid, &delta, false)?;
        }

        tracing::debug!(
            view = %guid,
            cells = placements.len(),
            rows = placements.iter().map(|p| p.rect.bottom()).max().unwrap_or(0),
            "compacted view"
        );
        Ok(placements)
    }

    /// Remove this view's records from the store and notify subscribers.
    /// The view cannot be used afterwards.
    pub fn delete(&mut self) -> Result<()> {
        self.view.require_not_deleted("delete")?;
        let guid = self.view.guid();

        self.store.remove_view(&guid)?;
        self.view.mark_deleted();
        self.view.emit(ViewEvent::ViewDeleted { view: guid });
        tracing::debug!(view = %guid, "deleted view");
        Ok(())
    }

    /// Flush pending store state to persistent storage
    pub fn save(&mut self) -> Result<()> {
        self.view.require_not_deleted("save")?;
        self.store.commit()?;
        Ok(())
    }

    fn set_hidden(&mut self, cell: &CellId, hidden: bool) -> Result<()> {
        let guid = self.view.guid();
        self.update_cell(cell, &guid, &CellMetadataDelta::hidden(hidden), false)?;
        self.view.emit(ViewEvent::CellVisibilityChanged {
            view: guid,
            cell: cell.clone(),
            hidden,
        });
        Ok(())
    }

    fn record(&self, cell: &CellId, guid: &ViewId) -> Option<&CellViewMetadata> {
        self.store.cell_metadata(cell).and_then(|m| m.view(guid))
    }

    fn is_displayed(&self, cell: &CellId) -> bool {
        self.get_cell_metadata(cell).is_some_and(|m| !m.hidden)
    }
}
