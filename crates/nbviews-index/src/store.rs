use nbviews_types::{CellExtensionMetadata, CellId, CellMetadataDelta, ViewId, ViewRecord};

use crate::Result;

/// Per-notebook storage of view records and per-cell placement metadata.
///
/// Mutations only touch pending in-memory state; [`commit`](Self::commit)
/// makes them durable. The layout engine reads and writes exclusively
/// through this trait.
pub trait ViewExtensionStore {
    /// All per-view records of a cell, or `None` if the cell was never initialized
    fn cell_metadata(&self, cell: &CellId) -> Option<&CellExtensionMetadata>;

    /// Create an empty metadata container for the cell if it has none
    fn initialize_cell(&mut self, cell: &CellId);

    /// Write `delta` into the record for `(cell, view)`.
    ///
    /// A missing record is created from [`CellViewMetadata::new`] with the
    /// delta applied. Otherwise `override_existing = false` merges the delta
    /// over the record and `override_existing = true` replaces the record by
    /// the defaults plus the delta.
    ///
    /// [`CellViewMetadata::new`]: nbviews_types::CellViewMetadata::new
    fn update_cell(
        &mut self,
        cell: &CellId,
        view: &ViewId,
        delta: &CellMetadataDelta,
        override_existing: bool,
    ) -> Result<()>;

    fn view_name_is_taken(&self, name: &str) -> bool;

    /// Registered views in creation order
    fn views(&self) -> Vec<&ViewRecord>;

    /// Keyed lookup of a registered view
    fn view(&self, guid: &ViewId) -> Option<&ViewRecord>;

    fn insert_view(&mut self, view: ViewRecord) -> Result<()>;

    fn rename_view(&mut self, guid: &ViewId, name: &str) -> Result<()>;

    /// Remove the view and every cell's record for it
    fn remove_view(&mut self, guid: &ViewId) -> Result<()>;

    fn active_view(&self) -> Option<ViewId>;

    fn set_active_view(&mut self, guid: Option<ViewId>) -> Result<()>;

    /// Flush pending state to persistent storage
    fn commit(&mut self) -> Result<()>;

    /// Whether there is pending state not yet committed
    fn is_dirty(&self) -> bool;
}
