use nbviews_types::{Cell, CellId, CellViewMetadata, Notebook, ViewId, ViewRecord};
use rusqlite::Connection;
use std::path::Path;

use crate::{
    Result, queries,
    records::{NotebookRecord, NotebookSummary},
    schema,
};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        let db = Self { conn };
        db.init_schema()?;
        tracing::debug!(path = %db_path.display(), "opened views database");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.conn)
    }

    // Notebooks

    /// Store a full notebook (record + cells) in one transaction
    pub fn import_notebook(&self, record: &NotebookRecord, cells: &[Cell]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        queries::notebook::insert_or_update(&tx, record)?;
        queries::notebook::replace_cells(&tx, &record.id, cells)?;
        tx.commit()?;
        Ok(())
    }

    pub fn get_notebook(&self, id: &str) -> Result<Option<NotebookRecord>> {
        queries::notebook::get(&self.conn, id)
    }

    /// Load a notebook document (record + ordered cells)
    pub fn load_notebook(&self, id: &str) -> Result<Option<Notebook>> {
        let Some(record) = queries::notebook::get(&self.conn, id)? else {
            return Ok(None);
        };
        let cells = queries::notebook::cells(&self.conn, id)?;
        Ok(Some(Notebook::new(record.id, record.title, cells)))
    }

    pub fn list_notebooks(&self) -> Result<Vec<NotebookSummary>> {
        queries::notebook::list(&self.conn)
    }

    pub fn find_notebook_by_prefix(&self, prefix: &str) -> Result<Option<String>> {
        queries::notebook::find_by_prefix(&self.conn, prefix)
    }

    pub fn delete_notebook(&self, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = queries::notebook::delete(&tx, id)?;
        tx.commit()?;
        Ok(removed)
    }

    // Views

    pub fn list_views(&self, notebook_id: &str) -> Result<Vec<ViewRecord>> {
        queries::view::list(&self.conn, notebook_id)
    }

    pub fn active_view(&self, notebook_id: &str) -> Result<Option<ViewId>> {
        queries::view::active(&self.conn, notebook_id)
    }

    pub fn load_cell_views(&self, notebook_id: &str) -> Result<Vec<(CellId, CellViewMetadata)>> {
        queries::cell_view::load(&self.conn, notebook_id)
    }

    /// Replace every view-related row of a notebook in one transaction
    pub fn save_views_state<'a, I>(
        &self,
        notebook_id: &str,
        views: &[ViewRecord],
        cell_views: I,
        active_view: Option<&ViewId>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (&'a CellId, &'a CellViewMetadata)>,
    {
        let tx = self.conn.unchecked_transaction()?;
        // cell_views references views, so clear it before the views are replaced
        queries::cell_view::delete_all(&tx, notebook_id)?;
        queries::view::replace_all(&tx, notebook_id, views)?;
        queries::cell_view::insert_all(&tx, notebook_id, cell_views)?;
        queries::view::set_active(&tx, notebook_id, active_view)?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbviews_types::CellKind;

    fn record(id: &str) -> NotebookRecord {
        NotebookRecord {
            id: id.to_string(),
            title: "sales".to_string(),
            source_path: Some("/data/sales.ipynb".to_string()),
            imported_at: Some("2026-01-10T10:00:00Z".to_string()),
        }
    }

    fn cells(ids: &[&str]) -> Vec<Cell> {
        ids.iter()
            .map(|id| Cell::new(CellId::new(*id).unwrap(), CellKind::Code, format!("-- {}", id)))
            .collect()
    }

    #[test]
    fn test_schema_initialization() {
        let db = Database::open_in_memory().unwrap();

        let notebooks = db.list_notebooks().unwrap();
        assert_eq!(notebooks.len(), 0);
    }

    #[test]
    fn test_import_and_load_notebook() {
        let db = Database::open_in_memory().unwrap();
        db.import_notebook(&record("nb1"), &cells(&["a", "b", "c"]))
            .unwrap();

        let notebook = db.load_notebook("nb1").unwrap().unwrap();
        assert_eq!(notebook.title, "sales");
        let ids: Vec<&str> = notebook.cells.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        assert!(db.load_notebook("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_notebooks_counts() {
        let db = Database::open_in_memory().unwrap();
        db.import_notebook(&record("nb1"), &cells(&["a", "b"])).unwrap();

        let view = ViewRecord::new(ViewId::generate(), "Dashboard");
        db.save_views_state("nb1", std::slice::from_ref(&view), std::iter::empty(), None)
            .unwrap();

        let notebooks = db.list_notebooks().unwrap();
        assert_eq!(notebooks.len(), 1);
        assert_eq!(notebooks[0].cell_count, 2);
        assert_eq!(notebooks[0].view_count, 1);
    }

    #[test]
    fn test_save_and_load_views_state() {
        let db = Database::open_in_memory().unwrap();
        db.import_notebook(&record("nb1"), &cells(&["a", "b"])).unwrap();

        let first = ViewRecord::new(ViewId::generate(), "First");
        let second = ViewRecord::new(ViewId::generate(), "Second");
        let a = CellId::new("a").unwrap();
        let meta = CellViewMetadata {
            guid: second.guid,
            hidden: true,
            x: 6,
            y: 4,
            width: 6,
            height: 2,
        };

        db.save_views_state(
            "nb1",
            &[first.clone(), second.clone()],
            vec![(&a, &meta)],
            Some(&second.guid),
        )
        .unwrap();

        assert_eq!(db.list_views("nb1").unwrap(), vec![first, second.clone()]);
        assert_eq!(db.active_view("nb1").unwrap(), Some(second.guid));
        assert_eq!(db.load_cell_views("nb1").unwrap(), vec![(a, meta)]);
    }

    #[test]
    fn test_reimport_prunes_removed_cells() {
        let db = Database::open_in_memory().unwrap();
        db.import_notebook(&record("nb1"), &cells(&["a", "b"])).unwrap();

        let view = ViewRecord::new(ViewId::generate(), "V");
        let a = CellId::new("a").unwrap();
        let b = CellId::new("b").unwrap();
        let meta = CellViewMetadata::new(view.guid);
        db.save_views_state(
            "nb1",
            std::slice::from_ref(&view),
            vec![(&a, &meta), (&b, &meta)],
            None,
        )
        .unwrap();

        db.import_notebook(&record("nb1"), &cells(&["b", "c"])).unwrap();

        let remaining = db.load_cell_views("nb1").unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].0, b);
        assert_eq!(db.list_views("nb1").unwrap().len(), 1);
    }

    #[test]
    fn test_find_notebook_by_prefix() {
        let db = Database::open_in_memory().unwrap();
        db.import_notebook(&record("abc111"), &[]).unwrap();
        db.import_notebook(&record("abc222"), &[]).unwrap();

        assert_eq!(
            db.find_notebook_by_prefix("abc1").unwrap(),
            Some("abc111".to_string())
        );
        assert!(db.find_notebook_by_prefix("abc").is_err());
        assert_eq!(db.find_notebook_by_prefix("zzz").unwrap(), None);
    }

    #[test]
    fn test_delete_notebook() {
        let db = Database::open_in_memory().unwrap();
        db.import_notebook(&record("nb1"), &cells(&["a"])).unwrap();

        assert!(db.delete_notebook("nb1").unwrap());
        assert!(!db.delete_notebook("nb1").unwrap());
        assert!(db.list_notebooks().unwrap().is_empty());
    }
}
