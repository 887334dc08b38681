use rusqlite::Connection;

use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 3;

// NOTE: Storage layout
//
// - cells keep document order in `position`; the layout engine never reorders them
// - views carry an `ordinal` so listing order matches creation order across commits
// - cell_views has no foreign key on cell_id: records of cells removed by a re-import
//   are pruned explicitly in queries::notebook::replace_cells
// - view_state holds at most one row per notebook (the active view)

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != SCHEMA_VERSION {
        drop_all_tables(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS notebooks (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            source_path TEXT,
            imported_at TEXT
        );

        CREATE TABLE IF NOT EXISTS cells (
            notebook_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            id TEXT NOT NULL,
            kind TEXT NOT NULL,
            source TEXT NOT NULL,
            PRIMARY KEY (notebook_id, id),
            FOREIGN KEY (notebook_id) REFERENCES notebooks(id)
        );

        CREATE TABLE IF NOT EXISTS views (
            notebook_id TEXT NOT NULL,
            guid TEXT NOT NULL,
            name TEXT NOT NULL,
            ordinal INTEGER NOT NULL,
            PRIMARY KEY (notebook_id, guid),
            UNIQUE (notebook_id, name),
            FOREIGN KEY (notebook_id) REFERENCES notebooks(id)
        );

        CREATE TABLE IF NOT EXISTS cell_views (
            notebook_id TEXT NOT NULL,
            cell_id TEXT NOT NULL,
            view_guid TEXT NOT NULL,
            hidden BOOLEAN NOT NULL DEFAULT 0,
            x INTEGER NOT NULL,
            y INTEGER NOT NULL,
            width INTEGER NOT NULL,
            height INTEGER NOT NULL,
            PRIMARY KEY (notebook_id, cell_id, view_guid),
            FOREIGN KEY (notebook_id, view_guid) REFERENCES views(notebook_id, guid)
        );

        CREATE TABLE IF NOT EXISTS view_state (
            notebook_id TEXT PRIMARY KEY,
            active_view TEXT,
            FOREIGN KEY (notebook_id) REFERENCES notebooks(id)
        );

        CREATE INDEX IF NOT EXISTS idx_cells_position ON cells(notebook_id, position);
        CREATE INDEX IF NOT EXISTS idx_cell_views_view ON cell_views(notebook_id, view_guid);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS view_state;
        DROP TABLE IF EXISTS cell_views;
        DROP TABLE IF EXISTS views;
        DROP TABLE IF EXISTS cells;
        DROP TABLE IF EXISTS notebooks;
        "#,
    )?;
    Ok(())
}
