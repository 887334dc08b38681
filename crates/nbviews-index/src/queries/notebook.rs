use nbviews_types::{Cell, CellId, CellKind};
use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    Error, Result,
    records::{NotebookRecord, NotebookSummary},
};

pub fn insert_or_update(conn: &Connection, notebook: &NotebookRecord) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO notebooks (id, title, source_path, imported_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            title = ?2,
            source_path = COALESCE(?3, source_path),
            imported_at = COALESCE(?4, imported_at)
        "#,
        params![
            &notebook.id,
            &notebook.title,
            &notebook.source_path,
            &notebook.imported_at
        ],
    )?;

    Ok(())
}

/// Replace the cell list of a notebook, keeping placement records only for
/// cells that survive the replacement.
pub fn replace_cells(conn: &Connection, notebook_id: &str, cells: &[Cell]) -> Result<()> {
    conn.execute("DELETE FROM cells WHERE notebook_id = ?1", [notebook_id])?;

    let mut stmt = conn.prepare(
        r#"
        INSERT INTO cells (notebook_id, position, id, kind, source)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )?;
    for (position, cell) in cells.iter().enumerate() {
        stmt.execute(params![
            notebook_id,
            position as i64,
            cell.id.as_str(),
            cell.kind.as_str(),
            &cell.source
        ])?;
    }

    conn.execute(
        r#"
        DELETE FROM cell_views
        WHERE notebook_id = ?1
          AND cell_id NOT IN (SELECT id FROM cells WHERE notebook_id = ?1)
        "#,
        [notebook_id],
    )?;

    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<NotebookRecord>> {
    let result = conn
        .query_row(
            r#"
        SELECT id, title, source_path, imported_at
        FROM notebooks
        WHERE id = ?1
        "#,
            [id],
            |row| {
                Ok(NotebookRecord {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    source_path: row.get(2)?,
                    imported_at: row.get(3)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

pub fn cells(conn: &Connection, notebook_id: &str) -> Result<Vec<Cell>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, kind, source
        FROM cells
        WHERE notebook_id = ?1
        ORDER BY position
        "#,
    )?;

    let rows = stmt
        .query_map([notebook_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    rows.into_iter()
        .map(|(id, kind, source)| -> Result<Cell> {
            Ok(Cell::new(
                CellId::new(id)?,
                CellKind::from_cell_type(&kind),
                source,
            ))
        })
        .collect()
}

pub fn list(conn: &Connection) -> Result<Vec<NotebookSummary>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT n.id, n.title, n.source_path, n.imported_at,
               (SELECT COUNT(*) FROM cells c WHERE c.notebook_id = n.id),
               (SELECT COUNT(*) FROM views v WHERE v.notebook_id = n.id)
        FROM notebooks n
        ORDER BY n.imported_at DESC, n.title
        "#,
    )?;

    let notebooks = stmt
        .query_map([], |row| {
            Ok(NotebookSummary {
                id: row.get(0)?,
                title: row.get(1)?,
                source_path: row.get(2)?,
                imported_at: row.get(3)?,
                cell_count: row.get::<_, i64>(4)? as usize,
                view_count: row.get::<_, i64>(5)? as usize,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(notebooks)
}

/// Find notebook by ID prefix (supports short IDs like "7f2abd2d")
pub fn find_by_prefix(conn: &Connection, prefix: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id
        FROM notebooks
        WHERE id LIKE ?1
        LIMIT 2
        "#,
    )?;

    let pattern = format!("{}%", prefix);
    let mut matches: Vec<String> = stmt
        .query_map([&pattern], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches.remove(0))),
        _ => Err(Error::Query(format!(
            "Ambiguous notebook ID prefix '{}': multiple notebooks match",
            prefix
        ))),
    }
}

pub fn delete(conn: &Connection, id: &str) -> Result<bool> {
    conn.execute("DELETE FROM view_state WHERE notebook_id = ?1", [id])?;
    conn.execute("DELETE FROM cell_views WHERE notebook_id = ?1", [id])?;
    conn.execute("DELETE FROM views WHERE notebook_id = ?1", [id])?;
    conn.execute("DELETE FROM cells WHERE notebook_id = ?1", [id])?;
    let removed = conn.execute("DELETE FROM notebooks WHERE id = ?1", [id])?;
    Ok(removed > 0)
}
