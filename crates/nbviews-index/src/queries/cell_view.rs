use nbviews_types::{CellId, CellViewMetadata, ViewId};
use rusqlite::{Connection, params};

use crate::Result;

struct CellViewRow {
    cell_id: String,
    view_guid: String,
    hidden: bool,
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

/// All placement records of a notebook, ordered by cell then view ordinal
pub fn load(conn: &Connection, notebook_id: &str) -> Result<Vec<(CellId, CellViewMetadata)>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT cv.cell_id, cv.view_guid, cv.hidden, cv.x, cv.y, cv.width, cv.height
        FROM cell_views cv
        LEFT JOIN views v ON v.notebook_id = cv.notebook_id AND v.guid = cv.view_guid
        WHERE cv.notebook_id = ?1
        ORDER BY cv.cell_id, v.ordinal
        "#,
    )?;

    let rows = stmt
        .query_map([notebook_id], |row| {
            Ok(CellViewRow {
                cell_id: row.get(0)?,
                view_guid: row.get(1)?,
                hidden: row.get(2)?,
                x: row.get(3)?,
                y: row.get(4)?,
                width: row.get(5)?,
                height: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    rows.into_iter()
        .map(|row| -> Result<(CellId, CellViewMetadata)> {
            let guid: ViewId = row.view_guid.parse()?;
            Ok((
                CellId::new(row.cell_id)?,
                CellViewMetadata {
                    guid,
                    hidden: row.hidden,
                    x: grid_unit(row.x),
                    y: grid_unit(row.y),
                    width: grid_unit(row.width),
                    height: grid_unit(row.height),
                },
            ))
        })
        .collect()
}

pub fn delete_all(conn: &Connection, notebook_id: &str) -> Result<()> {
    conn.execute("DELETE FROM cell_views WHERE notebook_id = ?1", [notebook_id])?;
    Ok(())
}

/// Insert records; every referenced view must already be stored
pub fn insert_all<'a, I>(conn: &Connection, notebook_id: &str, records: I) -> Result<()>
where
    I: IntoIterator<Item = (&'a CellId, &'a CellViewMetadata)>,
{
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO cell_views (notebook_id, cell_id, view_guid, hidden, x, y, width, height)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )?;
    for (cell_id, meta) in records {
        stmt.execute(params![
            notebook_id,
            cell_id.as_str(),
            meta.guid.to_string(),
            meta.hidden,
            meta.x as i64,
            meta.y as i64,
            meta.width as i64,
            meta.height as i64
        ])?;
    }

    Ok(())
}

// Negative values can only come from hand-edited databases
fn grid_unit(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
