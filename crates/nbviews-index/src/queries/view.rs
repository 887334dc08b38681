use nbviews_types::{ViewId, ViewRecord};
use rusqlite::{Connection, OptionalExtension, params};

use crate::Result;

pub fn list(conn: &Connection, notebook_id: &str) -> Result<Vec<ViewRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT guid, name
        FROM views
        WHERE notebook_id = ?1
        ORDER BY ordinal
        "#,
    )?;

    let rows = stmt
        .query_map([notebook_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    rows.into_iter()
        .map(|(guid, name)| -> Result<ViewRecord> {
            Ok(ViewRecord::new(guid.parse::<ViewId>()?, name))
        })
        .collect()
}

pub fn replace_all(conn: &Connection, notebook_id: &str, views: &[ViewRecord]) -> Result<()> {
    conn.execute("DELETE FROM views WHERE notebook_id = ?1", [notebook_id])?;

    let mut stmt = conn.prepare(
        r#"
        INSERT INTO views (notebook_id, guid, name, ordinal)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )?;
    for (ordinal, view) in views.iter().enumerate() {
        stmt.execute(params![
            notebook_id,
            view.guid.to_string(),
            &view.name,
            ordinal as i64
        ])?;
    }

    Ok(())
}

pub fn active(conn: &Connection, notebook_id: &str) -> Result<Option<ViewId>> {
    let raw: Option<Option<String>> = conn
        .query_row(
            "SELECT active_view FROM view_state WHERE notebook_id = ?1",
            [notebook_id],
            |row| row.get(0),
        )
        .optional()?;

    match raw.flatten() {
        Some(guid) => Ok(Some(guid.parse()?)),
        None => Ok(None),
    }
}

pub fn set_active(conn: &Connection, notebook_id: &str, active: Option<&ViewId>) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO view_state (notebook_id, active_view)
        VALUES (?1, ?2)
        ON CONFLICT(notebook_id) DO UPDATE SET
            active_view = ?2
        "#,
        params![notebook_id, active.map(|g| g.to_string())],
    )?;

    Ok(())
}
