use super::open_view;
use crate::types::OutputFormat;
use anyhow::{Result, bail};
use nbviews_index::ViewExtensionStore;
use nbviews_runtime::{NotebookWorkspace, Workspace};
use nbviews_types::{CellId, ViewId};
use serde_json::json;

pub fn set_hidden(
    workspace: &Workspace,
    notebook: &str,
    view: &str,
    cell: &str,
    hidden: bool,
    format: OutputFormat,
) -> Result<()> {
    let cell = CellId::new(cell)?;
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    {
        let mut layout = views.layout(&guid)?;
        if hidden {
            layout.hide_cell(&cell)?;
        } else {
            layout.insert_cell(&cell)?;
        }
    }
    views.save()?;

    let action = if hidden { "Hid" } else { "Inserted" };
    print_result(format, action, &cell, &views, &guid)
}

pub fn move_to(
    workspace: &Workspace,
    notebook: &str,
    view: &str,
    cell: &str,
    x: u32,
    y: u32,
    format: OutputFormat,
) -> Result<()> {
    let cell = CellId::new(cell)?;
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    views.layout(&guid)?.move_cell(&cell, x, y)?;
    views.save()?;

    print_result(format, "Moved", &cell, &views, &guid)
}

pub fn resize(
    workspace: &Workspace,
    notebook: &str,
    view: &str,
    cell: &str,
    width: Option<u32>,
    height: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    if width.is_none() && height.is_none() {
        bail!("Nothing to resize: pass --width and/or --height");
    }

    let cell = CellId::new(cell)?;
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    views.layout(&guid)?.resize_cell(&cell, width, height)?;
    views.save()?;

    print_result(format, "Resized", &cell, &views, &guid)
}

fn print_result(
    format: OutputFormat,
    action: &str,
    cell: &CellId,
    views: &NotebookWorkspace<'_>,
    guid: &ViewId,
) -> Result<()> {
    let meta = views
        .store()
        .cell_metadata(cell)
        .and_then(|m| m.view(guid))
        .copied();
    let Some(meta) = meta else {
        bail!("Cell '{}' has no record in view {}", cell, guid.short());
    };

    match format {
        OutputFormat::Plain => println!(
            "{} {}: {},{} {}x{}{}",
            action,
            cell,
            meta.x,
            meta.y,
            meta.width,
            meta.height,
            if meta.hidden { " (hidden)" } else { "" }
        ),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "cell": cell,
                "view": guid,
                "hidden": meta.hidden,
                "x": meta.x,
                "y": meta.y,
                "width": meta.width,
                "height": meta.height,
            })
        ),
    }
    Ok(())
}
