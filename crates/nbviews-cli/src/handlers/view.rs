use super::{open_view, use_color};
use crate::render::render_grid;
use crate::types::OutputFormat;
use anyhow::Result;
use nbviews_engine::Placement;
use nbviews_runtime::Workspace;
use nbviews_types::ViewId;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct ViewRow {
    guid: ViewId,
    name: String,
    active: bool,
    displayed: usize,
    hidden: usize,
}

#[derive(Serialize)]
struct CellRow<'a> {
    cell: &'a str,
    hidden: bool,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

pub fn create(
    workspace: &Workspace,
    notebook: &str,
    name: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut views = workspace.open_notebook(notebook)?;
    let guid = match name {
        Some(name) => views.create_named_view(name)?,
        None => views.create_view()?,
    };
    views.save()?;

    let name = views
        .view(&guid)
        .map(|v| v.name().to_string())
        .unwrap_or_default();
    match format {
        OutputFormat::Plain => println!("Created view '{}' ({})", name, guid),
        OutputFormat::Json => println!("{}", json!({ "guid": guid, "name": name })),
    }
    Ok(())
}

pub fn list(workspace: &Workspace, notebook: &str, format: OutputFormat) -> Result<()> {
    let mut views = workspace.open_notebook(notebook)?;
    let active = views.active_view();
    let records: Vec<(ViewId, String)> = views
        .views()
        .iter()
        .map(|v| (v.guid, v.name.clone()))
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (guid, name) in records {
        let layout = views.layout(&guid)?;
        rows.push(ViewRow {
            guid,
            name,
            active: active == Some(guid),
            displayed: layout.displayed_cells().len(),
            hidden: layout.hidden_cells().len(),
        });
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No views for this notebook.");
        return Ok(());
    }
    for row in &rows {
        let marker = if row.active { "*" } else { " " };
        println!(
            "{} {}  {:<24}  {} shown, {} hidden",
            marker,
            row.guid.short(),
            row.name,
            row.displayed,
            row.hidden
        );
    }
    Ok(())
}

pub fn show(workspace: &Workspace, notebook: &str, view: &str, format: OutputFormat) -> Result<()> {
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    let layout = views.layout(&guid)?;

    if format == OutputFormat::Json {
        let cells: Vec<CellRow> = layout
            .cells()
            .iter()
            .map(|cell| match layout.get_cell_metadata(&cell.id) {
                Some(meta) => CellRow {
                    cell: cell.id.as_str(),
                    hidden: meta.hidden,
                    x: meta.x,
                    y: meta.y,
                    width: meta.width,
                    height: meta.height,
                },
                None => CellRow {
                    cell: cell.id.as_str(),
                    hidden: true,
                    x: 0,
                    y: 0,
                    width: 0,
                    height: 0,
                },
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "guid": layout.guid(),
                "name": layout.name(),
                "cells": cells,
            }))?
        );
        return Ok(());
    }

    println!("{} ({})", layout.name(), layout.guid());
    print!("{}", render_grid(&layout.grid_snapshot(), use_color()));

    let hidden = layout.hidden_cells();
    if !hidden.is_empty() {
        println!();
        println!("Hidden:");
        for cell in hidden {
            println!("  {}  {}", cell.id, cell.snippet(48));
        }
    }
    Ok(())
}

pub fn rename(
    workspace: &Workspace,
    notebook: &str,
    view: &str,
    name: &str,
    format: OutputFormat,
) -> Result<()> {
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    views.layout(&guid)?.rename(name)?;
    views.save()?;

    match format {
        OutputFormat::Plain => println!("Renamed view {} to '{}'", guid.short(), name),
        OutputFormat::Json => println!("{}", json!({ "guid": guid, "name": name })),
    }
    Ok(())
}

pub fn delete(workspace: &Workspace, notebook: &str, view: &str, format: OutputFormat) -> Result<()> {
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    views.delete_view(&guid)?;
    views.save()?;

    match format {
        OutputFormat::Plain => println!("Deleted view {}", guid.short()),
        OutputFormat::Json => println!("{}", json!({ "deleted": guid })),
    }
    Ok(())
}

pub fn compact(workspace: &Workspace, notebook: &str, view: &str, format: OutputFormat) -> Result<()> {
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    let placements = views.layout(&guid)?.compact_cells()?;
    views.save()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&placements)?);
        return Ok(());
    }

    println!("Compacted {} cell(s)", placements.len());
    for placement in &placements {
        println!("  {}", describe_placement(placement));
    }
    Ok(())
}

fn describe_placement(p: &Placement) -> String {
    let note = if p.clamped { "  (width clamped)" } else { "" };
    format!(
        "{}  {},{} {}x{}{}",
        p.cell, p.rect.x, p.rect.y, p.rect.width, p.rect.height, note
    )
}

pub fn activate(workspace: &Workspace, notebook: &str, view: &str, format: OutputFormat) -> Result<()> {
    let (mut views, guid) = open_view(workspace, notebook, view)?;
    views.set_active_view(Some(guid))?;
    views.save()?;

    match format {
        OutputFormat::Plain => println!("Active view: {}", guid.short()),
        OutputFormat::Json => println!("{}", json!({ "active_view": guid })),
    }
    Ok(())
}
