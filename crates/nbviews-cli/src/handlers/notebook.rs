use super::{short_id, use_color};
use crate::types::OutputFormat;
use anyhow::Result;
use nbviews_runtime::{ImportProgress, Workspace};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn import(workspace: &Workspace, path: &Path, format: OutputFormat) -> Result<()> {
    let plain = format == OutputFormat::Plain;

    let summary = workspace.import(path, |progress| {
        if !plain {
            return;
        }
        match progress {
            ImportProgress::Scanning { root } => println!("Scanning {}", root.display()),
            ImportProgress::Imported {
                path,
                notebook_id,
                cells,
            } => println!(
                "  {} {} ({} cells)",
                short_id(&notebook_id),
                path.display(),
                cells
            ),
            ImportProgress::Skipped { path, reason } => {
                eprintln!("  skipped {}: {}", path.display(), reason)
            }
        }
    })?;

    if plain {
        println!(
            "Imported {} notebook(s), skipped {}",
            summary.imported.len(),
            summary.skipped
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "imported": summary.imported,
                "skipped": summary.skipped,
            }))?
        );
    }
    Ok(())
}

pub fn list(workspace: &Workspace, format: OutputFormat) -> Result<()> {
    let notebooks = workspace.notebooks()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&notebooks)?);
        return Ok(());
    }

    if notebooks.is_empty() {
        println!("No notebooks imported yet. Run `nbviews notebook import <PATH>` first.");
        return Ok(());
    }

    let header = format!("{:<8}  {:<32}  {:>5}  {:>5}", "ID", "TITLE", "CELLS", "VIEWS");
    if use_color() {
        println!("{}", header.bold());
    } else {
        println!("{}", header);
    }
    for nb in &notebooks {
        println!(
            "{:<8}  {:<32}  {:>5}  {:>5}",
            short_id(&nb.id),
            truncate(&nb.title, 32),
            nb.cell_count,
            nb.view_count
        );
    }
    Ok(())
}

pub fn show(workspace: &Workspace, notebook: &str, format: OutputFormat) -> Result<()> {
    let views = workspace.open_notebook(notebook)?;
    let nb = views.notebook();
    let active = views.active_view();

    if format == OutputFormat::Json {
        let view_list: Vec<_> = views
            .views()
            .into_iter()
            .map(|v| {
                json!({
                    "guid": v.guid,
                    "name": v.name,
                    "active": active == Some(v.guid),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "id": nb.id,
                "title": nb.title,
                "cells": nb.cells,
                "views": view_list,
            }))?
        );
        return Ok(());
    }

    let color = use_color();
    let title = if color {
        nb.title.bold().to_string()
    } else {
        nb.title.clone()
    };
    println!("{} ({})", title, nb.id);
    println!();
    println!("Cells:");
    for (index, cell) in nb.cells.iter().enumerate() {
        println!(
            "  {:>3}  {:<16}  {:<8}  {}",
            index,
            cell.id.as_str(),
            cell.kind.as_str(),
            cell.snippet(48)
        );
    }

    println!();
    let records = views.views();
    if records.is_empty() {
        println!("No views yet. Run `nbviews view create {}`.", short_id(&nb.id));
    } else {
        println!("Views:");
        for record in records {
            let marker = if active == Some(record.guid) { "*" } else { " " };
            println!("  {} {}  {}", marker, record.guid.short(), record.name);
        }
    }
    Ok(())
}

pub fn remove(workspace: &Workspace, notebook: &str, format: OutputFormat) -> Result<()> {
    let id = workspace.resolve_notebook_id(notebook)?;
    workspace.remove_notebook(&id)?;

    match format {
        OutputFormat::Plain => println!("Removed notebook {}", short_id(&id)),
        OutputFormat::Json => println!("{}", json!({ "removed": id })),
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}
