use super::args::{CellCommand, Cli, Commands, NotebookCommand, ViewCommand};
use super::handlers;
use crate::types::LogLevel;
use anyhow::Result;
use nbviews_runtime::{Workspace, resolve_workspace_path};
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");
    let workspace = Workspace::open(data_dir)?;
    let format = cli.format;

    match cli.command {
        Commands::Notebook { command } => match command {
            NotebookCommand::Import { path } => {
                handlers::notebook::import(&workspace, &path, format)
            }
            NotebookCommand::List => handlers::notebook::list(&workspace, format),
            NotebookCommand::Show { notebook } => {
                handlers::notebook::show(&workspace, &notebook, format)
            }
            NotebookCommand::Remove { notebook } => {
                handlers::notebook::remove(&workspace, &notebook, format)
            }
        },

        Commands::View { command } => match command {
            ViewCommand::Create { notebook, name } => {
                handlers::view::create(&workspace, &notebook, name.as_deref(), format)
            }
            ViewCommand::List { notebook } => handlers::view::list(&workspace, &notebook, format),
            ViewCommand::Show { notebook, view } => {
                handlers::view::show(&workspace, &notebook, &view, format)
            }
            ViewCommand::Rename {
                notebook,
                view,
                name,
            } => handlers::view::rename(&workspace, &notebook, &view, &name, format),
            ViewCommand::Delete { notebook, view } => {
                handlers::view::delete(&workspace, &notebook, &view, format)
            }
            ViewCommand::Compact { notebook, view } => {
                handlers::view::compact(&workspace, &notebook, &view, format)
            }
            ViewCommand::Activate { notebook, view } => {
                handlers::view::activate(&workspace, &notebook, &view, format)
            }
        },

        Commands::Cell { command } => match command {
            CellCommand::Hide {
                notebook,
                view,
                cell,
            } => handlers::cell::set_hidden(&workspace, &notebook, &view, &cell, true, format),
            CellCommand::Insert {
                notebook,
                view,
                cell,
            } => handlers::cell::set_hidden(&workspace, &notebook, &view, &cell, false, format),
            CellCommand::Move {
                notebook,
                view,
                cell,
                x,
                y,
            } => handlers::cell::move_to(&workspace, &notebook, &view, &cell, x, y, format),
            CellCommand::Resize {
                notebook,
                view,
                cell,
                width,
                height,
            } => handlers::cell::resize(
                &workspace, &notebook, &view, &cell, width, height, format,
            ),
        },
    }
}

/// Logs go to stderr so that `--format json` output stays parseable
fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
