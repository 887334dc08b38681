use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nbviews")]
#[command(about = "Arrange notebook cells into named grid views", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $NBVIEWS_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Overridden by RUST_LOG when set
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import and inspect notebooks
    Notebook {
        #[command(subcommand)]
        command: NotebookCommand,
    },

    /// Create, inspect and manage views of a notebook
    View {
        #[command(subcommand)]
        command: ViewCommand,
    },

    /// Change how a cell appears in a view
    Cell {
        #[command(subcommand)]
        command: CellCommand,
    },
}

#[derive(Subcommand)]
pub enum NotebookCommand {
    /// Import a .ipynb file or every .ipynb file below a directory
    Import { path: PathBuf },

    List,

    Show { notebook: String },

    /// Remove a notebook together with all of its views
    Remove { notebook: String },
}

#[derive(Subcommand)]
pub enum ViewCommand {
    Create {
        notebook: String,

        #[arg(long)]
        name: Option<String>,
    },

    List { notebook: String },

    /// Render the view as a 12-column grid
    Show { notebook: String, view: String },

    Rename {
        notebook: String,
        view: String,
        name: String,
    },

    Delete { notebook: String, view: String },

    /// Re-pack displayed cells top-left without overlap
    Compact { notebook: String, view: String },

    /// Make this view the notebook's active view
    Activate { notebook: String, view: String },
}

#[derive(Subcommand)]
pub enum CellCommand {
    Hide {
        notebook: String,
        view: String,
        cell: String,
    },

    Insert {
        notebook: String,
        view: String,
        cell: String,
    },

    Move {
        notebook: String,
        view: String,
        cell: String,
        x: u32,
        y: u32,
    },

    Resize {
        notebook: String,
        view: String,
        cell: String,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,
    },
}
