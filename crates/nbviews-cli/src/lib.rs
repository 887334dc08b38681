// nbviews keeps notebook documents read-only: cells are imported once and
// every view stores its own placement records next to them. A view never
// changes the notebook, so any number of views can coexist per notebook.

mod args;
mod commands;
mod handlers;
pub mod render;
pub mod types;

pub use args::{CellCommand, Cli, Commands, NotebookCommand, ViewCommand};
pub use commands::run;
