pub mod config;
mod error;
pub mod import;
mod workspace;

pub use config::{Config, resolve_workspace_path};
pub use error::{Error, Result};
pub use import::{ImportProgress, ImportSummary, parse_notebook};
pub use workspace::{NotebookWorkspace, Workspace, resolve_view};
