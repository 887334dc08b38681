pub mod cell;
pub mod notebook;
pub mod view;

use anyhow::Result;
use is_terminal::IsTerminal;
use nbviews_runtime::{NotebookWorkspace, Workspace, resolve_view};
use nbviews_types::ViewId;

/// Open a notebook's views and resolve one of them
pub(crate) fn open_view<'w>(
    workspace: &'w Workspace,
    notebook: &str,
    view: &str,
) -> Result<(NotebookWorkspace<'w>, ViewId)> {
    let views = workspace.open_notebook(notebook)?;
    let guid = resolve_view(&views, view)?;
    Ok((views, guid))
}

pub(crate) fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// First 8 characters of a notebook id
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
