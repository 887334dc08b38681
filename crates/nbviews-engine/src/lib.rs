// Layout engine for notebook views
// Sits between the view store (index) and any presentation layer (CLI)

mod compact;
mod error;
mod events;
mod layout;
mod view;
mod views;

pub use compact::{Placement, compact};
pub use error::{Error, Result};
pub use events::ViewEvent;
pub use layout::ViewLayout;
pub use view::{NotebookView, ViewState};
pub use views::{DEFAULT_VIEW_NAME, NotebookViews, ViewDefaults};
