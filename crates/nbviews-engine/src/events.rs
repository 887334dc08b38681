use nbviews_types::{CellId, ViewId};

/// Notifications emitted by a view to its subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A cell was inserted into or hidden from the view
    CellVisibilityChanged {
        view: ViewId,
        cell: CellId,
        hidden: bool,
    },
    ViewRenamed {
        view: ViewId,
        name: String,
    },
    /// Emitted once, after the view's records were removed from the store
    ViewDeleted {
        view: ViewId,
    },
}
