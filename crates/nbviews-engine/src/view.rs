use nbviews_types::ViewId;
use std::fmt;
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::{Error, Result, ViewEvent};

/// Lifecycle of a view: `Uninitialized -> Active -> Deleted`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Uninitialized,
    Active,
    Deleted,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Uninitialized => write!(f, "uninitialized"),
            ViewState::Active => write!(f, "active"),
            ViewState::Deleted => write!(f, "deleted"),
        }
    }
}

/// In-memory state of one view of a notebook.
///
/// Placement data lives in the store; this only tracks identity, the
/// transient "new" flag, the lifecycle state and event subscribers.
pub struct NotebookView {
    guid: ViewId,
    name: String,
    is_new: bool,
    state: ViewState,
    listeners: Vec<Sender<ViewEvent>>,
}

impl NotebookView {
    pub fn new(guid: ViewId, name: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
            is_new: false,
            state: ViewState::Uninitialized,
            listeners: Vec::new(),
        }
    }

    pub fn guid(&self) -> ViewId {
        self.guid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True from `initialize(true)` until the first `mark_as_viewed`
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn mark_as_viewed(&mut self) {
        self.is_new = false;
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Receive every event this view emits from now on
    pub fn subscribe(&mut self) -> Receiver<ViewEvent> {
        let (tx, rx) = channel();
        self.listeners.push(tx);
        rx
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn activate(&mut self, is_new_view: bool) {
        self.state = ViewState::Active;
        if is_new_view {
            self.is_new = true;
        }
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.state = ViewState::Deleted;
    }

    /// Deliver to all live subscribers, dropping disconnected ones
    pub(crate) fn emit(&mut self, event: ViewEvent) {
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub(crate) fn require_active(&self, operation: &'static str) -> Result<()> {
        match self.state {
            ViewState::Active => Ok(()),
            state => Err(Error::InvalidState {
                view: self.guid,
                state,
                operation,
            }),
        }
    }

    pub(crate) fn require_not_deleted(&self, operation: &'static str) -> Result<()> {
        match self.state {
            ViewState::Deleted => Err(Error::InvalidState {
                view: self.guid,
                state: ViewState::Deleted,
                operation,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for NotebookView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotebookView")
            .field("guid", &self.guid)
            .field("name", &self.name)
            .field("is_new", &self.is_new)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_view_starts_uninitialized() {
        let view = NotebookView::new(ViewId::generate(), "V");
        assert_eq!(view.state(), ViewState::Uninitialized);
        assert!(!view.is_new());
        assert!(view.require_active("move").is_err());
        assert!(view.require_not_deleted("rename").is_ok());
    }

    #[test]
    fn test_emit_prunes_dropped_subscribers() {
        let mut view = NotebookView::new(ViewId::generate(), "V");
        let kept = view.subscribe();
        drop(view.subscribe());

        view.emit(ViewEvent::ViewDeleted { view: view.guid() });

        assert_eq!(view.listeners.len(), 1);
        assert_eq!(
            kept.try_recv().unwrap(),
            ViewEvent::ViewDeleted { view: view.guid() }
        );
    }

    #[test]
    fn test_invalid_state_message() {
        let mut view = NotebookView::new(ViewId::generate(), "V");
        view.mark_deleted();
        let err = view.require_active("compact").unwrap_err();
        assert!(err.to_string().starts_with("Cannot compact view "));
        assert!(err.to_string().ends_with("view is deleted"));
    }
}
