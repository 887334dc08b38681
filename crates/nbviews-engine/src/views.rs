use nbviews_index::ViewExtensionStore;
use nbviews_types::{Notebook, ViewId, ViewRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Error, NotebookView, Result, ViewLayout};

pub const DEFAULT_VIEW_NAME: &str = "Untitled View";

/// Settings applied when views are created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDefaults {
    /// Base of generated names; a fresh view is named "<default_name> <n>"
    #[serde(default = "default_view_name")]
    pub default_name: String,
}

fn default_view_name() -> String {
    DEFAULT_VIEW_NAME.to_string()
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            default_name: default_view_name(),
        }
    }
}

/// All views of one notebook: owns the notebook document, the store and
/// the in-memory state of every view loaded so far.
pub struct NotebookViews<S: ViewExtensionStore> {
    notebook: Notebook,
    store: S,
    views: HashMap<ViewId, NotebookView>,
    defaults: ViewDefaults,
}

impl<S: ViewExtensionStore> NotebookViews<S> {
    pub fn new(notebook: Notebook, store: S, defaults: ViewDefaults) -> Self {
        Self {
            notebook,
            store,
            views: HashMap::new(),
            defaults,
        }
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registered views in creation order, loaded or not
    pub fn views(&self) -> Vec<&ViewRecord> {
        self.store.views()
    }

    /// First free name of the form "<default_name> <n>", n >= 1
    pub fn next_view_name(&self) -> String {
        let base = &self.defaults.default_name;
        (1..)
            .map(|n| format!("{} {}", base, n))
            .find(|name| !self.store.view_name_is_taken(name))
            .unwrap_or_else(|| base.clone())
    }

    /// Create a view with a fresh guid and a generated name.
    /// The new view is initialized and flagged as new.
    pub fn create_view(&mut self) -> Result<ViewId> {
        let name = self.next_view_name();
        self.create_named_view(&name)
    }

    pub fn create_named_view(&mut self, name: &str) -> Result<ViewId> {
        if name.trim().is_empty() {
            return Err(Error::InvalidViewName(name.to_string()));
        }
        if self.store.view_name_is_taken(name) {
            return Err(Error::ViewNameTaken {
                name: name.to_string(),
            });
        }

        let guid = ViewId::generate();
        self.store.insert_view(ViewRecord::new(guid, name))?;
        self.views.insert(guid, NotebookView::new(guid, name));
        if let Err(err) = self.layout(&guid).and_then(|mut layout| layout.initialize(true)) {
            // Drop the half-created view together with any records it got
            self.views.remove(&guid);
            if let Err(cleanup) = self.store.remove_view(&guid) {
                tracing::warn!(view = %guid, error = %cleanup, "failed to discard view");
            }
            return Err(err);
        }

        tracing::info!(view = %guid, name, "created view");
        Ok(guid)
    }

    /// Load a previously persisted view by guid and initialize it.
    /// Loading an already loaded view is a no-op.
    pub fn load_view(&mut self, guid: &ViewId) -> Result<()> {
        if self.views.contains_key(guid) {
            return Ok(());
        }
        let record = self
            .store
            .view(guid)
            .ok_or(Error::ViewNotFound(*guid))?;

        let view = NotebookView::new(record.guid, record.name.clone());
        self.views.insert(*guid, view);
        self.layout(guid)?.initialize(false)
    }

    pub fn load_all(&mut self) -> Result<()> {
        let guids: Vec<ViewId> = self.store.views().iter().map(|v| v.guid).collect();
        for guid in guids {
            self.load_view(&guid)?;
        }
        Ok(())
    }

    pub fn view(&self, guid: &ViewId) -> Option<&NotebookView> {
        self.views.get(guid)
    }

    pub fn view_mut(&mut self, guid: &ViewId) -> Option<&mut NotebookView> {
        self.views.get_mut(guid)
    }

    /// Layout operations for a loaded view
    pub fn layout(&mut self, guid: &ViewId) -> Result<ViewLayout<'_, S>> {
        let view = self.views.get_mut(guid).ok_or(Error::ViewNotFound(*guid))?;
        Ok(ViewLayout::new(view, &self.notebook, &mut self.store))
    }

    /// Delete a loaded view and forget its in-memory state
    pub fn delete_view(&mut self, guid: &ViewId) -> Result<()> {
        self.layout(guid)?.delete()?;
        self.views.remove(guid);
        Ok(())
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.store.active_view()
    }

    pub fn set_active_view(&mut self, guid: Option<ViewId>) -> Result<()> {
        if let Some(guid) = &guid
            && self.store.view(guid).is_none()
        {
            return Err(Error::ViewNotFound(*guid));
        }
        self.store.set_active_view(guid)?;
        Ok(())
    }

    /// Commit all pending state
    pub fn save(&mut self) -> Result<()> {
        self.store.commit()?;
        Ok(())
    }
}
