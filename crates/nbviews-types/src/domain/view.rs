use crate::grid::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, Rect};
use crate::ViewId;
use serde::{Deserialize, Serialize};

/// Persisted identity of a view: guid plus its human-readable name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub guid: ViewId,
    pub name: String,
}

impl ViewRecord {
    pub fn new(guid: ViewId, name: impl Into<String>) -> Self {
        Self {
            guid,
            name: name.into(),
        }
    }
}

/// Placement of one cell inside one view, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellViewMetadata {
    pub guid: ViewId,
    pub hidden: bool,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellViewMetadata {
    /// Visible, full width, at the origin
    pub fn new(guid: ViewId) -> Self {
        Self {
            guid,
            hidden: false,
            x: 0,
            y: 0,
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
        }
    }

    /// Default placement for the cell at `index` in document order:
    /// stacked full-width cells, one default height apart.
    pub fn at_document_index(guid: ViewId, index: usize) -> Self {
        Self {
            y: (index as u32).saturating_mul(DEFAULT_CELL_HEIGHT),
            ..Self::new(guid)
        }
    }

    /// Apply the fields present in `delta`, leaving the others unchanged
    pub fn apply(&mut self, delta: &CellMetadataDelta) {
        if let Some(hidden) = delta.hidden {
            self.hidden = hidden;
        }
        if let Some(x) = delta.x {
            self.x = x;
        }
        if let Some(y) = delta.y {
            self.y = y;
        }
        if let Some(width) = delta.width {
            self.width = width;
        }
        if let Some(height) = delta.height {
            self.height = height;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Partial update of a [`CellViewMetadata`]; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMetadataDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl CellMetadataDelta {
    pub fn hidden(hidden: bool) -> Self {
        Self {
            hidden: Some(hidden),
            ..Self::default()
        }
    }

    pub fn position(x: u32, y: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
    }
}

impl From<&CellViewMetadata> for CellMetadataDelta {
    /// A delta carrying every field of the record
    fn from(meta: &CellViewMetadata) -> Self {
        Self {
            hidden: Some(meta.hidden),
            x: Some(meta.x),
            y: Some(meta.y),
            width: Some(meta.width),
            height: Some(meta.height),
        }
    }
}

/// All per-view records of a single cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellExtensionMetadata {
    pub views: Vec<CellViewMetadata>,
}

impl CellExtensionMetadata {
    pub fn view(&self, guid: &ViewId) -> Option<&CellViewMetadata> {
        self.views.iter().find(|v| &v.guid == guid)
    }

    pub fn view_mut(&mut self, guid: &ViewId) -> Option<&mut CellViewMetadata> {
        self.views.iter_mut().find(|v| &v.guid == guid)
    }

    /// Drop the record for `guid`; returns whether one existed
    pub fn remove_view(&mut self, guid: &ViewId) -> bool {
        let before = self.views.len();
        self.views.retain(|v| &v.guid != guid);
        self.views.len() != before
    }
}
