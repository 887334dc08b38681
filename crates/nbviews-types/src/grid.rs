use serde::{Deserialize, Serialize};

/// Number of columns in the view grid. Rows are unbounded.
pub const GRID_COLUMNS: u32 = 12;

/// Width given to a cell the first time it is placed in a view
pub const DEFAULT_CELL_WIDTH: u32 = GRID_COLUMNS;

/// Height given to a cell the first time it is placed in a view
pub const DEFAULT_CELL_HEIGHT: u32 = 4;

/// Axis-aligned rectangle in grid units
///
/// Rectangles are half-open: a rect covers columns `[x, x + width)` and rows
/// `[y, y + height)`. Two rects that only share an edge do not intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True iff both axis projections overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether the rect lies within the grid's column range
    pub fn fits_columns(&self) -> bool {
        self.right() <= GRID_COLUMNS
    }
}
