use nbviews_types::{CellId, GRID_COLUMNS, Rect};
use serde::Serialize;

/// Where compaction put a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub cell: CellId,
    pub rect: Rect,
    /// The cell was wider than the grid and had its width cut to `GRID_COLUMNS`
    pub clamped: bool,
}

/// Greedy, order-preserving re-pack of cells into the 12-column grid.
///
/// Cells are placed one at a time in the given order. For each cell the
/// candidate origins are scanned row by row, left to right, and the first
/// origin where the cell fits inside the columns without intersecting an
/// already placed cell wins. Sizes are kept, except that a cell wider than
/// the grid is narrowed to the full grid width.
pub fn compact(cells: &[(CellId, Rect)]) -> Vec<Placement> {
    let mut placed: Vec<Rect> = Vec::with_capacity(cells.len());
    let mut placements = Vec::with_capacity(cells.len());

    for (cell, rect) in cells {
        let width = rect.width.min(GRID_COLUMNS);
        let target = first_free_slot(&placed, width, rect.height);
        debug_assert!(target.fits_columns());

        placed.push(target);
        placements.push(Placement {
            cell: cell.clone(),
            rect: target,
            clamped: width != rect.width,
        });
    }

    placements
}

// The first free origin in row-major order sits on row 0 or on the bottom
// edge of a placed rect, so only those rows are candidates. The lowest bottom
// edge has nothing below it and always fits a cell of at most grid width.
fn first_free_slot(placed: &[Rect], width: u32, height: u32) -> Rect {
    let mut rows: Vec<u32> = placed.iter().map(Rect::bottom).collect();
    rows.push(0);
    rows.sort_unstable();
    rows.dedup();

    let last_x = GRID_COLUMNS - width;
    for &y in &rows {
        for x in 0..=last_x {
            let candidate = Rect::new(x, y, width, height);
            if !placed.iter().any(|p| p.intersects(&candidate)) {
                return candidate;
            }
        }
    }

    let floor = rows.last().copied().unwrap_or(0);
    Rect::new(0, floor, width, height)
}
