use nbviews_types::{Cell, GRID_COLUMNS, Rect};
use owo_colors::OwoColorize;

/// Characters used to draw one grid column
pub const CHARS_PER_COLUMN: usize = 2;

/// Rows below this are summarized instead of drawn
pub const MAX_RENDERED_ROWS: usize = 120;

const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Clone, Copy, PartialEq)]
enum Slot {
    Empty,
    Cell(usize),
    Overlap,
}

/// Draw displayed cells on the 12-column grid, one text row per grid row,
/// followed by a legend mapping labels to cells.
///
/// Cells that overlap are drawn with `#`; anything right of the last
/// column is clipped.
pub fn render_grid(cells: &[(&Cell, Rect)], color: bool) -> String {
    if cells.is_empty() {
        return "(no cells displayed)\n".to_string();
    }

    let width = GRID_COLUMNS as usize * CHARS_PER_COLUMN;
    let rows = cells.iter().map(|(_, r)| r.bottom()).max().unwrap_or(0) as usize;
    let drawn_rows = rows.min(MAX_RENDERED_ROWS);

    let mut canvas = vec![vec![Slot::Empty; width]; drawn_rows];
    for (index, (_, rect)) in cells.iter().enumerate() {
        let last_column = rect.right().min(GRID_COLUMNS) as usize;
        for row in canvas
            .iter_mut()
            .take(rect.bottom() as usize)
            .skip(rect.y as usize)
        {
            for column in rect.x as usize..last_column {
                for slot in &mut row[column * CHARS_PER_COLUMN..(column + 1) * CHARS_PER_COLUMN] {
                    *slot = match *slot {
                        Slot::Empty => Slot::Cell(index),
                        _ => Slot::Overlap,
                    };
                }
            }
        }
    }

    let border = format!("+{}+\n", "-".repeat(width));
    let mut out = border.clone();
    for row in &canvas {
        out.push('|');
        for slot in row {
            match slot {
                Slot::Empty => out.push('.'),
                Slot::Overlap => out.push('#'),
                Slot::Cell(index) => out.push_str(&paint(label(*index), *index, color)),
            }
        }
        out.push_str("|\n");
    }
    if rows > drawn_rows {
        out.push_str(&format!("  ... {} more rows\n", rows - drawn_rows));
    }
    out.push_str(&border);

    for (index, (cell, rect)) in cells.iter().enumerate() {
        let line = format!(
            "{}  {}  {},{} {}x{}  {}",
            paint(label(index), index, color),
            cell.id,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            cell.snippet(40)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn label(index: usize) -> char {
    LABELS.get(index).map_or('*', |b| *b as char)
}

fn paint(label: char, index: usize, color: bool) -> String {
    if !color {
        return label.to_string();
    }
    match index % 6 {
        0 => label.cyan().to_string(),
        1 => label.green().to_string(),
        2 => label.yellow().to_string(),
        3 => label.magenta().to_string(),
        4 => label.blue().to_string(),
        _ => label.red().to_string(),
    }
}
