//! Text helpers for cell runs: width, truncation, wrapping and splitting.

use crate::buffer::Cell;
use crate::style::symbols::ELLIPSIS;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a cell run.
pub fn cells_width(cells: &[Cell]) -> usize {
    cells.iter().map(|c| usize::from(c.display_width())).sum()
}

/// Shorten `text` to at most `width` columns, ending in `…` when cut.
pub fn trim_string(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Cell-run version of [`trim_string`]; the ellipsis takes the style of
/// the first dropped cell.
pub fn trim_cells(cells: &[Cell], width: usize) -> Vec<Cell> {
    if cells_width(cells) <= width {
        return cells.to_vec();
    }
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(width);
    let mut used = 0;
    for cell in cells {
        let w = usize::from(cell.display_width());
        if used + w > width - 1 {
            out.push(Cell::styled(ELLIPSIS, cell.style));
            break;
        }
        out.push(*cell);
        used += w;
    }
    out
}

/// Split on every `separator` cell. Empty segments are kept so blank lines
/// survive.
pub fn split_cells(cells: &[Cell], separator: char) -> Vec<Vec<Cell>> {
    cells
        .split(|c| c.ch == separator)
        .map(<[Cell]>::to_vec)
        .collect()
}

/// Greedy word wrap at `width` columns.
///
/// Breaks only at whitespace by replacing the whitespace run before an
/// overflowing word with a `'\n'` cell; a single word wider than `width`
/// stays on its own line unbroken.
pub fn wrap_cells(cells: &[Cell], width: usize) -> Vec<Cell> {
    if width == 0 {
        return cells.to_vec();
    }
    let text: String = cells.iter().map(|c| c.ch).collect();
    let mut out = Vec::with_capacity(cells.len());
    let mut line_width = 0;
    let mut pending: &[Cell] = &[];
    let mut index = 0;

    for segment in text.split_word_bounds() {
        let len = segment.chars().count();
        let run = &cells[index..index + len];
        index += len;

        if segment == "\n" {
            out.extend_from_slice(pending);
            out.extend_from_slice(run);
            pending = &[];
            line_width = 0;
        } else if segment.chars().all(char::is_whitespace) {
            out.extend_from_slice(pending);
            pending = run;
        } else {
            let word_width = segment.width();
            let pending_width = cells_width(pending);
            if line_width > 0 && line_width + pending_width + word_width > width {
                let style = pending.first().map_or(run[0].style, |c| c.style);
                out.push(Cell::styled('\n', style));
                line_width = word_width;
            } else {
                out.extend_from_slice(pending);
                line_width += pending_width + word_width;
            }
            pending = &[];
            out.extend_from_slice(run);
        }
    }
    out.extend_from_slice(pending);
    out
}

/// Pair each cell with its column offset from the start of the run.
pub fn cells_with_x(cells: &[Cell]) -> Vec<(i32, Cell)> {
    let mut x = 0;
    cells
        .iter()
        .map(|cell| {
            let positioned = (x, *cell);
            x += i32::from(cell.display_width());
            positioned
        })
        .collect()
}
