//! Grid of markup text cells.

use super::text::{cells_width, cells_with_x};
use super::{block_drawable, Block};
use crate::buffer::{Buffer, Cell};
use crate::layout::{Alignment, Point, Rect};
use crate::markup::parse_styles;
use crate::style::{symbols, Style, Theme};
use std::collections::HashMap;

/// Adjusts `column_widths` before each draw, given the rows and inner area.
pub type ColumnResizer = Box<dyn FnMut(&mut Vec<u16>, &[Vec<String>], Rect) + Send>;

/// Rows of text cells laid out in fixed-width columns.
///
/// Without explicit `column_widths` every column gets an equal share of the
/// inner width, counted from the first row. Text wider than its column is
/// always drawn left-aligned and cut with an ellipsis.
pub struct Table {
    /// Chrome and geometry.
    pub block: Block,
    /// Table rows; each entry may contain markup.
    pub rows: Vec<Vec<String>>,
    /// Column widths; empty for equal shares.
    pub column_widths: Vec<u16>,
    /// Style for unmarked text.
    pub text_style: Style,
    /// Placement of text that fits its column.
    pub alignment: Alignment,
    /// Per-row style overrides, keyed by row index.
    pub row_styles: HashMap<usize, Style>,
    /// Horizontal rules between rows.
    pub row_separator: bool,
    /// Vertical rules between columns.
    pub column_separator: bool,
    /// Paint the whole row width in the row style.
    pub fill_row: bool,
    /// Called at the start of every draw, before widths are resolved.
    pub column_resizer: Option<ColumnResizer>,
}

impl Table {
    /// Empty table styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            rows: Vec::new(),
            column_widths: Vec::new(),
            text_style: theme.table.text,
            alignment: Alignment::Left,
            row_styles: HashMap::new(),
            row_separator: true,
            column_separator: true,
            fill_row: false,
            column_resizer: None,
        }
    }

    fn resolved_widths(&self, inner: Rect) -> Vec<i32> {
        if !self.column_widths.is_empty() {
            return self.column_widths.iter().map(|&w| i32::from(w)).collect();
        }
        match self.rows.first().map(Vec::len) {
            Some(count) if count > 0 => vec![i32::from(inner.width) / count as i32; count],
            _ => Vec::new(),
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let inner = self.block.inner();
        if let Some(resize) = self.column_resizer.as_mut() {
            resize(&mut self.column_widths, &self.rows, inner);
        }
        let (min, lim) = (inner.min(), inner.max());
        let widths = self.resolved_widths(inner);
        let separator_style = self.block.border_style;
        let put = |buffer: &mut Buffer, point: Point, cell: Cell| {
            if inner.contains_point(point) {
                buffer.set_cell(point, cell);
            }
        };

        let mut y = min.y;
        for (i, row) in self.rows.iter().enumerate() {
            if y >= lim.y {
                break;
            }
            let row_style = self.row_styles.get(&i).copied().unwrap_or(self.text_style);
            if self.fill_row {
                buffer.fill(Cell::styled(' ', row_style), Rect::from_corners(min.x, y, lim.x, y + 1));
            }

            let mut col_x = min.x;
            for (text, &width) in row.iter().zip(&widths) {
                let cells = parse_styles(text, row_style);
                let len = cells_width(&cells) as i32;

                if len > width || self.alignment == Alignment::Left {
                    for (k, mut cell) in cells_with_x(&cells) {
                        if k >= width || col_x + k >= lim.x {
                            cell.ch = symbols::ELLIPSIS;
                            put(buffer, Point::new(col_x + k - 1, y), cell);
                            break;
                        }
                        put(buffer, Point::new(col_x + k, y), cell);
                    }
                } else {
                    let start = match self.alignment {
                        Alignment::Center => col_x + (width - len) / 2,
                        _ => (col_x + width).min(lim.x) - len,
                    };
                    for (k, cell) in cells_with_x(&cells) {
                        put(buffer, Point::new(start + k, y), cell);
                    }
                }
                col_x += width + 1;
            }

            if self.column_separator {
                let mut x = min.x;
                for &width in widths.iter().take(widths.len().saturating_sub(1)) {
                    x += width;
                    let bg = if self.fill_row { row_style.bg } else { separator_style.bg };
                    let cell = Cell::styled(symbols::VERTICAL_LINE, separator_style.bg(bg));
                    put(buffer, Point::new(x, y), cell);
                    x += 1;
                }
            }

            y += 1;
            if self.row_separator && y < lim.y && i + 1 != self.rows.len() {
                buffer.fill(
                    Cell::styled(symbols::HORIZONTAL_LINE, separator_style),
                    Rect::from_corners(min.x, y, lim.x, y + 1),
                );
                y += 1;
            }
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(Table);
