//! Selection and viewport state shared by [`List`](super::List) and
//! [`Tree`](super::Tree).

use crate::buffer::{Buffer, Cell};
use crate::layout::{Point, Rect};
use crate::style::{symbols, Color, Style};
use unicode_width::UnicodeWidthChar;

/// A selected row plus the first visible row.
///
/// Movement methods take the current row count and keep the selection in
/// `0..len`. The viewport follows the selection when the owning widget
/// draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// Index of the selected row.
    pub selected: usize,
    top_row: usize,
}

impl ScrollState {
    /// First visible row as of the last draw.
    pub const fn top_row(&self) -> usize {
        self.top_row
    }

    /// Move the selection by `amount` rows, clamped to `0..len`.
    pub fn scroll_amount(&mut self, amount: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(amount).min(len - 1);
    }

    /// One row up.
    pub fn scroll_up(&mut self, len: usize) {
        self.scroll_amount(-1, len);
    }

    /// One row down.
    pub fn scroll_down(&mut self, len: usize) {
        self.scroll_amount(1, len);
    }

    /// Jump to the top visible row, or a page up if already there.
    pub fn page_up(&mut self, page: usize, len: usize) {
        if self.selected > self.top_row {
            self.selected = self.top_row;
        } else {
            self.scroll_amount(-(page as isize), len);
        }
    }

    /// A page down.
    pub fn page_down(&mut self, page: usize, len: usize) {
        self.scroll_amount(page as isize, len);
    }

    /// First row.
    pub fn top(&mut self) {
        self.selected = 0;
    }

    /// Last row.
    pub fn bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Move the viewport of `height` rows so the selection is visible.
    pub fn clamp(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected >= self.top_row + height {
            self.top_row = self.selected + 1 - height;
        } else if self.selected < self.top_row {
            self.top_row = self.selected;
        }
    }
}

/// Draw `rows` into `inner` starting at the viewport top, then the scroll
/// indicators.
///
/// `'\n'` cells start a new line. A line that overflows the width ends in
/// an ellipsis and the rest of it is skipped. The selected row is restyled
/// with `selected_style`.
pub(crate) fn draw_rows(
    buffer: &mut Buffer,
    inner: Rect,
    state: &mut ScrollState,
    rows: &[Vec<Cell>],
    selected_style: Style,
) {
    let (min, lim) = (inner.min(), inner.max());
    state.clamp(usize::from(inner.height));

    let mut y = min.y;
    for (index, cells) in rows.iter().enumerate().skip(state.top_row) {
        if y >= lim.y {
            break;
        }
        let mut x = min.x;
        let mut overflowed = false;
        for cell in cells {
            if y >= lim.y {
                break;
            }
            if cell.ch == '\n' {
                x = min.x;
                y += 1;
                overflowed = false;
                continue;
            }
            if overflowed {
                continue;
            }

            let style = if index == state.selected {
                selected_style
            } else {
                cell.style
            };
            let width = cell.ch.width().unwrap_or(0) as i32;
            if x + width > lim.x {
                buffer.set_cell(Point::new(lim.x - 1, y), Cell::styled(symbols::ELLIPSIS, style));
                overflowed = true;
                continue;
            }
            buffer.set_cell(Point::new(x, y), Cell::styled(cell.ch, style));
            x += width;
        }
        y += 1;
    }

    let arrow = Style::new(Color::WHITE);
    if state.top_row > 0 {
        buffer.set_cell(Point::new(lim.x - 1, min.y), Cell::styled(symbols::UP_ARROW, arrow));
    }
    if rows.len() > state.top_row + usize::from(inner.height) {
        buffer.set_cell(Point::new(lim.x - 1, lim.y - 1), Cell::styled(symbols::DOWN_ARROW, arrow));
    }
}
