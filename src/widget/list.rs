//! Scrollable list of markup rows.

use super::scroll::draw_rows;
use super::text::wrap_cells;
use super::{block_drawable, Block, ScrollState};
use crate::buffer::{Buffer, Cell};
use crate::markup::parse_styles;
use crate::style::{Style, Theme};

/// Rows of text with one selected row.
///
/// Each row is parsed for style markup on its own, so an unclosed span in
/// one row never bleeds into the next.
#[derive(Debug, Clone)]
pub struct List {
    /// Chrome and geometry.
    pub block: Block,
    /// Row text, may contain markup.
    pub rows: Vec<String>,
    /// Style for unmarked text.
    pub text_style: Style,
    /// Style applied to every cell of the selected row.
    pub selected_row_style: Style,
    /// Word wrap long rows onto following lines.
    pub wrap: bool,
    /// Selection and viewport.
    pub scroll: ScrollState,
}

impl List {
    /// Empty list styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            rows: Vec::new(),
            text_style: theme.list.text,
            selected_row_style: theme.list.text,
            wrap: true,
            scroll: ScrollState::default(),
        }
    }

    /// Index of the selected row.
    pub const fn selected(&self) -> usize {
        self.scroll.selected
    }

    /// Move the selection by `amount` rows.
    pub fn scroll_amount(&mut self, amount: isize) {
        self.scroll.scroll_amount(amount, self.rows.len());
    }

    /// Select the previous row.
    pub fn scroll_up(&mut self) {
        self.scroll.scroll_up(self.rows.len());
    }

    /// Select the next row.
    pub fn scroll_down(&mut self) {
        self.scroll.scroll_down(self.rows.len());
    }

    /// Select the top visible row, or move a page up.
    pub fn page_up(&mut self) {
        let page = self.page();
        self.scroll.page_up(page, self.rows.len());
    }

    /// Move a page down.
    pub fn page_down(&mut self) {
        let page = self.page();
        self.scroll.page_down(page, self.rows.len());
    }

    /// Select the first row.
    pub fn scroll_top(&mut self) {
        self.scroll.top();
    }

    /// Select the last row.
    pub fn scroll_bottom(&mut self) {
        self.scroll.bottom(self.rows.len());
    }

    fn page(&self) -> usize {
        usize::from(self.block.inner().height)
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let inner = self.block.inner();
        let rows: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .map(|row| {
                let cells = parse_styles(row, self.text_style);
                if self.wrap {
                    wrap_cells(&cells, usize::from(inner.width))
                } else {
                    cells
                }
            })
            .collect();
        draw_rows(buffer, inner, &mut self.scroll, &rows, self.selected_row_style);
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(List);
