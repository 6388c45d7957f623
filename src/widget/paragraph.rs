//! Block of markup text.

use super::text::{cells_with_x, split_cells, trim_cells, wrap_cells};
use super::{block_drawable, Block};
use crate::buffer::Buffer;
use crate::layout::Point;
use crate::markup::parse_styles;
use crate::style::{Style, Theme};

/// Multi-line text with inline style markup.
///
/// Lines that still overflow after wrapping are cut with an ellipsis; lines
/// below the block are dropped.
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// Chrome and geometry.
    pub block: Block,
    /// Text, may contain markup and `'\n'`.
    pub text: String,
    /// Style for unmarked text.
    pub text_style: Style,
    /// Word wrap at the inner width.
    pub wrap: bool,
}

impl Paragraph {
    /// Empty paragraph styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            text: String::new(),
            text_style: theme.paragraph.text,
            wrap: true,
        }
    }

    /// Builder: set the text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let inner = self.block.inner();
        let width = usize::from(inner.width);

        let mut cells = parse_styles(&self.text, self.text_style);
        if self.wrap {
            cells = wrap_cells(&cells, width);
        }

        let origin = inner.min();
        for (y, line) in split_cells(&cells, '\n').iter().enumerate() {
            let y = origin.y + y as i32;
            if y >= inner.max().y {
                break;
            }
            for (x, cell) in cells_with_x(&trim_cells(line, width)) {
                let point = Point::new(origin.x + x, y);
                if inner.contains_point(point) {
                    buffer.set_cell(point, cell);
                }
            }
        }
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(Paragraph);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Modifier};
    use crate::widget::testing::{render, row};
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> Paragraph {
        let mut paragraph = Paragraph::default().text(text);
        paragraph.block = Block::plain();
        paragraph
    }

    #[test]
    fn test_wraps_at_width() {
        let mut paragraph = paragraph("cells are diffed each frame");
        let buffer = render(&mut paragraph, 10, 3);
        assert_eq!(row(&buffer, 0), "cells are ");
        assert_eq!(row(&buffer, 1), "diffed    ");
        assert_eq!(row(&buffer, 2), "each frame");
    }

    #[test]
    fn test_markup_styles_span() {
        let mut paragraph = paragraph("a [warn](fg:yellow,mod:bold) b");
        let buffer = render(&mut paragraph, 12, 1);
        assert_eq!(row(&buffer, 0), "a warn b    ");
        let warn = buffer.get(Point::new(2, 0)).unwrap();
        assert_eq!(warn.style.fg, Color::YELLOW);
        assert!(warn.style.modifier.contains(Modifier::BOLD));
        assert_eq!(buffer.get(Point::new(0, 0)).map(|c| c.style), Some(paragraph.text_style));
    }

    #[test]
    fn test_unwrapped_lines_trimmed() {
        let mut paragraph = paragraph("short\nsomewhat longer");
        paragraph.wrap = false;
        let buffer = render(&mut paragraph, 8, 2);
        assert_eq!(row(&buffer, 0), "short   ");
        assert_eq!(row(&buffer, 1), "somewha…");
    }

    #[test]
    fn test_blank_lines_kept_and_overflow_dropped() {
        let mut paragraph = paragraph("one\n\nthree\nfour");
        let buffer = render(&mut paragraph, 5, 3);
        assert_eq!(row(&buffer, 0), "one  ");
        assert_eq!(row(&buffer, 1), "     ");
        assert_eq!(row(&buffer, 2), "three");
    }
}
