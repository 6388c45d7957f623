//! Block: the geometry, border and title every widget embeds.
//!
//! ```text
//!  margin
//!  ┌ title ─────────┐
//!  │ padding        │
//!  │   ┌────────┐   │
//!  │   │ inner  │   │
//!  │   └────────┘   │
//!  └────────────────┘
//! ```
//!
//! The allotted rectangle is shrunk by the margin to get the painted
//! rectangle; the border (on enabled sides) and the padding shrink that
//! further to the inner rectangle widgets draw their content in.

use crate::buffer::{Buffer, Cell};
use crate::layout::{Point, Rect};
use crate::style::symbols::{self, BorderSet};
use crate::style::{Style, Theme};
use crate::widget::text::trim_string;
use bitflags::bitflags;

/// Border glyph flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    /// `┌─┐`
    #[default]
    Single,
    /// `╔═╗`
    Double,
    /// `╭─╮`
    Rounded,
}

impl BorderType {
    /// Glyphs for this flavor.
    pub const fn symbols(self) -> BorderSet {
        match self {
            Self::Single => symbols::SINGLE,
            Self::Double => symbols::DOUBLE,
            Self::Rounded => symbols::ROUNDED,
        }
    }
}

bitflags! {
    /// Which sides of a block carry a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Borders: u8 {
        /// Left edge.
        const LEFT = 0b0001;
        /// Top edge.
        const TOP = 0b0010;
        /// Right edge.
        const RIGHT = 0b0100;
        /// Bottom edge.
        const BOTTOM = 0b1000;
        /// All four edges.
        const ALL = Self::LEFT.bits() | Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits();
    }
}

/// Per-side spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spacing {
    /// Left.
    pub left: u16,
    /// Top.
    pub top: u16,
    /// Right.
    pub right: u16,
    /// Bottom.
    pub bottom: u16,
}

impl Spacing {
    /// No spacing.
    pub const ZERO: Self = Self::uniform(0);

    /// Same spacing on every side.
    pub const fn uniform(n: u16) -> Self {
        Self {
            left: n,
            top: n,
            right: n,
            bottom: n,
        }
    }

    /// Explicit sides.
    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Optional style overrides for individual border sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideStyles {
    /// Left edge.
    pub left: Option<Style>,
    /// Top edge and its corners.
    pub top: Option<Style>,
    /// Right edge.
    pub right: Option<Style>,
    /// Bottom edge and its corners.
    pub bottom: Option<Style>,
}

/// Shared widget chrome.
#[derive(Debug, Clone)]
pub struct Block {
    /// Whether to draw a border at all.
    pub border: bool,
    /// Sides that get a border.
    pub borders: Borders,
    /// Glyph flavor.
    pub border_type: BorderType,
    /// Style for border sides without an override.
    pub border_style: Style,
    /// Per-side overrides.
    pub side_styles: SideStyles,
    /// Title drawn over the top edge.
    pub title: String,
    /// Title style.
    pub title_style: Style,
    /// Space between border and content.
    pub padding: Spacing,
    /// Space outside the border.
    pub margin: Spacing,
    /// Fill for the painted rectangle; `None` leaves cells clear.
    pub background: Option<Style>,
    /// Draw the border in `focus_style`.
    pub focused: bool,
    /// Border style while focused.
    pub focus_style: Style,
    area: Rect,
    rect: Rect,
    inner: Rect,
}

impl Block {
    /// Bordered block styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            border: true,
            borders: Borders::ALL,
            border_type: BorderType::Single,
            border_style: theme.block.border,
            side_styles: SideStyles::default(),
            title: String::new(),
            title_style: theme.block.title,
            padding: Spacing::uniform(1),
            margin: Spacing::ZERO,
            background: Some(theme.default),
            focused: false,
            focus_style: theme.block.title,
            area: Rect::ZERO,
            rect: Rect::ZERO,
            inner: Rect::ZERO,
        }
    }

    /// No border, padding or background.
    pub fn plain() -> Self {
        let mut block = Self::new(&Theme::default());
        block.border = false;
        block.padding = Spacing::ZERO;
        block.background = None;
        block
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set padding and recompute the inner rectangle.
    pub fn set_padding(&mut self, padding: Spacing) {
        self.padding = padding;
        self.set_area(self.area);
    }

    /// Set margin and recompute the inner rectangle.
    pub fn set_margin(&mut self, margin: Spacing) {
        self.margin = margin;
        self.set_area(self.area);
    }

    /// Enable or disable the border and recompute the inner rectangle.
    pub fn set_border(&mut self, border: bool) {
        self.border = border;
        self.set_area(self.area);
    }

    /// The allotted rectangle.
    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// The allotted rectangle minus margins.
    #[inline]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// The content rectangle.
    #[inline]
    pub const fn inner(&self) -> Rect {
        self.inner
    }

    /// Assign the allotted rectangle and derive the painted and inner ones.
    pub fn set_area(&mut self, area: Rect) {
        let m = self.margin;
        self.area = area;
        self.rect = area.inset(m.left, m.top, m.right, m.bottom);

        let side = |flag: Borders| u16::from(self.border && self.borders.contains(flag));
        let p = self.padding;
        self.inner = self.rect.inset(
            side(Borders::LEFT) + p.left,
            side(Borders::TOP) + p.top,
            side(Borders::RIGHT) + p.right,
            side(Borders::BOTTOM) + p.bottom,
        );
    }

    /// Whether a screen position falls on the painted rectangle.
    pub const fn hit(&self, x: u16, y: u16) -> bool {
        self.rect.contains(x, y)
    }

    /// Paint background, border and title.
    pub fn draw(&self, buffer: &mut Buffer) {
        if self.rect.is_empty() {
            return;
        }
        if let Some(background) = self.background {
            buffer.fill(Cell::styled(' ', background), self.rect);
        }
        if self.border {
            self.draw_border(buffer);
        }
        if !self.title.is_empty() {
            let room = usize::from(self.rect.width.saturating_sub(4));
            let title = trim_string(&self.title, room);
            buffer.set_string(&title, self.title_style, self.rect.min().offset(2, 0));
        }
    }

    fn side_style(&self, side: Option<Style>) -> Style {
        if self.focused {
            self.focus_style
        } else {
            side.unwrap_or(self.border_style)
        }
    }

    fn draw_border(&self, buffer: &mut Buffer) {
        let glyphs = self.border_type.symbols();
        let (min, max) = (self.rect.min(), self.rect.max());
        let (right, bottom) = (max.x - 1, max.y - 1);
        let top_style = self.side_style(self.side_styles.top);
        let bottom_style = self.side_style(self.side_styles.bottom);
        let left_style = self.side_style(self.side_styles.left);
        let right_style = self.side_style(self.side_styles.right);

        let (has_left, has_top, has_right, has_bottom) = (
            self.borders.contains(Borders::LEFT),
            self.borders.contains(Borders::TOP),
            self.borders.contains(Borders::RIGHT),
            self.borders.contains(Borders::BOTTOM),
        );

        for x in min.x..max.x {
            if has_top {
                buffer.set_cell(Point::new(x, min.y), Cell::styled(glyphs.horizontal, top_style));
            }
            if has_bottom {
                buffer.set_cell(Point::new(x, bottom), Cell::styled(glyphs.horizontal, bottom_style));
            }
        }
        for y in min.y..max.y {
            if has_left {
                buffer.set_cell(Point::new(min.x, y), Cell::styled(glyphs.vertical, left_style));
            }
            if has_right {
                buffer.set_cell(Point::new(right, y), Cell::styled(glyphs.vertical, right_style));
            }
        }

        let corners = [
            (has_top && has_left, Point::new(min.x, min.y), glyphs.top_left, top_style),
            (has_top && has_right, Point::new(right, min.y), glyphs.top_right, top_style),
            (has_bottom && has_left, Point::new(min.x, bottom), glyphs.bottom_left, bottom_style),
            (has_bottom && has_right, Point::new(right, bottom), glyphs.bottom_right, bottom_style),
        ];
        for (enabled, point, ch, style) in corners {
            if enabled {
                buffer.set_cell(point, Cell::styled(ch, style));
            }
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buffer: &Buffer, y: i32, width: i32) -> String {
        (0..width)
            .map(|x| buffer.get(Point::new(x, y)).map_or('?', |c| c.ch))
            .collect()
    }

    #[test]
    fn test_inner_with_border_and_padding() {
        let mut block = Block::default();
        block.set_area(Rect::new(0, 0, 20, 10));
        assert_eq!(block.inner(), Rect::new(2, 2, 16, 6));

        block.set_padding(Spacing::ZERO);
        assert_eq!(block.inner(), Rect::new(1, 1, 18, 8));

        block.set_border(false);
        assert_eq!(block.inner(), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn test_margin_shrinks_painted_rect() {
        let mut block = Block::default();
        block.set_margin(Spacing::new(1, 0, 1, 0));
        block.set_area(Rect::new(0, 0, 10, 4));
        assert_eq!(block.area(), Rect::new(0, 0, 10, 4));
        assert_eq!(block.rect(), Rect::new(1, 0, 8, 4));
        assert!(!block.hit(0, 0));
        assert!(block.hit(1, 0));
    }

    #[test]
    fn test_draw_border_and_title() {
        let mut block = Block::default().title("cpu");
        block.set_area(Rect::new(0, 0, 8, 3));
        let mut buffer = Buffer::new(block.area());
        block.draw(&mut buffer);

        assert_eq!(row(&buffer, 0, 8), "┌─cpu──┐");
        assert_eq!(row(&buffer, 1, 8), "│      │");
        assert_eq!(row(&buffer, 2, 8), "└──────┘");
    }

    #[test]
    fn test_rounded_partial_borders() {
        let mut block = Block::default();
        block.border_type = BorderType::Rounded;
        block.borders = Borders::TOP | Borders::LEFT;
        block.set_area(Rect::new(0, 0, 4, 2));
        let mut buffer = Buffer::new(block.area());
        block.draw(&mut buffer);

        assert_eq!(row(&buffer, 0, 4), "╭───");
        assert_eq!(row(&buffer, 1, 4), "│   ");
    }

    #[test]
    fn test_focus_overrides_border_style() {
        let theme = Theme::default();
        let mut block = Block::new(&theme);
        block.focused = true;
        block.focus_style = Style::new(crate::style::Color::YELLOW);
        block.set_area(Rect::new(0, 0, 3, 3));
        let mut buffer = Buffer::new(block.area());
        block.draw(&mut buffer);
        assert_eq!(buffer.get(Point::new(0, 1)).map(|c| c.style), Some(block.focus_style));
    }

    #[test]
    fn test_long_title_trimmed() {
        let mut block = Block::default().title("a very long title");
        block.set_area(Rect::new(0, 0, 10, 3));
        let mut buffer = Buffer::new(block.area());
        block.draw(&mut buffer);
        assert_eq!(row(&buffer, 0, 10), "┌─a ver…─┐");
    }
}
