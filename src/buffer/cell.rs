//! Cell: one terminal character position's glyph and style.
//!
//! A cell has no coordinate of its own; position is the key it is stored
//! under in a [`Buffer`](super::Buffer) or [`FrameBuffer`](super::FrameBuffer).

use crate::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthChar;

/// A single glyph with its style.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The glyph.
    pub ch: char,
    /// Colors and attributes.
    pub style: Style,
}

const _: () = assert!(std::mem::size_of::<Cell>() <= 16);

impl Cell {
    /// A blank cell in terminal-default colors.
    pub const CLEAR: Self = Self {
        ch: ' ',
        style: Style::CLEAR,
    };

    /// Create a cell with default style.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            style: Style::CLEAR,
        }
    }

    /// Create a cell with the given style.
    #[inline]
    pub const fn styled(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.style.fg = fg;
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.style.bg = bg;
        self
    }

    /// Set the modifiers.
    #[inline]
    #[must_use]
    pub const fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.style.modifier = modifier;
        self
    }

    /// Replace the whole style.
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Columns the glyph occupies (0 for control characters, 2 for wide glyphs).
    #[inline]
    pub fn display_width(&self) -> u8 {
        self.ch.width().unwrap_or(0) as u8
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::CLEAR
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({:?}, {:?})", self.ch, self.style)
    }
}
