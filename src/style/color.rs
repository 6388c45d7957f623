//! Color, Modifier and Style: the attribute triple carried by every cell.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// 24-bit colour.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Colour from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Colour from `0xRRGGBB`.
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A terminal color.
///
/// `Clear` is not a color: it tells the backend to leave the terminal's
/// own default in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    /// Inherit the terminal default.
    #[default]
    Clear,
    /// Entry of the 256-color palette.
    Indexed(u8),
    /// 24-bit color.
    Rgb(Rgb),
}

impl Color {
    /// Palette entry 0.
    pub const BLACK: Self = Self::Indexed(0);
    /// Palette entry 1.
    pub const RED: Self = Self::Indexed(1);
    /// Palette entry 2.
    pub const GREEN: Self = Self::Indexed(2);
    /// Palette entry 3.
    pub const YELLOW: Self = Self::Indexed(3);
    /// Palette entry 4.
    pub const BLUE: Self = Self::Indexed(4);
    /// Palette entry 5.
    pub const MAGENTA: Self = Self::Indexed(5);
    /// Palette entry 6.
    pub const CYAN: Self = Self::Indexed(6);
    /// Palette entry 7.
    pub const WHITE: Self = Self::Indexed(7);

    /// The seven non-black named colors, in palette order.
    pub const STANDARD: [Self; 7] = [
        Self::RED,
        Self::GREEN,
        Self::YELLOW,
        Self::BLUE,
        Self::MAGENTA,
        Self::CYAN,
        Self::WHITE,
    ];

    /// Whether this is the terminal-default marker.
    #[inline]
    pub const fn is_clear(self) -> bool {
        matches!(self, Self::Clear)
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => f.write_str("Clear"),
            Self::Indexed(n) => write!(f, "Indexed({n})"),
            Self::Rgb(rgb) => write!(f, "{rgb:?}"),
        }
    }
}

impl From<Rgb> for Color {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

bitflags! {
    /// Text attributes.
    ///
    /// # Example
    /// ```
    /// use trellis::Modifier;
    /// let m = Modifier::BOLD | Modifier::UNDERLINE;
    /// assert!(m.contains(Modifier::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifier: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Foreground and background swapped
        const REVERSED = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Foreground, background and attributes of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Attributes.
    pub modifier: Modifier,
}

impl Style {
    /// Terminal defaults, no attributes.
    pub const CLEAR: Self = Self {
        fg: Color::Clear,
        bg: Color::Clear,
        modifier: Modifier::empty(),
    };

    /// Style with the given foreground and everything else clear.
    #[inline]
    pub const fn new(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Clear,
            modifier: Modifier::empty(),
        }
    }

    /// Replace the foreground.
    #[inline]
    #[must_use]
    pub const fn fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Replace the background.
    #[inline]
    #[must_use]
    pub const fn bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Replace the attributes.
    #[inline]
    #[must_use]
    pub const fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Style({:?} on {:?}", self.fg, self.bg)?;
        if !self.modifier.is_empty() {
            write!(f, ", {:?}", self.modifier)?;
        }
        f.write_str(")")
    }
}

/// Pick `palette[index % len]`, or white for an empty palette.
#[inline]
pub fn select_color(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        return Color::WHITE;
    }
    palette[index % palette.len()]
}

/// Pick `palette[index % len]`, or [`Style::CLEAR`] for an empty palette.
#[inline]
pub fn select_style(palette: &[Style], index: usize) -> Style {
    if palette.is_empty() {
        return Style::CLEAR;
    }
    palette[index % palette.len()]
}
