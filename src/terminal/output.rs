//! Byte accumulator for one frame of ANSI output.

use crate::style::{Color, Modifier};
use std::io::Write;

/// SGR codes for each text attribute.
const MODIFIER_CODES: [(Modifier, u8); 8] = [
    (Modifier::BOLD, 1),
    (Modifier::DIM, 2),
    (Modifier::ITALIC, 3),
    (Modifier::UNDERLINE, 4),
    (Modifier::BLINK, 5),
    (Modifier::REVERSED, 7),
    (Modifier::HIDDEN, 8),
    (Modifier::STRIKETHROUGH, 9),
];

/// Escape sequences and glyphs collected for a frame.
///
/// Everything for one frame goes out in a single `write_all`, so the
/// terminal never shows it half drawn.
pub struct OutputBuffer {
    bytes: Vec<u8>,
}

impl OutputBuffer {
    /// Room for roughly a full redraw of a small terminal.
    const DEFAULT_CAPACITY: usize = 4096;

    /// Empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Empty buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Drop the contents, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Bytes queued so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Nothing queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Queue one glyph as UTF-8.
    #[inline]
    pub fn write_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.bytes.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Position the cursor at zero-based column `x`, row `y`.
    ///
    /// Terminals count from one and let both numbers default to it, so the
    /// home position and first-column moves get shorter sequences.
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let (col, row) = (u32::from(x) + 1, u32::from(y) + 1);
        let _ = match (col, row) {
            (1, 1) => write!(self.bytes, "\x1b[H"),
            (1, _) => write!(self.bytes, "\x1b[{row}H"),
            _ => write!(self.bytes, "\x1b[{row};{col}H"),
        };
    }

    /// Foreground colour; [`Color::Clear`] selects the terminal default.
    #[inline]
    pub fn set_fg(&mut self, color: Color) {
        self.sgr_color(30, color);
    }

    /// Background colour; [`Color::Clear`] selects the terminal default.
    #[inline]
    pub fn set_bg(&mut self, color: Color) {
        self.sgr_color(40, color);
    }

    /// `base` is 30 for foreground, 40 for background.
    fn sgr_color(&mut self, base: u8, color: Color) {
        let _ = match color {
            Color::Clear => write!(self.bytes, "\x1b[{}m", base + 9),
            Color::Indexed(n) => write!(self.bytes, "\x1b[{};5;{n}m", base + 8),
            Color::Rgb(c) => write!(self.bytes, "\x1b[{};2;{};{};{}m", base + 8, c.r, c.g, c.b),
        };
    }

    /// Switch on every attribute set in `modifier`.
    pub fn set_modifiers(&mut self, modifier: Modifier) {
        for (flag, code) in MODIFIER_CODES {
            if modifier.contains(flag) {
                let _ = write!(self.bytes, "\x1b[{code}m");
            }
        }
    }

    /// SGR 0: colours and attributes back to the terminal default.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.bytes.extend_from_slice(b"\x1b[0m");
    }

    /// Erase the whole display.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.bytes.extend_from_slice(b"\x1b[2J");
    }

    /// Write everything queued to `writer` and flush it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.bytes)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgb;

    fn emitted(f: impl FnOnce(&mut OutputBuffer)) -> Vec<u8> {
        let mut output = OutputBuffer::new();
        f(&mut output);
        output.as_bytes().to_vec()
    }

    #[test]
    fn test_cursor_sequences_shortened() {
        assert_eq!(emitted(|o| o.cursor_move(0, 0)), b"\x1b[H");
        assert_eq!(emitted(|o| o.cursor_move(0, 5)), b"\x1b[6H");
        assert_eq!(emitted(|o| o.cursor_move(10, 5)), b"\x1b[6;11H");
    }

    #[test]
    fn test_color_sequences() {
        let bytes = emitted(|o| {
            o.set_fg(Color::Clear);
            o.set_fg(Color::RED);
            o.set_bg(Color::Rgb(Rgb::new(1, 2, 3)));
            o.set_bg(Color::Clear);
        });
        assert_eq!(bytes, b"\x1b[39m\x1b[38;5;1m\x1b[48;2;1;2;3m\x1b[49m");
    }

    #[test]
    fn test_modifier_sequences() {
        let bytes = emitted(|o| o.set_modifiers(Modifier::BOLD | Modifier::REVERSED));
        assert_eq!(bytes, b"\x1b[1m\x1b[7m");
    }

    #[test]
    fn test_flush_writes_everything() {
        let mut output = OutputBuffer::new();
        output.write_char('é');
        output.reset_attrs();
        let mut sink = Vec::new();
        output.flush_to(&mut sink).unwrap();
        assert_eq!(sink, "é\x1b[0m".as_bytes());
    }
}
