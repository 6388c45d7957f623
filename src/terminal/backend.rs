//! Backends: where rendered cells end up.
//!
//! [`AnsiBackend`] tracks the terminal's cursor and SGR state so that a run
//! of adjacent, identically styled cells costs one cursor move and one set
//! of color sequences, then writes the whole frame with one syscall.

use super::output::OutputBuffer;
use crate::buffer::Cell;
use crate::error::Result;
use crate::style::{Color, Modifier};
use std::collections::{HashMap, HashSet};
use std::io::{self, Stdout, Write};

/// The raw terminal primitives the renderer needs.
pub trait Backend {
    /// Terminal size in columns and rows.
    fn size(&self) -> Result<(u16, u16)>;

    /// Queue one cell for display.
    fn set_cell(&mut self, x: u16, y: u16, cell: &Cell) -> Result<()>;

    /// Blank the whole screen.
    fn clear(&mut self) -> Result<()>;

    /// Push queued output to the terminal.
    fn flush(&mut self) -> Result<()>;
}

/// Last known terminal state, used to skip redundant sequences.
#[derive(Debug, Clone)]
struct SgrState {
    cursor_x: u16,
    cursor_y: u16,
    fg: Option<Color>,
    bg: Option<Color>,
    modifier: Option<Modifier>,
}

impl SgrState {
    const fn unknown() -> Self {
        Self {
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            fg: None,
            bg: None,
            modifier: None,
        }
    }
}

/// Writes cells as ANSI escape sequences.
///
/// A wide glyph covers the column to its right. Writes to that column in
/// the same frame are dropped, since terminals erase the whole glyph when
/// half of it is overwritten.
pub struct AnsiBackend<W: Write> {
    writer: W,
    output: OutputBuffer,
    state: SgrState,
    fixed_size: Option<(u16, u16)>,
    covered: HashSet<(u16, u16)>,
}

impl AnsiBackend<Stdout> {
    /// Backend on the process's stdout, sized by querying the terminal.
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
            output: OutputBuffer::new(),
            state: SgrState::unknown(),
            fixed_size: None,
            covered: HashSet::new(),
        }
    }
}

impl<W: Write> AnsiBackend<W> {
    /// Backend on an arbitrary writer with a fixed size.
    pub fn with_size(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            output: OutputBuffer::new(),
            state: SgrState::unknown(),
            fixed_size: Some((width, height)),
            covered: HashSet::new(),
        }
    }

    /// Change the reported size of a fixed-size backend.
    pub fn set_size(&mut self, width: u16, height: u16) {
        if self.fixed_size.is_some() {
            self.fixed_size = Some((width, height));
        }
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Backend for AnsiBackend<W> {
    fn size(&self) -> Result<(u16, u16)> {
        match self.fixed_size {
            Some(size) => Ok(size),
            None => Ok(crossterm::terminal::size()?),
        }
    }

    fn set_cell(&mut self, x: u16, y: u16, cell: &Cell) -> Result<()> {
        if self.covered.contains(&(x, y)) {
            return Ok(());
        }
        let state = &mut self.state;
        let style = cell.style;

        if state.cursor_x != x || state.cursor_y != y {
            self.output.cursor_move(x, y);
            state.cursor_x = x;
            state.cursor_y = y;
        }

        // Dropping an attribute needs a full reset, which also drops colors.
        let current = state.modifier.unwrap_or(Modifier::empty());
        if !current.difference(style.modifier).is_empty() {
            self.output.reset_attrs();
            state.fg = None;
            state.bg = None;
            state.modifier = None;
        }

        if state.fg != Some(style.fg) {
            self.output.set_fg(style.fg);
            state.fg = Some(style.fg);
        }
        if state.bg != Some(style.bg) {
            self.output.set_bg(style.bg);
            state.bg = Some(style.bg);
        }
        if state.modifier != Some(style.modifier) {
            let old = state.modifier.unwrap_or(Modifier::empty());
            self.output.set_modifiers(style.modifier.difference(old));
            state.modifier = Some(style.modifier);
        }

        self.output.write_char(cell.ch);
        let width = cell.display_width().max(1);
        state.cursor_x = x.saturating_add(u16::from(width));
        if width > 1 {
            self.covered.insert((x.saturating_add(1), y));
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.output.reset_attrs();
        self.output.clear_screen();
        self.state = SgrState::unknown();
        self.covered.clear();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.covered.clear();
        if self.output.is_empty() {
            return Ok(());
        }
        self.output.flush_to(&mut self.writer)?;
        self.output.clear();
        Ok(())
    }
}

/// In-memory backend recording what would be on screen.
#[derive(Debug, Clone, Default)]
pub struct TestBackend {
    width: u16,
    height: u16,
    cells: HashMap<(u16, u16), Cell>,
    pending: Vec<(u16, u16, Cell)>,
    writes: usize,
    flushes: usize,
    clears: usize,
}

impl TestBackend {
    /// A blank screen of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Change the reported size; cells outside it disappear.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.retain(|&(x, y), _| x < width && y < height);
    }

    /// Flushed cell at `(x, y)`, blank if never written.
    pub fn cell(&self, x: u16, y: u16) -> Cell {
        self.cells.get(&(x, y)).copied().unwrap_or(Cell::CLEAR)
    }

    /// Flushed glyphs of one row.
    pub fn row(&self, y: u16) -> String {
        (0..self.width).map(|x| self.cell(x, y).ch).collect()
    }

    /// Total `set_cell` calls.
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Total `flush` calls.
    pub const fn flushes(&self) -> usize {
        self.flushes
    }

    /// Total `clear` calls.
    pub const fn clears(&self) -> usize {
        self.clears
    }

    /// Reset the counters, keeping the screen.
    pub fn reset_counters(&mut self) {
        self.writes = 0;
        self.flushes = 0;
        self.clears = 0;
    }
}

impl Backend for TestBackend {
    fn size(&self) -> Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn set_cell(&mut self, x: u16, y: u16, cell: &Cell) -> Result<()> {
        self.writes += 1;
        self.pending.push((x, y, *cell));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        self.pending.clear();
        self.cells.clear();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        for (x, y, cell) in self.pending.drain(..) {
            self.cells.insert((x, y), cell);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn written(backend: &AnsiBackend<Vec<u8>>) -> String {
        String::from_utf8_lossy(backend.writer()).into_owned()
    }

    #[test]
    fn test_adjacent_cells_skip_cursor_move() {
        let mut backend = AnsiBackend::with_size(Vec::new(), 10, 2);
        let style = Style::new(Color::RED);
        backend.set_cell(0, 0, &Cell::styled('a', style)).unwrap();
        backend.set_cell(1, 0, &Cell::styled('b', style)).unwrap();
        backend.flush().unwrap();

        assert_eq!(written(&backend), "\x1b[H\x1b[38;5;1m\x1b[49mab");
    }

    #[test]
    fn test_gap_moves_cursor() {
        let mut backend = AnsiBackend::with_size(Vec::new(), 10, 2);
        backend.set_cell(0, 0, &Cell::new('a')).unwrap();
        backend.set_cell(5, 1, &Cell::new('b')).unwrap();
        backend.flush().unwrap();

        assert_eq!(written(&backend), "\x1b[H\x1b[39m\x1b[49ma\x1b[2;6Hb");
    }

    #[test]
    fn test_removed_modifier_resets() {
        let mut backend = AnsiBackend::with_size(Vec::new(), 10, 1);
        let bold = Style::CLEAR.modifier(Modifier::BOLD);
        backend.set_cell(0, 0, &Cell::styled('a', bold)).unwrap();
        backend.set_cell(1, 0, &Cell::new('b')).unwrap();
        backend.flush().unwrap();

        assert_eq!(
            written(&backend),
            "\x1b[H\x1b[39m\x1b[49m\x1b[1ma\x1b[0m\x1b[39m\x1b[49mb"
        );
    }

    #[test]
    fn test_wide_glyph_advances_two() {
        let mut backend = AnsiBackend::with_size(Vec::new(), 10, 1);
        backend.set_cell(0, 0, &Cell::new('日')).unwrap();
        backend.set_cell(2, 0, &Cell::new('x')).unwrap();
        backend.flush().unwrap();
        assert_eq!(written(&backend), "\x1b[H\x1b[39m\x1b[49m日x");
    }

    #[test]
    fn test_wide_glyph_tail_not_overwritten() {
        let mut backend = AnsiBackend::with_size(Vec::new(), 10, 1);
        backend.set_cell(0, 0, &Cell::new('日')).unwrap();
        backend.set_cell(1, 0, &Cell::CLEAR).unwrap();
        backend.set_cell(2, 0, &Cell::new('x')).unwrap();
        backend.flush().unwrap();
        assert_eq!(written(&backend), "\x1b[H\x1b[39m\x1b[49m日x");
    }

    #[test]
    fn test_tail_released_after_flush() {
        let mut backend = AnsiBackend::with_size(Vec::new(), 10, 1);
        backend.set_cell(0, 0, &Cell::new('日')).unwrap();
        backend.flush().unwrap();
        backend.set_cell(1, 0, &Cell::new('y')).unwrap();
        backend.flush().unwrap();
        assert_eq!(written(&backend), "\x1b[H\x1b[39m\x1b[49m日\x1b[1;2Hy");
    }

    #[test]
    fn test_empty_flush_writes_nothing() {
        let mut backend = AnsiBackend::with_size(Vec::new(), 1, 1);
        backend.flush().unwrap();
        assert!(backend.writer().is_empty());
        assert_eq!(backend.size().unwrap(), (1, 1));
    }

    #[test]
    fn test_test_backend_applies_on_flush() {
        let mut backend = TestBackend::new(3, 1);
        backend.set_cell(1, 0, &Cell::new('x')).unwrap();
        assert_eq!(backend.row(0), "   ");
        backend.flush().unwrap();
        assert_eq!(backend.row(0), " x ");
        assert_eq!((backend.writes(), backend.flushes()), (1, 1));
    }
}
