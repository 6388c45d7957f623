//! Buffer: a widget's drawing surface for one frame.
//!
//! Sparse and rectangle-scoped. Writes are not clipped; the renderer only
//! reads back points inside the rectangle.

use super::Cell;
use crate::layout::{Point, Rect};
use crate::style::Style;
use std::collections::HashMap;

/// A rectangle-scoped map of positions to cells.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    area: Rect,
    cells: HashMap<Point, Cell>,
}

impl Buffer {
    /// Create a buffer whose every in-area point holds [`Cell::CLEAR`].
    pub fn new(area: Rect) -> Self {
        let mut cells = HashMap::with_capacity(area.area() as usize);
        for point in area.points() {
            cells.insert(point, Cell::CLEAR);
        }
        Self { area, cells }
    }

    /// The rectangle this buffer was created for.
    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Number of stored points, including any outside the area.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no points are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Store a cell.
    #[inline]
    pub fn set_cell(&mut self, point: Point, cell: Cell) {
        self.cells.insert(point, cell);
    }

    /// Read a cell.
    #[inline]
    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.cells.get(&point)
    }

    /// Forget a point so the frame diff reports it as vacated.
    #[inline]
    pub fn remove(&mut self, point: Point) -> Option<Cell> {
        self.cells.remove(&point)
    }

    /// Set every point of `rect` to `cell`.
    pub fn fill(&mut self, cell: Cell, rect: Rect) {
        for point in rect.points() {
            self.cells.insert(point, cell);
        }
    }

    /// Write `text` starting at `origin`, advancing by each glyph's display
    /// width. Returns the number of columns advanced.
    pub fn set_string(&mut self, text: &str, style: Style, origin: Point) -> i32 {
        let mut x = 0;
        for ch in text.chars() {
            let cell = Cell::styled(ch, style);
            self.cells.insert(origin.offset(x, 0), cell);
            x += i32::from(cell.display_width());
        }
        x
    }

    /// Write pre-styled cells in a row starting at `origin`.
    pub fn set_cells(&mut self, cells: &[Cell], origin: Point) -> i32 {
        let mut x = 0;
        for cell in cells {
            self.cells.insert(origin.offset(x, 0), *cell);
            x += i32::from(cell.display_width());
        }
        x
    }

    /// All stored points, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> {
        self.cells.iter().map(|(p, c)| (*p, c))
    }

    /// Stored points that lie inside the area.
    pub fn visible(&self) -> impl Iterator<Item = (Point, &Cell)> {
        let area = self.area;
        self.iter().filter(move |(p, _)| area.contains_point(*p))
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Buffer({:?})", self.area)?;
        let (min, max) = (self.area.min(), self.area.max());
        for y in min.y..max.y {
            let row: String = (min.x..max.x)
                .map(|x| self.get(Point::new(x, y)).map_or(' ', |c| c.ch))
                .collect();
            writeln!(f, "{row:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_new_fills_area() {
        let buffer = Buffer::new(Rect::new(2, 3, 4, 2));
        assert_eq!(buffer.len(), 8);
        assert_eq!(buffer.get(Point::new(2, 3)), Some(&Cell::CLEAR));
        assert_eq!(buffer.get(Point::new(5, 4)), Some(&Cell::CLEAR));
        assert_eq!(buffer.get(Point::new(6, 4)), None);
    }

    #[test]
    fn test_writes_are_not_clipped() {
        let mut buffer = Buffer::new(Rect::new(0, 0, 2, 2));
        buffer.set_cell(Point::new(-1, 5), Cell::new('x'));
        assert_eq!(buffer.get(Point::new(-1, 5)).map(|c| c.ch), Some('x'));
        assert_eq!(buffer.visible().count(), 4);
    }

    #[test]
    fn test_set_string_display_width() {
        let mut buffer = Buffer::new(Rect::new(0, 0, 10, 1));
        let style = Style::new(Color::GREEN);
        let advanced = buffer.set_string("a日b", style, Point::new(1, 0));
        assert_eq!(advanced, 4);
        assert_eq!(buffer.get(Point::new(1, 0)), Some(&Cell::styled('a', style)));
        assert_eq!(buffer.get(Point::new(2, 0)), Some(&Cell::styled('日', style)));
        // The wide glyph's second column is left untouched.
        assert_eq!(buffer.get(Point::new(3, 0)), Some(&Cell::CLEAR));
        assert_eq!(buffer.get(Point::new(4, 0)), Some(&Cell::styled('b', style)));
    }

    #[test]
    fn test_fill_sub_rect() {
        let mut buffer = Buffer::new(Rect::new(0, 0, 4, 4));
        buffer.fill(Cell::new('#'), Rect::new(1, 1, 2, 2));
        let filled = buffer.iter().filter(|(_, c)| c.ch == '#').count();
        assert_eq!(filled, 4);
        assert_eq!(buffer.get(Point::new(0, 0)), Some(&Cell::CLEAR));
    }

    #[test]
    fn test_remove() {
        let mut buffer = Buffer::new(Rect::new(0, 0, 2, 1));
        assert_eq!(buffer.remove(Point::new(1, 0)), Some(Cell::CLEAR));
        assert_eq!(buffer.get(Point::new(1, 0)), None);
    }
}
