//! FrameBuffer: cache of what the terminal currently shows.
//!
//! The renderer diffs each widget's [`Buffer`] against this cache and only
//! writes the difference to the backend:
//! 1. `diff` finds points whose cell changed or that the widget vacated
//! 2. the renderer writes those points
//! 3. `update` folds the buffer into the cache

use super::{Buffer, Cell};
use crate::layout::{Point, Rect};
use std::collections::HashMap;

/// Minimal change set between a buffer and the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// Points inside the buffer's area whose cell is new or different.
    pub changed: HashMap<Point, Cell>,
    /// Cached points inside the buffer's area that the buffer no longer paints.
    pub removed: Vec<Point>,
}

impl Diff {
    /// Whether nothing needs writing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }
}

/// The renderer's model of the displayed screen.
#[derive(Clone)]
pub struct FrameBuffer {
    cells: HashMap<Point, Cell>,
    bounds: Rect,
}

impl FrameBuffer {
    /// Create an empty cache for a terminal of the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self {
            cells: HashMap::with_capacity(bounds.area() as usize),
            bounds,
        }
    }

    /// Terminal bounds.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of cached points.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cached cell at `point`.
    #[inline]
    pub fn get(&self, point: Point) -> Option<&Cell> {
        self.cells.get(&point)
    }

    /// Overwrite a cached cell.
    #[inline]
    pub fn set(&mut self, point: Point, cell: Cell) {
        self.cells.insert(point, cell);
    }

    /// Compare `buffer` against the cache within the buffer's area.
    pub fn diff(&self, buffer: &Buffer) -> Diff {
        let area = buffer.area();
        let mut diff = Diff::default();

        for (point, cell) in buffer.visible() {
            if self.cells.get(&point) != Some(cell) {
                diff.changed.insert(point, *cell);
            }
        }

        for point in self.cells.keys() {
            if area.contains_point(*point) && buffer.get(*point).is_none() {
                diff.removed.push(*point);
            }
        }
        diff.removed.sort_unstable();

        diff
    }

    /// Fold `buffer` into the cache.
    ///
    /// Cached points inside the buffer's area that the buffer does not
    /// paint are evicted; points outside its area are left alone.
    pub fn update(&mut self, buffer: &Buffer) {
        let area = buffer.area();
        self.cells
            .retain(|point, _| !area.contains_point(*point) || buffer.get(*point).is_some());
        for (point, cell) in buffer.visible() {
            self.cells.insert(point, *cell);
        }
    }

    /// Adopt new terminal bounds, dropping every point outside them.
    pub fn resize(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.cells.retain(|point, _| bounds.contains_point(*point));
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("bounds", &self.bounds)
            .field("cells", &self.cells.len())
            .finish()
    }
}
