//! Layout module: geometry primitives and the ratio grid.
//!
//! Layout trees are resolved when they are set. On every frame the flat
//! list of leaves is only scaled to the current inner rectangle.

mod grid;
mod rect;

pub use grid::{resolve, Layout, LayoutItem, LayoutNode, Ratios};
pub use rect::{Point, Rect};

/// Horizontal placement of text or a manually placed layout item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}
