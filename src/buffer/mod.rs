//! Buffer module: cells and the two grids that hold them.
//!
//! This module contains:
//! - [`Cell`]: a glyph plus its style
//! - [`Buffer`]: the sparse surface a widget draws into for one frame
//! - [`FrameBuffer`]: the renderer's cache of the displayed screen, and the
//!   [`Diff`] between it and a freshly drawn buffer

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
mod frame;

pub use buffer::Buffer;
pub use cell::Cell;
pub use frame::{Diff, FrameBuffer};
