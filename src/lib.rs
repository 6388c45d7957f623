//! # Trellis
//!
//! A cell-diffing terminal renderer for dashboards and charts.
//!
//! Widgets draw into per-frame buffers; the renderer diffs those buffers
//! against what the terminal already shows and writes only the difference.
//!
//! ## Core Concepts
//!
//! - **Cell diffing**: a cached [`FrameBuffer`] bounds each frame's writes to changed or vacated cells
//! - **Ratio layouts**: nested rows and columns resolve to rectangles at any terminal size
//! - **Style markup**: any widget text may carry `[text](fg:red,mod:bold)` spans
//! - **Shared widgets**: each widget sits behind its own mutex so data threads can update it between frames
//!
//! ## Example
//!
//! ```rust
//! use trellis::terminal::TestBackend;
//! use trellis::widget::{shared, Gauge, Drawable};
//! use trellis::{Rect, Renderer, Theme};
//!
//! let gauge = shared(Gauge::new(&Theme::dark()));
//! {
//!     let mut g = gauge.lock().unwrap();
//!     g.percent = 42;
//!     g.set_area(Rect::new(0, 0, 20, 7));
//! }
//!
//! let mut renderer = Renderer::new(TestBackend::new(20, 7)).unwrap();
//! renderer.render(&[&*gauge]).unwrap();
//! assert!(renderer.backend().row(3).contains("42%"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod config;
pub mod error;
pub mod layout;
pub mod markup;
pub mod render;
pub mod style;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{EventReader, InputEvent, KeyCode, KeyModifiers, Tick, Ticker};
pub use buffer::{Buffer, Cell, Diff, FrameBuffer};
pub use config::ThemeSelector;
pub use error::{Error, Result};
pub use layout::{Alignment, Layout, LayoutNode, Point, Rect};
pub use markup::parse_styles;
pub use render::{RenderMode, Renderer, RendererConfig, RenderStats};
pub use style::{Color, Modifier, Rgb, Style, Theme, ThemeRegistry};
pub use terminal::{Terminal, TerminalConfig};
pub use widget::{Block, Drawable};
