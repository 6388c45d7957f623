//! Style module: colors, attributes, glyphs and themes.
//!
//! - [`Color`], [`Modifier`], [`Style`]: the attribute triple stored in every cell
//! - [`symbols`]: box drawing and chart glyphs
//! - [`Theme`] / [`ThemeRegistry`]: widget defaults, passed explicitly to constructors

mod color;
pub mod symbols;
pub mod theme;

pub use color::{select_color, select_style, Color, Modifier, Rgb, Style};
pub use theme::{Theme, ThemeRegistry};
