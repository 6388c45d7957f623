//! Markup module: inline styling for any widget text.
//!
//! ```text
//! [text](fg:<color>,bg:<color>,mod:<modifier>)
//! ```
//!
//! All keys are optional and order-independent. Text may contain literal
//! brackets; only the outermost `[...]` followed by `(...)` forms a span.
//!
//! ```
//! use trellis::markup::parse_styles;
//! use trellis::{Color, Style};
//!
//! let cells = parse_styles("load [high](fg:red)", Style::CLEAR);
//! assert_eq!(cells.len(), 9);
//! assert_eq!(cells[5].style.fg, Color::RED);
//! ```

mod parser;

pub use parser::{has_markup, parse_style_string, parse_styles, strip_markup, StyleParser};
