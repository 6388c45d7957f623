//! Widgets: charts, text and navigation components.
//!
//! Every widget embeds a [`Block`] for its geometry and chrome, exposes its
//! data as public fields, and implements [`Drawable`]. Construct with a
//! [`Theme`](crate::Theme) to pick up its styles; `Default` uses the dark
//! preset.
//!
//! ```rust
//! use trellis::widget::{BarChart, Drawable};
//! use trellis::{Buffer, Rect, Theme};
//!
//! let mut chart = BarChart::new(&Theme::dark());
//! chart.data = vec![3.0, 5.0, 2.0];
//! chart.labels = vec!["a".into(), "b".into(), "c".into()];
//! chart.set_area(Rect::new(0, 0, 20, 10));
//!
//! let mut buffer = Buffer::new(chart.area());
//! chart.draw(&mut buffer);
//! ```

mod bar_chart;
mod block;
mod gauge;
mod horizontal_bar_chart;
mod list;
mod paragraph;
mod pie_chart;
mod plot;
mod scroll;
mod sparkline;
mod stacked_bar_chart;
mod table;
mod tabs;
pub mod text;
mod traits;
mod tree;

pub use bar_chart::BarChart;
pub use block::{Block, BorderType, Borders, SideStyles, Spacing};
pub use gauge::Gauge;
pub use horizontal_bar_chart::HorizontalBarChart;
pub use list::List;
pub use paragraph::Paragraph;
pub use pie_chart::{PieChart, PieLabel};
pub use plot::{Plot, PlotKind};
pub use scroll::ScrollState;
pub use sparkline::{Sparkline, SparklineGroup};
pub use stacked_bar_chart::StackedBarChart;
pub use table::{ColumnResizer, Table};
pub use tabs::Tabs;
pub use traits::{lock, shared, Drawable, Shared, SharedDrawable};
pub use tree::{Tree, TreeNode};

/// Formats a numeric value for display on a chart.
pub type NumFormatter = Box<dyn Fn(f64) -> String + Send>;

/// Shortest decimal form: `5` for `5.0`, `2.5` for `2.5`.
pub(crate) fn default_formatter() -> NumFormatter {
    Box::new(|n| format!("{n}"))
}

/// Largest value, `None` for empty data.
pub(crate) fn max_value(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Implements [`Drawable`] for a widget with a `block` field and a
/// `draw_content(&mut self, &mut Buffer)` method.
macro_rules! block_drawable {
    ($widget:ty) => {
        impl $crate::widget::Drawable for $widget {
            fn area(&self) -> $crate::layout::Rect {
                self.block.area()
            }

            fn set_area(&mut self, area: $crate::layout::Rect) {
                self.block.set_area(area);
            }

            fn draw(&mut self, buffer: &mut $crate::buffer::Buffer) {
                self.block.draw(buffer);
                if !self.block.inner().is_empty() {
                    self.draw_content(buffer);
                }
            }
        }
    };
}
pub(crate) use block_drawable;
