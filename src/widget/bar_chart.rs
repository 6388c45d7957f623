//! Vertical bar chart.

use super::{block_drawable, default_formatter, max_value, Block, NumFormatter};
use crate::buffer::{Buffer, Cell};
use crate::layout::Point;
use crate::style::{select_color, select_style, Color, Style, Theme};
use unicode_width::UnicodeWidthStr;

/// Bars rising from the bottom of the inner area, one per data point.
///
/// The bottom row holds the labels; each bar's value is printed on its
/// lowest row. Bar heights are `floor(value / max * (inner_height - 1))`.
pub struct BarChart {
    /// Chrome and geometry.
    pub block: Block,
    /// Bar colors, cycled per bar.
    pub bar_colors: Vec<Color>,
    /// Label styles, cycled per bar.
    pub label_styles: Vec<Style>,
    /// Number styles, cycled per bar starting at the second entry.
    pub num_styles: Vec<Style>,
    /// Formats the value printed on each bar.
    pub num_formatter: NumFormatter,
    /// One value per bar.
    pub data: Vec<f64>,
    /// One label per bar; missing labels are skipped.
    pub labels: Vec<String>,
    /// Columns per bar.
    pub bar_width: u16,
    /// Columns between bars.
    pub bar_gap: u16,
    /// Fixed scale maximum; `None` uses the largest value.
    pub max_val: Option<f64>,
}

impl BarChart {
    /// Empty chart styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            bar_colors: theme.bar_chart.bars.clone(),
            label_styles: theme.bar_chart.labels.clone(),
            num_styles: theme.bar_chart.nums.clone(),
            num_formatter: default_formatter(),
            data: Vec::new(),
            labels: Vec::new(),
            bar_width: 3,
            bar_gap: 1,
            max_val: None,
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let Some(max) = self.max_val.or_else(|| max_value(&self.data)) else {
            return;
        };
        if max == 0.0 {
            return;
        }

        let inner = self.block.inner();
        let (min, lim) = (inner.min(), inner.max());
        let bar_width = i32::from(self.bar_width);
        let base = lim.y - 2;
        let mut bar_x = min.x;

        for (i, &value) in self.data.iter().enumerate() {
            let bar_color = select_color(&self.bar_colors, i);

            if value > 0.0 {
                let height = (value / max * (f64::from(inner.height) - 1.0)) as i32;
                let bar = Cell::styled(' ', Style::CLEAR.bg(bar_color));
                for x in bar_x..(bar_x + bar_width).min(lim.x) {
                    for y in (base - height + 1)..=base {
                        buffer.set_cell(Point::new(x, y), bar);
                    }
                }
            }

            if let Some(label) = self.labels.get(i) {
                let label_x = bar_x + bar_width / 2 - label.width() as i32 / 2;
                let style = select_style(&self.label_styles, i);
                buffer.set_string(label, style, Point::new(label_x, lim.y - 1));
            }

            let number_x = bar_x + bar_width / 2;
            if number_x <= lim.x {
                let num_style = select_style(&self.num_styles, i + 1);
                let style = num_style.bg(bar_color);
                buffer.set_string(&(self.num_formatter)(value), style, Point::new(number_x, base));
            }

            bar_x += bar_width + i32::from(self.bar_gap);
        }
    }
}

impl Default for BarChart {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(BarChart);
