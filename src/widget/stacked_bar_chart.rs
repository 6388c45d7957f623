//! Stacked bar chart.

use super::text::trim_string;
use super::{block_drawable, default_formatter, Block, NumFormatter};
use crate::buffer::{Buffer, Cell};
use crate::layout::Point;
use crate::style::{select_color, select_style, Color, Style, Theme};
use unicode_width::UnicodeWidthStr;

/// Bars built from segments stacked bottom-up.
///
/// Segment heights share one scale: the largest bar *sum*. Segment colors
/// cycle by segment index so the same series has the same color in every
/// bar.
pub struct StackedBarChart {
    /// Chrome and geometry.
    pub block: Block,
    /// Segment colors, cycled per segment index.
    pub bar_colors: Vec<Color>,
    /// Label styles, cycled per bar.
    pub label_styles: Vec<Style>,
    /// Number styles, cycled per segment starting at the second entry.
    pub num_styles: Vec<Style>,
    /// Formats the value printed on each segment.
    pub num_formatter: NumFormatter,
    /// One segment list per bar.
    pub data: Vec<Vec<f64>>,
    /// One label per bar.
    pub labels: Vec<String>,
    /// Columns per bar.
    pub bar_width: u16,
    /// Columns between bars.
    pub bar_gap: u16,
    /// Fixed scale maximum; `None` uses the largest bar sum.
    pub max_val: Option<f64>,
}

impl StackedBarChart {
    /// Empty chart styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            bar_colors: theme.stacked_bar_chart.bars.clone(),
            label_styles: theme.stacked_bar_chart.labels.clone(),
            num_styles: theme.stacked_bar_chart.nums.clone(),
            num_formatter: default_formatter(),
            data: Vec::new(),
            labels: Vec::new(),
            bar_width: 3,
            bar_gap: 1,
            max_val: None,
        }
    }

    fn max_sum(&self) -> f64 {
        self.data
            .iter()
            .map(|bar| bar.iter().sum::<f64>())
            .fold(0.0, f64::max)
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let max = self.max_val.unwrap_or_else(|| self.max_sum());
        if max == 0.0 {
            return;
        }

        let inner = self.block.inner();
        let (min, lim) = (inner.min(), inner.max());
        let bar_width = i32::from(self.bar_width);
        let base = lim.y - 2;
        let mut bar_x = min.x;

        for (i, bar) in self.data.iter().enumerate() {
            let mut stacked = 0;

            for (j, &value) in bar.iter().enumerate() {
                if value <= 0.0 {
                    continue;
                }
                let height = (value / max * (f64::from(inner.height) - 1.0)) as i32;
                let color = select_color(&self.bar_colors, j);
                let segment = Cell::styled(' ', Style::CLEAR.bg(color));
                let bottom = base - stacked;
                for x in bar_x..(bar_x + bar_width).min(lim.x) {
                    for y in (bottom - height + 1)..=bottom {
                        buffer.set_cell(Point::new(x, y), segment);
                    }
                }

                let style = select_style(&self.num_styles, j + 1).bg(color);
                let number_x = bar_x + bar_width / 2 - 1;
                buffer.set_string(&(self.num_formatter)(value), style, Point::new(number_x, bottom));

                stacked += height;
            }

            if let Some(label) = self.labels.get(i) {
                let label_x = bar_x + (bar_width / 2 - label.width() as i32 / 2).max(0);
                let label = trim_string(label, usize::from(self.bar_width));
                let style = select_style(&self.label_styles, i);
                buffer.set_string(&label, style, Point::new(label_x, lim.y - 1));
            }

            bar_x += bar_width + i32::from(self.bar_gap);
        }
    }
}

impl Default for StackedBarChart {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(StackedBarChart);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{render, row};
    use pretty_assertions::assert_eq;

    fn chart(data: Vec<Vec<f64>>) -> StackedBarChart {
        let mut chart = StackedBarChart::default();
        chart.block = Block::plain();
        chart.data = data;
        chart
    }

    fn column_colors(buffer: &Buffer, x: i32) -> Vec<Color> {
        let height = i32::from(buffer.area().height);
        (0..height)
            .filter_map(|y| buffer.get(Point::new(x, y)))
            .map(|c| c.style.bg)
            .collect()
    }

    #[test]
    fn test_bars_scaled_by_largest_sum() {
        // Both bars sum to 5, so both reach the same total height.
        let mut chart = chart(vec![vec![3.0, 2.0], vec![1.0, 4.0]]);
        let buffer = render(&mut chart, 8, 12);
        let filled = |x| column_colors(&buffer, x).iter().filter(|c| !c.is_clear()).count();
        assert_eq!(filled(2), 10);
        assert_eq!(filled(6), 10);
    }

    #[test]
    fn test_segments_stack_bottom_up() {
        let mut chart = chart(vec![vec![3.0, 2.0]]);
        let buffer = render(&mut chart, 3, 12);
        let colors = column_colors(&buffer, 2);
        // heights 6 and 4 over 11 usable rows, label row last
        assert!(colors[0].is_clear());
        assert_eq!(&colors[1..5], &[Color::GREEN; 4]);
        assert_eq!(&colors[5..11], &[Color::RED; 6]);
        assert!(colors[11].is_clear());
    }

    #[test]
    fn test_labels_trimmed_to_bar_width() {
        let mut chart = chart(vec![vec![1.0]]);
        chart.labels = vec!["memory".to_string()];
        let buffer = render(&mut chart, 4, 4);
        assert_eq!(row(&buffer, 3), "me… ");
    }

    #[test]
    fn test_empty_data_draws_nothing() {
        let mut chart = chart(Vec::new());
        let buffer = render(&mut chart, 4, 4);
        assert!(buffer.iter().all(|(_, c)| *c == Cell::CLEAR));
    }
}
