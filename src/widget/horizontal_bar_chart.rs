//! Horizontal bar chart: label | bar | value, one row per data point.

use super::{block_drawable, max_value, Block, NumFormatter};
use crate::buffer::{Buffer, Cell};
use crate::layout::Point;
use crate::style::{select_color, select_style, symbols, Color, Style, Theme};
use unicode_width::UnicodeWidthStr;

/// Bars extending right from a label column, value printed after them.
///
/// The label and value columns size themselves to their widest entry plus
/// two columns of padding unless fixed widths are set; the bar column gets
/// what is left, at least one column. Rows past the inner height are
/// skipped.
pub struct HorizontalBarChart {
    /// Chrome and geometry.
    pub block: Block,
    /// Bar colors, cycled per row.
    pub bar_colors: Vec<Color>,
    /// Label styles, cycled per row.
    pub label_styles: Vec<Style>,
    /// Value styles, cycled per row.
    pub value_styles: Vec<Style>,
    /// Formats the value column.
    pub value_formatter: NumFormatter,
    /// One value per row.
    pub data: Vec<f64>,
    /// One label per row.
    pub labels: Vec<String>,
    /// Fixed scale maximum; `None` uses the largest value.
    pub max_val: Option<f64>,
    /// Fixed label column width; `None` sizes to the labels.
    pub label_width: Option<u16>,
    /// Fixed value column width; `None` sizes to the formatted values.
    pub value_width: Option<u16>,
    /// Glyph the bars are drawn with.
    pub bar_char: char,
    /// Columns between label, bar and value.
    pub gap: u16,
}

impl HorizontalBarChart {
    /// Empty chart styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            bar_colors: theme.bar_chart.bars.clone(),
            label_styles: theme.bar_chart.labels.clone(),
            value_styles: theme.bar_chart.nums.clone(),
            value_formatter: Box::new(|n| format!("{n:.0}")),
            data: Vec::new(),
            labels: Vec::new(),
            max_val: None,
            label_width: None,
            value_width: None,
            bar_char: symbols::SHADED_BLOCKS[4],
            gap: 2,
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let Some(max) = self.max_val.or_else(|| max_value(&self.data)) else {
            return;
        };
        if max == 0.0 {
            return;
        }

        let label_width = self.label_width.map_or_else(
            || self.labels.iter().map(|l| l.width()).max().unwrap_or(0) as i32 + 2,
            i32::from,
        );
        let value_width = self.value_width.map_or_else(
            || {
                self.data
                    .iter()
                    .map(|&v| (self.value_formatter)(v).width())
                    .max()
                    .unwrap_or(0) as i32
                    + 2
            },
            i32::from,
        );

        let inner = self.block.inner();
        let (min, lim) = (inner.min(), inner.max());
        let gap = i32::from(self.gap);
        let available = (i32::from(inner.width) - label_width - value_width - gap * 2).max(1);
        let bar_start = min.x + label_width + gap;
        let bar_end = lim.x - value_width - gap;
        let value_x = bar_start + available + gap;

        for (i, &value) in self.data.iter().enumerate() {
            let y = min.y + i as i32;
            if y >= lim.y {
                break;
            }

            if let Some(label) = self.labels.get(i) {
                buffer.set_string(label, select_style(&self.label_styles, i), Point::new(min.x, y));
            }

            let bar_len = ((value / max * f64::from(available)) as i32).max(0);
            let bar = Cell::styled(self.bar_char, Style::new(select_color(&self.bar_colors, i)));
            for x in bar_start..(bar_start + bar_len).min(bar_end) {
                buffer.set_cell(Point::new(x, y), bar);
            }

            if value_x < lim.x {
                let text = (self.value_formatter)(value);
                buffer.set_string(&text, select_style(&self.value_styles, i), Point::new(value_x, y));
            }
        }
    }
}

impl Default for HorizontalBarChart {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(HorizontalBarChart);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{render, row};
    use pretty_assertions::assert_eq;

    fn chart() -> HorizontalBarChart {
        let mut chart = HorizontalBarChart::default();
        chart.block = Block::plain();
        chart.data = vec![10.0, 5.0];
        chart.labels = vec!["men".to_string(), "women".to_string()];
        chart
    }

    #[test]
    fn test_three_column_layout() {
        let mut chart = chart();
        // label col 7, value col 4, gaps 2+2: bar column is 20 - 15 = 5
        let buffer = render(&mut chart, 20, 2);
        assert_eq!(row(&buffer, 0), "men      █████  10  ");
        assert_eq!(row(&buffer, 1), "women    ██     5   ");
    }

    #[test]
    fn test_rows_beyond_height_skipped() {
        let mut chart = chart();
        chart.data.push(3.0);
        let buffer = render(&mut chart, 20, 1);
        assert_eq!(buffer.visible().filter(|(_, c)| c.ch == '█').count(), 5);
    }

    #[test]
    fn test_narrow_area_keeps_one_column_bar() {
        let mut chart = chart();
        chart.label_width = Some(2);
        chart.value_width = Some(1);
        chart.gap = 0;
        let buffer = render(&mut chart, 4, 2);
        // bar column 4 - 2 - 1 = 1
        assert_eq!(row(&buffer, 0), "me█1");
    }

    #[test]
    fn test_bar_colors_cycle() {
        let mut chart = chart();
        chart.bar_colors = vec![Color::BLUE];
        let buffer = render(&mut chart, 20, 2);
        let fg: Vec<Color> = buffer
            .visible()
            .filter(|(_, c)| c.ch == '█')
            .map(|(_, c)| c.style.fg)
            .collect();
        assert!(fg.iter().all(|&c| c == Color::BLUE));
    }
}
