//! Sparklines stacked in a shared block.

use super::text::trim_string;
use super::{block_drawable, max_value, Block};
use crate::buffer::{Buffer, Cell};
use crate::layout::Point;
use crate::style::{symbols, Color, Style, Theme};

/// One data series drawn as a column per point.
#[derive(Debug, Clone)]
pub struct Sparkline {
    /// Data points, expected non-negative.
    pub data: Vec<f64>,
    /// Title drawn above the bars; no title row when empty.
    pub title: String,
    /// Title style.
    pub title_style: Style,
    /// Bar color.
    pub line_color: Color,
    /// Fixed scale maximum; `None` uses the largest value.
    pub max_val: Option<f64>,
    /// Cap on bar height in rows.
    pub max_height: Option<u16>,
}

impl Sparkline {
    /// Empty sparkline styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            data: Vec::new(),
            title: String::new(),
            title_style: theme.sparkline.title,
            line_color: theme.sparkline.line,
            max_val: None,
            max_height: None,
        }
    }

    /// Builder: set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Draw into the band of rows ending just above `bottom`, `rows` tall
    /// including the title row.
    fn draw_band(&self, buffer: &mut Buffer, left: i32, width: i32, bottom: i32, rows: i32) {
        let bar_rows = if self.title.is_empty() { rows } else { rows - 1 };

        if let Some(max) = self.max_val.or_else(|| max_value(&self.data)) {
            if max != 0.0 {
                self.draw_bars(buffer, left, width, bottom, bar_rows, max);
            }
        }

        if !self.title.is_empty() {
            let title = trim_string(&self.title, width.max(0) as usize);
            buffer.set_string(&title, self.title_style, Point::new(left, bottom - bar_rows));
        }
    }

    fn draw_bars(&self, buffer: &mut Buffer, left: i32, width: i32, bottom: i32, rows: i32, max: f64) {
        let style = Style::new(self.line_color);
        let cap = self.max_height.map_or(i32::MAX, i32::from);

        for (j, &value) in self.data.iter().enumerate().take(width.max(0) as usize) {
            let x = left + j as i32;
            let scaled = (value / max * f64::from(rows)).max(0.0);
            let mut full = scaled as i32;
            let mut eighths = ((scaled - f64::from(full)) * 8.0) as usize;
            if full >= cap {
                full = cap;
                eighths = 0;
            }

            let full_block = symbols::BARS[symbols::BARS.len() - 1];
            for k in 0..full {
                buffer.set_cell(Point::new(x, bottom - k), Cell::styled(full_block, style));
            }
            if eighths > 0 && full < rows {
                buffer.set_cell(Point::new(x, bottom - full), Cell::styled(symbols::BARS[eighths], style));
            }
            if full == 0 && eighths == 0 {
                buffer.set_cell(Point::new(x, bottom), Cell::styled(symbols::BARS[1], style));
            }
        }
    }
}

impl Default for Sparkline {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

/// Sparklines sharing one block, each given an equal band of rows.
///
/// The last sparkline takes whatever rows the even split leaves over.
#[derive(Debug, Clone)]
pub struct SparklineGroup {
    /// Chrome and geometry.
    pub block: Block,
    /// Sparklines, top to bottom.
    pub sparklines: Vec<Sparkline>,
}

impl SparklineGroup {
    /// Group styled from `theme`.
    pub fn new(theme: &Theme, sparklines: Vec<Sparkline>) -> Self {
        Self {
            block: Block::new(theme),
            sparklines,
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let count = self.sparklines.len() as i32;
        if count == 0 {
            return;
        }

        let inner = self.block.inner();
        let (min, height, width) = (inner.min(), i32::from(inner.height), i32::from(inner.width));
        let band = height / count;

        for (i, sparkline) in self.sparklines.iter().enumerate() {
            let i = i as i32;
            let (offset, rows) = if i == count - 1 {
                (height, height - band * i)
            } else {
                (band * (i + 1), band)
            };
            sparkline.draw_band(buffer, min.x, width, min.y - 1 + offset, rows);
        }
    }
}

impl Default for SparklineGroup {
    fn default() -> Self {
        Self::new(&Theme::default(), Vec::new())
    }
}

block_drawable!(SparklineGroup);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{render, row};
    use pretty_assertions::assert_eq;

    fn group(sparklines: Vec<Sparkline>) -> SparklineGroup {
        let mut group = SparklineGroup::default();
        group.block = Block::plain();
        group.sparklines = sparklines;
        group
    }

    fn line(data: &[f64]) -> Sparkline {
        let mut sparkline = Sparkline::default();
        sparkline.data = data.to_vec();
        sparkline
    }

    #[test]
    fn test_full_and_partial_blocks() {
        let mut group = group(vec![line(&[4.0, 2.0, 1.0])]);
        let buffer = render(&mut group, 3, 4);
        assert_eq!(row(&buffer, 0), "█  ");
        assert_eq!(row(&buffer, 1), "█  ");
        assert_eq!(row(&buffer, 2), "██ ");
        assert_eq!(row(&buffer, 3), "███");
    }

    #[test]
    fn test_fractional_height_uses_ramp() {
        let mut group = group(vec![line(&[8.0, 1.0])]);
        let buffer = render(&mut group, 2, 1);
        // 1/8 of one row is the lowest eighth block
        assert_eq!(row(&buffer, 0), "█▁");
    }

    #[test]
    fn test_zero_value_still_visible() {
        let mut group = group(vec![line(&[5.0, 0.0])]);
        let buffer = render(&mut group, 2, 3);
        assert_eq!(row(&buffer, 2), "█▁");
    }

    #[test]
    fn test_bands_split_evenly_with_titles() {
        let top = line(&[1.0]).title("rx");
        let bottom = line(&[1.0]).title("tx");
        let mut group = group(vec![top, bottom]);
        let buffer = render(&mut group, 3, 5);
        // bands of 2 and 3 rows, each with a title row
        assert_eq!(row(&buffer, 0), "rx ");
        assert_eq!(row(&buffer, 1), "█  ");
        assert_eq!(row(&buffer, 2), "tx ");
        assert_eq!(row(&buffer, 3), "█  ");
        assert_eq!(row(&buffer, 4), "█  ");
    }

    #[test]
    fn test_max_height_caps_bars() {
        let mut capped = line(&[10.0]);
        capped.max_height = Some(2);
        let mut group = group(vec![capped]);
        let buffer = render(&mut group, 1, 5);
        let filled = buffer.visible().filter(|(_, c)| c.ch == '█').count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_columns_clipped_to_width() {
        let mut group = group(vec![line(&[1.0, 1.0, 1.0, 1.0])]);
        let buffer = render(&mut group, 2, 1);
        assert_eq!(buffer.iter().filter(|(_, c)| c.ch == '█').count(), 2);
    }
}
