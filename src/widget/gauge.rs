//! Percentage gauge.

use super::text::cells_with_x;
use super::{block_drawable, Block};
use crate::buffer::{Buffer, Cell};
use crate::layout::{Point, Rect};
use crate::style::{Color, Modifier, Style, Theme};
use unicode_width::UnicodeWidthStr;

/// A horizontal bar filled to `percent` with a centered label.
///
/// Label cells that sit over the filled part are drawn reversed in the bar
/// color so they stay readable.
#[derive(Debug, Clone)]
pub struct Gauge {
    /// Chrome and geometry.
    pub block: Block,
    /// Fill level, 0 to 100.
    pub percent: u16,
    /// Fill color.
    pub bar_color: Color,
    /// Label text; the percentage when empty.
    pub label: String,
    /// Label style outside the filled part.
    pub label_style: Style,
}

impl Gauge {
    /// Empty gauge styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            percent: 0,
            bar_color: theme.gauge.bar,
            label: String::new(),
            label_style: theme.gauge.label,
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let inner = self.block.inner();
        let (min, lim) = (inner.min(), inner.max());
        let percent = self.percent.min(100);
        let bar_width = (f64::from(percent) / 100.0 * f64::from(inner.width)) as u16;

        buffer.fill(
            Cell::styled(' ', Style::CLEAR.bg(self.bar_color)),
            Rect::new(inner.x, inner.y, bar_width, inner.height),
        );

        let label = if self.label.is_empty() {
            format!("{}%", self.percent)
        } else {
            self.label.clone()
        };
        let label_x = min.x + i32::from(inner.width / 2) - label.width() as i32 / 2;
        let label_y = min.y + (i32::from(inner.height) - 1) / 2;
        if label_y >= lim.y {
            return;
        }

        let over_bar = Style::new(self.bar_color).modifier(Modifier::REVERSED);
        let cells: Vec<Cell> = label.chars().map(|ch| Cell::styled(ch, self.label_style)).collect();
        for (dx, mut cell) in cells_with_x(&cells) {
            let x = label_x + dx;
            if x < min.x + i32::from(bar_width) {
                cell.style = over_bar;
            }
            buffer.set_cell(Point::new(x, label_y), cell);
        }
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(Gauge);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{render, row};
    use pretty_assertions::assert_eq;

    fn gauge(percent: u16) -> Gauge {
        let mut gauge = Gauge::default();
        gauge.block = Block::plain();
        gauge.percent = percent;
        gauge
    }

    #[test]
    fn test_fill_proportional() {
        let mut gauge = gauge(50);
        let buffer = render(&mut gauge, 10, 3);
        let filled = (0..10)
            .filter(|&x| buffer.get(Point::new(x, 0)).is_some_and(|c| c.style.bg == Color::CYAN))
            .count();
        assert_eq!(filled, 5);
    }

    #[test]
    fn test_label_centered_and_reversed_over_bar() {
        let mut gauge = gauge(50);
        let buffer = render(&mut gauge, 10, 3);
        assert_eq!(row(&buffer, 1), "    50%   ");

        let five = buffer.get(Point::new(4, 1)).unwrap();
        assert!(five.style.modifier.contains(Modifier::REVERSED));
        assert_eq!(five.style.fg, Color::CYAN);

        let percent = buffer.get(Point::new(6, 1)).unwrap();
        assert_eq!(percent.style, gauge.label_style);
    }

    #[test]
    fn test_custom_label() {
        let mut gauge = gauge(0);
        gauge.label = "idle".to_string();
        let buffer = render(&mut gauge, 8, 1);
        assert_eq!(row(&buffer, 0), "  idle  ");
    }

    #[test]
    fn test_percent_over_hundred_fills_width() {
        let mut gauge = gauge(150);
        let buffer = render(&mut gauge, 6, 1);
        let filled = buffer
            .visible()
            .filter(|(_, c)| c.style.bg == Color::CYAN || c.style.fg == Color::CYAN)
            .count();
        assert_eq!(filled, 6);
        assert_eq!(row(&buffer, 0), " 150% ");
    }
}
