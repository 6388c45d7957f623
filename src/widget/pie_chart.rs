//! Pie chart rasterized from rays.

use super::{block_drawable, Block};
use crate::buffer::{Buffer, Cell};
use crate::layout::Point;
use crate::style::{select_color, symbols, Color, Style, Theme};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Columns per row of radius; terminal cells are about twice as tall as wide.
const X_STRETCH: f64 = 2.0;

/// Formats the label of slice `index` holding `value`.
pub type PieLabel = Box<dyn Fn(usize, f64) -> String + Send>;

/// Slices swept clockwise from `angle_offset`, in data order.
///
/// Each slice is filled by tracing rays from the center to the rim at
/// `resolution` radian steps. Labels sit on the half-radius circle at each
/// slice's mid-angle, or at the center for a single slice.
pub struct PieChart {
    /// Chrome and geometry.
    pub block: Block,
    /// One value per slice.
    pub data: Vec<f64>,
    /// Slice colors, cycled.
    pub colors: Vec<Color>,
    /// Slice label callback; no labels when `None`.
    pub label_formatter: Option<PieLabel>,
    /// Start angle in radians; the default points up.
    pub angle_offset: f64,
    /// Angular step between rays in radians.
    pub resolution: f64,
}

impl PieChart {
    /// Empty chart styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            data: Vec::new(),
            colors: theme.pie_chart.slices.clone(),
            label_formatter: None,
            angle_offset: -FRAC_PI_2,
            resolution: 0.001,
        }
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let sum: f64 = self.data.iter().sum();
        if self.data.is_empty() || sum == 0.0 || self.resolution <= 0.0 {
            return;
        }

        let inner = self.block.inner();
        let center = inner.min().offset(i32::from(inner.width / 2), i32::from(inner.height / 2));
        let radius = (f64::from(inner.width / 2) / X_STRETCH).min(f64::from(inner.height / 2));
        let rim = Circle { center, radius };
        let middle = Circle { center, radius: radius / 2.0 };

        let sizes: Vec<f64> = self.data.iter().map(|v| v / sum * TAU).collect();

        let mut phi = self.angle_offset;
        for (i, &size) in sizes.iter().enumerate() {
            let cell = Cell::styled(symbols::SHADED_BLOCKS[1], Style::new(select_color(&self.colors, i)));
            let mut step = 0.0;
            while step < size {
                draw_line(buffer, center, rim.at(phi + step), cell);
                step += self.resolution;
            }
            phi += size;
        }

        if let Some(formatter) = &self.label_formatter {
            let mut phi = self.angle_offset;
            for (i, &size) in sizes.iter().enumerate() {
                let at = if self.data.len() == 1 {
                    center
                } else {
                    middle.at(phi + size / 2.0)
                };
                let style = Style::new(select_color(&self.colors, i));
                buffer.set_string(&formatter(i, self.data[i]), style, at);
                phi += size;
            }
        }
    }
}

impl Default for PieChart {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(PieChart);

struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// Cell on the circle at angle `phi`, stretched horizontally.
    fn at(&self, phi: f64) -> Point {
        let x = round(X_STRETCH * self.radius * phi.cos());
        let y = round(self.radius * phi.sin());
        self.center.offset(x, y)
    }
}

/// Half-up rounding, so mirrored points land symmetrically.
fn round(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Rasterize a ray by stepping along its dominant axis.
fn draw_line(buffer: &mut Buffer, from: Point, to: Point, cell: Cell) {
    let (width, height) = ((to.x - from.x).abs(), (to.y - from.y).abs());
    if width == 0 && height == 0 {
        buffer.set_cell(from, cell);
        return;
    }

    if width > height {
        let (p1, p2) = if from.x <= to.x { (from, to) } else { (to, from) };
        let flip = if p1.y <= p2.y { 1.0 } else { -1.0 };
        let ratio = f64::from(height) / f64::from(width);
        for x in p1.x..=p2.x {
            let y = round(ratio * f64::from(x - p1.x) * flip);
            buffer.set_cell(Point::new(x, p1.y + y), cell);
        }
    } else {
        let (p1, p2) = if from.y <= to.y { (from, to) } else { (to, from) };
        let flip = if p1.x <= p2.x { 1.0 } else { -1.0 };
        let ratio = f64::from(width) / f64::from(height);
        for y in p1.y..=p2.y {
            let x = round(ratio * f64::from(y - p1.y) * flip);
            buffer.set_cell(Point::new(p1.x + x, y), cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::render;

    fn chart(data: &[f64]) -> PieChart {
        let mut chart = PieChart::default();
        chart.block = Block::plain();
        chart.data = data.to_vec();
        chart.resolution = 0.01;
        chart
    }

    fn fg_at(buffer: &Buffer, x: i32, y: i32) -> Option<Color> {
        buffer
            .get(Point::new(x, y))
            .filter(|c| c.ch == symbols::SHADED_BLOCKS[1])
            .map(|c| c.style.fg)
    }

    #[test]
    fn test_single_slice_fills_circle() {
        let mut chart = chart(&[1.0]);
        let buffer = render(&mut chart, 20, 11);
        // radius min(10 / 2, 5) = 5 around (10, 5)
        assert_eq!(fg_at(&buffer, 10, 5), Some(Color::RED));
        assert_eq!(fg_at(&buffer, 10, 0), Some(Color::RED));
        assert_eq!(fg_at(&buffer, 0, 5), Some(Color::RED));
        assert_eq!(fg_at(&buffer, 10, 10), Some(Color::RED));
        assert_eq!(fg_at(&buffer, 0, 0), None);
    }

    #[test]
    fn test_halves_split_left_and_right() {
        let mut chart = chart(&[1.0, 1.0]);
        let buffer = render(&mut chart, 20, 11);
        // Clockwise from the top: first slice covers the right half.
        assert_eq!(fg_at(&buffer, 16, 5), Some(Color::RED));
        assert_eq!(fg_at(&buffer, 4, 5), Some(Color::GREEN));
    }

    #[test]
    fn test_labels_at_half_radius() {
        let mut chart = chart(&[1.0, 1.0]);
        chart.label_formatter = Some(Box::new(|i, v| format!("{i}:{v}")));
        let buffer = render(&mut chart, 20, 11);
        // mid-angles 0 and pi on a radius 2.5 circle: x offsets +-5
        assert_eq!(buffer.get(Point::new(15, 5)).map(|c| c.ch), Some('0'));
        assert_eq!(buffer.get(Point::new(5, 5)).map(|c| c.ch), Some('1'));
    }

    #[test]
    fn test_single_slice_label_centered() {
        let mut chart = chart(&[3.0]);
        chart.label_formatter = Some(Box::new(|_, v| format!("{v}")));
        let buffer = render(&mut chart, 20, 11);
        assert_eq!(buffer.get(Point::new(10, 5)).map(|c| c.ch), Some('3'));
    }

    #[test]
    fn test_zero_sum_draws_nothing() {
        let mut chart = chart(&[0.0, 0.0]);
        let buffer = render(&mut chart, 10, 5);
        assert!(buffer.iter().all(|(_, c)| *c == Cell::CLEAR));
    }
}
