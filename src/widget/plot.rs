//! Line and scatter plots.

use super::{block_drawable, Block};
use crate::buffer::{Buffer, Cell};
use crate::layout::{Point, Rect};
use crate::style::{select_color, symbols, Color, Style, Theme};

const X_AXIS_LABELS_HEIGHT: i32 = 1;
const Y_AXIS_LABELS_WIDTH: i32 = 4;
const X_AXIS_LABELS_GAP: i32 = 2;
const Y_AXIS_LABELS_GAP: i32 = 1;

/// How data points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    /// Points connected by lines.
    #[default]
    Line,
    /// Bare points.
    Scatter,
}

/// One or more data series plotted against their index.
///
/// Point `j` of a series lands in column `j * horizontal_scale` of the
/// plotting area, at row `floor(value / max * (plot_height - 1))` from the
/// bottom. With axes on, a four-column y label gutter and a one-row x
/// label strip are reserved.
#[derive(Debug, Clone)]
pub struct Plot {
    /// Chrome and geometry.
    pub block: Block,
    /// Data series.
    pub data: Vec<Vec<f64>>,
    /// Fixed scale maximum; `None` uses the largest value of any series.
    pub max_val: Option<f64>,
    /// Series colors, cycled.
    pub line_colors: Vec<Color>,
    /// Axis line and label color.
    pub axes_color: Color,
    /// Whether to draw axes and labels.
    pub show_axes: bool,
    /// Glyph for points and line segments.
    pub marker: char,
    /// Lines or scatter.
    pub kind: PlotKind,
    /// Columns per data point.
    pub horizontal_scale: u16,
}

impl Plot {
    /// Empty plot styled from `theme`.
    pub fn new(theme: &Theme) -> Self {
        Self {
            block: Block::new(theme),
            data: Vec::new(),
            max_val: None,
            line_colors: theme.plot.lines.clone(),
            axes_color: theme.plot.axes,
            show_axes: true,
            marker: symbols::DOT,
            kind: PlotKind::Line,
            horizontal_scale: 1,
        }
    }

    /// The area points are plotted in.
    pub fn plot_area(&self) -> Rect {
        let inner = self.block.inner();
        if !self.show_axes {
            return inner;
        }
        let (min, max) = (inner.min(), inner.max());
        Rect::from_corners(
            min.x + Y_AXIS_LABELS_WIDTH + 1,
            min.y,
            max.x,
            max.y - X_AXIS_LABELS_HEIGHT - 1,
        )
    }

    fn draw_content(&mut self, buffer: &mut Buffer) {
        let max = self
            .max_val
            .or_else(|| self.data.iter().flatten().copied().reduce(f64::max));
        let Some(max) = max else {
            return;
        };
        if max == 0.0 {
            return;
        }

        if self.show_axes {
            self.draw_axes(buffer, max);
        }

        let area = self.plot_area();
        let scale = i32::from(self.horizontal_scale.max(1));
        let rows = f64::from(area.height) - 1.0;
        let (min, lim) = (area.min(), area.max());
        let point_at = |j: usize, value: f64| {
            let height = (value / max * rows) as i32;
            Point::new(min.x + j as i32 * scale, lim.y - 1 - height)
        };

        for (i, series) in self.data.iter().enumerate() {
            let cell = Cell::styled(self.marker, Style::new(select_color(&self.line_colors, i)));
            // Points past the right edge are never drawn.
            let visible = series
                .iter()
                .enumerate()
                .take_while(|(j, _)| (*j as i64) * i64::from(scale) < i64::from(area.width));
            for (j, &value) in visible {
                let point = point_at(j, value);
                if area.contains_point(point) {
                    buffer.set_cell(point, cell);
                }
                if self.kind == PlotKind::Line {
                    if let Some(&next) = series.get(j + 1) {
                        draw_line(buffer, area, point, point_at(j + 1, next), cell);
                    }
                }
            }
        }
    }

    fn draw_axes(&self, buffer: &mut Buffer, max: f64) {
        let inner = self.block.inner();
        let (min, lim) = (inner.min(), inner.max());
        let axes = Style::new(self.axes_color);
        let axis_x = min.x + Y_AXIS_LABELS_WIDTH;
        let axis_y = lim.y - X_AXIS_LABELS_HEIGHT - 1;
        let width = i32::from(inner.width);
        let height = i32::from(inner.height);
        let scale = i32::from(self.horizontal_scale.max(1));

        buffer.set_cell(
            Point::new(axis_x, axis_y),
            Cell::styled(symbols::BOTTOM_LEFT, Style::new(Color::WHITE)),
        );
        for i in (Y_AXIS_LABELS_WIDTH + 1)..width {
            buffer.set_cell(Point::new(min.x + i, axis_y), Cell::styled(symbols::HORIZONTAL_LINE, axes));
        }
        for i in 0..(height - X_AXIS_LABELS_HEIGHT - 1) {
            buffer.set_cell(Point::new(axis_x, min.y + i), Cell::styled(symbols::VERTICAL_LINE, axes));
        }

        buffer.set_string("0", axes, Point::new(axis_x, lim.y - 1));
        let mut x = axis_x + X_AXIS_LABELS_GAP * scale + 1;
        while x < lim.x - 1 {
            let label = ((x - axis_x - 1) / scale + 1).to_string();
            buffer.set_string(&label, axes, Point::new(x, lim.y - 1));
            x += (label.len() as i32 + X_AXIS_LABELS_GAP) * scale;
        }

        let step = Y_AXIS_LABELS_GAP + 1;
        let vertical_scale = max / f64::from(height - X_AXIS_LABELS_HEIGHT - 1);
        let mut i = 0;
        while i * step < height - 1 {
            let label = format!("{:.2}", f64::from(i * step) * vertical_scale);
            buffer.set_string(&label, axes, Point::new(min.x, lim.y - i * step - 2));
            i += 1;
        }
    }
}

impl Default for Plot {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

block_drawable!(Plot);

/// Join two points by stepping along the dominant axis, clipped to `area`.
fn draw_line(buffer: &mut Buffer, area: Rect, p1: Point, p2: Point, cell: Cell) {
    let (dx, dy) = ((p2.x - p1.x).abs(), (p2.y - p1.y).abs());
    let mut plot = |point: Point| {
        if area.contains_point(point) {
            buffer.set_cell(point, cell);
        }
    };

    if dx > dy {
        let denom = p2.x - p1.x;
        for x in p1.x.min(p2.x)..=p1.x.max(p2.x) {
            plot(Point::new(x, p1.y + (p2.y - p1.y) * (x - p1.x) / denom));
        }
    } else if dy > 0 {
        let denom = p2.y - p1.y;
        for y in p1.y.min(p2.y)..=p1.y.max(p2.y) {
            plot(Point::new(p1.x + (p2.x - p1.x) * (y - p1.y) / denom, y));
        }
    }
}
