//! Renderer: widgets to buffers, buffers to a minimal set of backend writes.
//!
//! Each frame every widget is locked, drawn into a fresh [`Buffer`] sized
//! to its area, and unlocked. The buffers are then diffed against the
//! [`FrameBuffer`] in widget order, so later widgets win at overlapping
//! points, and only changed or vacated cells reach the backend. The
//! backend is flushed once per frame.

use crate::buffer::{Buffer, Cell, FrameBuffer};
use crate::error::Result;
use crate::layout::{Point, Rect};
use crate::terminal::Backend;
use crate::widget::{lock, Drawable};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// How [`Renderer::render`] decides what to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Write only cells that differ from the cached screen.
    #[default]
    Diff,
    /// Write every cell of every widget, every frame.
    Full,
}

/// Renderer configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RendererConfig {
    /// Write strategy.
    pub mode: RenderMode,
}

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Total frames rendered.
    pub frames: u64,
    /// Widgets drawn in the last frame.
    pub widgets: usize,
    /// Cells written with content in the last frame.
    pub cells_written: usize,
    /// Cells blanked in the last frame.
    pub cells_cleared: usize,
    /// Total cells sent to the backend across all frames.
    pub total_cells: u64,
    /// Duration of the last frame.
    pub last_render: Duration,
}

/// Diff-based renderer over a [`Backend`].
pub struct Renderer<B: Backend> {
    backend: B,
    frame: FrameBuffer,
    config: RendererConfig,
    stats: RenderStats,
}

impl<B: Backend> Renderer<B> {
    /// Create a renderer sized to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend size cannot be queried.
    pub fn new(backend: B) -> Result<Self> {
        Self::with_config(backend, RendererConfig::default())
    }

    /// Create a renderer with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend size cannot be queried.
    pub fn with_config(backend: B, config: RendererConfig) -> Result<Self> {
        let (width, height) = backend.size()?;
        Ok(Self {
            backend,
            frame: FrameBuffer::new(Rect::from_size(width, height)),
            config,
            stats: RenderStats::default(),
        })
    }

    /// Draw `widgets` and write the result, honoring the configured mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write or flush.
    pub fn render(&mut self, widgets: &[&Mutex<dyn Drawable>]) -> Result<()> {
        match self.config.mode {
            RenderMode::Diff => self.render_diff(widgets),
            RenderMode::Full => self.render_full(widgets),
        }
    }

    /// Draw `widgets` and write every in-area cell unconditionally.
    ///
    /// The cache is updated too, so diff rendering can resume afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write or flush.
    pub fn render_full(&mut self, widgets: &[&Mutex<dyn Drawable>]) -> Result<()> {
        let start = Instant::now();
        let buffers = draw_all(widgets);
        let bounds = self.frame.bounds();

        let mut written = 0;
        for buffer in &buffers {
            let mut cells: Vec<(Point, Cell)> = buffer.visible().map(|(p, c)| (p, *c)).collect();
            cells.sort_unstable_by_key(|(p, _)| *p);
            for (point, cell) in cells {
                if write_cell(&mut self.backend, bounds, point, &cell)? {
                    written += 1;
                }
            }
            self.frame.update(buffer);
        }
        self.backend.flush()?;

        self.finish_frame(start, buffers.len(), written, 0);
        Ok(())
    }

    fn render_diff(&mut self, widgets: &[&Mutex<dyn Drawable>]) -> Result<()> {
        let start = Instant::now();
        let buffers = draw_all(widgets);

        let mut changed: BTreeMap<Point, Cell> = BTreeMap::new();
        let mut removed: BTreeSet<Point> = BTreeSet::new();
        for buffer in &buffers {
            let diff = self.frame.diff(buffer);
            for point in diff.removed {
                changed.remove(&point);
                removed.insert(point);
            }
            for (point, cell) in diff.changed {
                removed.remove(&point);
                changed.insert(point, cell);
            }
            self.frame.update(buffer);
        }

        let bounds = self.frame.bounds();
        let mut written = 0;
        for (point, cell) in &changed {
            if write_cell(&mut self.backend, bounds, *point, cell)? {
                written += 1;
            }
        }
        let mut cleared = 0;
        for point in &removed {
            if write_cell(&mut self.backend, bounds, *point, &Cell::CLEAR)? {
                cleared += 1;
            }
        }
        self.backend.flush()?;

        self.finish_frame(start, buffers.len(), written, cleared);
        Ok(())
    }

    fn finish_frame(&mut self, start: Instant, widgets: usize, written: usize, cleared: usize) {
        let stats = &mut self.stats;
        stats.frames += 1;
        stats.widgets = widgets;
        stats.cells_written = written;
        stats.cells_cleared = cleared;
        stats.total_cells += (written + cleared) as u64;
        stats.last_render = start.elapsed();
        trace!(
            frame = stats.frames,
            widgets,
            written,
            cleared,
            elapsed_us = stats.last_render.as_micros() as u64,
            "frame rendered"
        );
    }

    /// Adopt new terminal bounds.
    ///
    /// Cached cells outside the bounds are dropped; cells inside stay
    /// cached, so call [`clear`](Self::clear) first for a clean repaint.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "renderer resized");
        self.frame.resize(Rect::from_size(width, height));
    }

    /// Blank the terminal and forget the cached screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to clear or flush.
    pub fn clear(&mut self) -> Result<()> {
        debug!("full clear");
        self.backend.clear()?;
        self.frame.clear();
        self.backend.flush()
    }

    /// Switch between diff and full rendering.
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.config.mode = mode;
    }

    /// Current configuration.
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render statistics.
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// The cached screen.
    pub const fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// The backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

/// Lock, draw and unlock each widget in order.
fn draw_all(widgets: &[&Mutex<dyn Drawable>]) -> Vec<Buffer> {
    widgets
        .iter()
        .map(|widget| {
            let mut guard = lock(*widget);
            let mut buffer = Buffer::new(guard.area());
            guard.draw(&mut buffer);
            buffer
        })
        .collect()
}

/// Write one cell if it lies within the terminal; reports whether it did.
fn write_cell<B: Backend>(backend: &mut B, bounds: Rect, point: Point, cell: &Cell) -> Result<bool> {
    if !bounds.contains_point(point) {
        return Ok(false);
    }
    match (u16::try_from(point.x), u16::try_from(point.y)) {
        (Ok(x), Ok(y)) => {
            backend.set_cell(x, y, cell)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use crate::terminal::TestBackend;
    use crate::widget::shared;
    use pretty_assertions::assert_eq;

    /// Paints its text at the top-left of its area; `hole` leaves a point unpainted.
    struct Label {
        area: Rect,
        text: String,
        hole: Option<Point>,
    }

    impl Label {
        fn new(area: Rect, text: &str) -> Self {
            Self {
                area,
                text: text.to_string(),
                hole: None,
            }
        }
    }

    impl Drawable for Label {
        fn area(&self) -> Rect {
            self.area
        }

        fn set_area(&mut self, area: Rect) {
            self.area = area;
        }

        fn draw(&mut self, buffer: &mut Buffer) {
            buffer.set_string(&self.text, Style::CLEAR, self.area.min());
            if let Some(hole) = self.hole {
                buffer.remove(hole);
            }
        }
    }

    fn renderer(width: u16, height: u16) -> Renderer<TestBackend> {
        Renderer::new(TestBackend::new(width, height)).unwrap()
    }

    #[test]
    fn test_first_frame_writes_widget_area() {
        let mut renderer = renderer(5, 2);
        let label = shared(Label::new(Rect::new(0, 0, 5, 1), "hi"));
        renderer.render(&[&*label as &Mutex<dyn Drawable>]).unwrap();

        assert_eq!(renderer.backend().row(0), "hi   ");
        assert_eq!(renderer.backend().writes(), 5);
        assert_eq!(renderer.backend().flushes(), 1);
        assert_eq!(renderer.stats().cells_written, 5);
    }

    #[test]
    fn test_wide_glyph_survives_ansi_frame() {
        use crate::terminal::AnsiBackend;

        let mut renderer = Renderer::new(AnsiBackend::with_size(Vec::new(), 3, 1)).unwrap();
        let label = shared(Label::new(Rect::new(0, 0, 3, 1), "日x"));
        renderer.render(&[&*label as &Mutex<dyn Drawable>]).unwrap();

        let bytes = String::from_utf8_lossy(renderer.backend().writer()).into_owned();
        assert_eq!(bytes, "\x1b[H\x1b[39m\x1b[49m日x");
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut renderer = renderer(5, 1);
        let label = shared(Label::new(Rect::new(0, 0, 5, 1), "hi"));
        let widgets: [&Mutex<dyn Drawable>; 1] = [&*label];
        renderer.render(&widgets).unwrap();
        renderer.backend_mut().reset_counters();

        renderer.render(&widgets).unwrap();
        assert_eq!(renderer.backend().writes(), 0);
        assert_eq!(renderer.backend().flushes(), 1);
    }

    #[test]
    fn test_only_changed_cells_written() {
        let mut renderer = renderer(5, 1);
        let label = shared(Label::new(Rect::new(0, 0, 5, 1), "hello"));
        let widgets: [&Mutex<dyn Drawable>; 1] = [&*label];
        renderer.render(&widgets).unwrap();
        renderer.backend_mut().reset_counters();

        lock(&label).text = "help!".to_string();
        renderer.render(&widgets).unwrap();
        assert_eq!(renderer.backend().writes(), 2);
        assert_eq!(renderer.backend().row(0), "help!");
    }

    #[test]
    fn test_later_widget_wins_overlap() {
        let mut renderer = renderer(4, 1);
        let under = shared(Label::new(Rect::new(0, 0, 4, 1), "aaaa"));
        let over = shared(Label::new(Rect::new(2, 0, 2, 1), "bb"));
        let widgets: [&Mutex<dyn Drawable>; 2] = [&*under, &*over];
        renderer.render(&widgets).unwrap();

        assert_eq!(renderer.backend().row(0), "aabb");
        assert_eq!(renderer.frame().get(Point::new(2, 0)).map(|c| c.ch), Some('b'));
    }

    #[test]
    fn test_vacated_point_is_blanked() {
        let mut renderer = renderer(3, 1);
        let label = shared(Label::new(Rect::new(0, 0, 3, 1), "abc"));
        let widgets: [&Mutex<dyn Drawable>; 1] = [&*label];
        renderer.render(&widgets).unwrap();

        lock(&label).hole = Some(Point::new(1, 0));
        renderer.backend_mut().reset_counters();
        renderer.render(&widgets).unwrap();

        assert_eq!(renderer.backend().row(0), "a c");
        assert_eq!(renderer.stats().cells_cleared, 1);
        assert!(renderer.frame().get(Point::new(1, 0)).is_none());
    }

    #[test]
    fn test_cells_outside_bounds_not_written() {
        let mut renderer = renderer(2, 1);
        let label = shared(Label::new(Rect::new(0, 0, 4, 1), "abcd"));
        renderer.render(&[&*label as &Mutex<dyn Drawable>]).unwrap();
        assert_eq!(renderer.backend().writes(), 2);
        assert_eq!(renderer.backend().row(0), "ab");
    }

    #[test]
    fn test_full_mode_rewrites_everything() {
        let mut renderer = Renderer::with_config(
            TestBackend::new(3, 1),
            RendererConfig { mode: RenderMode::Full },
        )
        .unwrap();
        let label = shared(Label::new(Rect::new(0, 0, 3, 1), "abc"));
        let widgets: [&Mutex<dyn Drawable>; 1] = [&*label];
        renderer.render(&widgets).unwrap();
        renderer.render(&widgets).unwrap();
        assert_eq!(renderer.backend().writes(), 6);
        assert_eq!(renderer.stats().frames, 2);
    }

    #[test]
    fn test_resize_drops_outside_cache_and_clear_forgets() {
        let mut renderer = renderer(4, 2);
        let label = shared(Label::new(Rect::new(0, 0, 4, 2), "abcd"));
        renderer.render(&[&*label as &Mutex<dyn Drawable>]).unwrap();
        assert_eq!(renderer.frame().len(), 8);

        renderer.backend_mut().resize(2, 2);
        renderer.resize(2, 2);
        assert_eq!(renderer.frame().len(), 4);

        renderer.clear().unwrap();
        assert!(renderer.frame().is_empty());
        assert_eq!(renderer.backend().clears(), 1);
    }
}
