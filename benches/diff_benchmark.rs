//! Frame diff benchmark: FrameBuffer diffing and full renderer frames.
//!
//! Target: < 500µs for a 200×50 frame with every cell changed

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Mutex;
use trellis::layout::{Point, Rect};
use trellis::terminal::TestBackend;
use trellis::widget::{BarChart, Drawable, Plot};
use trellis::{Buffer, Cell, Color, FrameBuffer, Renderer, Rgb, Theme};

/// Create a buffer with random-ish content for benchmarking.
fn create_test_buffer(width: u16, height: u16, seed: u8) -> Buffer {
    let mut buffer = Buffer::new(Rect::from_size(width, height));
    for y in 0..height {
        for x in 0..width {
            let c = ((x + y + u16::from(seed)) % 26 + 65) as u8 as char; // A-Z
            let cell = Cell::new(c)
                .with_fg(Color::Rgb(Rgb::new(
                    ((x * 3 + u16::from(seed)) % 256) as u8,
                    ((y * 7 + u16::from(seed)) % 256) as u8,
                    ((x + y + u16::from(seed)) % 256) as u8,
                )))
                .with_bg(Color::Rgb(Rgb::new(20, 20, 30)));
            buffer.set_cell(Point::new(i32::from(x), i32::from(y)), cell);
        }
    }
    buffer
}

fn cached(buffer: &Buffer) -> FrameBuffer {
    let mut frame = FrameBuffer::new(buffer.area());
    frame.update(buffer);
    frame
}

fn diff_identical_buffers(c: &mut Criterion) {
    let buffer = create_test_buffer(200, 50, 0);
    let frame = cached(&buffer);

    c.bench_function("diff_200x50_identical", |b| {
        b.iter(|| frame.diff(black_box(&buffer)));
    });
}

fn diff_single_cell_change(c: &mut Criterion) {
    let buffer_a = create_test_buffer(200, 50, 0);
    let mut buffer_b = buffer_a.clone();
    // Change a single cell in the middle
    buffer_b.set_cell(Point::new(100, 25), Cell::new('X').with_fg(Color::RED));
    let frame = cached(&buffer_a);

    c.bench_function("diff_200x50_single_change", |b| {
        b.iter(|| frame.diff(black_box(&buffer_b)));
    });
}

fn diff_many_changes(c: &mut Criterion) {
    let frame = cached(&create_test_buffer(200, 50, 0));
    let buffer_b = create_test_buffer(200, 50, 1); // Different seed = different content

    c.bench_function("diff_200x50_full_change", |b| {
        b.iter(|| frame.diff(black_box(&buffer_b)));
    });
}

fn diff_vacated_cells(c: &mut Criterion) {
    let buffer_a = create_test_buffer(200, 50, 0);
    let mut buffer_b = buffer_a.clone();
    // A shrinking widget leaves its last rows unpainted
    for y in 40..50 {
        for x in 0..200 {
            buffer_b.remove(Point::new(x, y));
        }
    }
    let frame = cached(&buffer_a);

    c.bench_function("diff_200x50_vacated_rows", |b| {
        b.iter(|| frame.diff(black_box(&buffer_b)));
    });
}

fn chart_widgets(width: u16, height: u16) -> (Mutex<BarChart>, Mutex<Plot>) {
    let theme = Theme::dark();
    let mut bars = BarChart::new(&theme);
    bars.data = (0..20).map(|i| f64::from(i % 7 + 1)).collect();
    bars.set_area(Rect::new(0, 0, width, height / 2));

    let mut plot = Plot::new(&theme);
    plot.data = vec![(0..200).map(|i| (f64::from(i) / 10.0).sin() + 1.0).collect()];
    plot.set_area(Rect::new(0, height / 2, width, height / 2));

    (Mutex::new(bars), Mutex::new(plot))
}

fn renderer_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderer_frame");

    for (width, height) in [(80, 24), (120, 40), (200, 50)] {
        let (bars, plot) = chart_widgets(width, height);
        let widgets: [&Mutex<dyn Drawable>; 2] = [&bars, &plot];

        group.bench_with_input(
            BenchmarkId::new("steady_diff", format!("{width}x{height}")),
            &(width, height),
            |b, &(w, h)| {
                let mut renderer = Renderer::new(TestBackend::new(w, h)).unwrap();
                renderer.render(&widgets).unwrap();
                b.iter(|| renderer.render(black_box(&widgets)).unwrap());
            },
        );

        group.bench_with_input(
            BenchmarkId::new("full_redraw", format!("{width}x{height}")),
            &(width, height),
            |b, &(w, h)| {
                let mut renderer = Renderer::new(TestBackend::new(w, h)).unwrap();
                b.iter(|| renderer.render_full(black_box(&widgets)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    diff_identical_buffers,
    diff_single_cell_change,
    diff_many_changes,
    diff_vacated_cells,
    renderer_frames,
);
criterion_main!(benches);
