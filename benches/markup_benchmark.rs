//! Markup parser benchmark: plain, styled and malformed text.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trellis::markup::{parse_styles, strip_markup};
use trellis::Style;

fn plain_text(len: usize) -> String {
    "the quick brown fox jumps over the lazy dog "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn styled_text(spans: usize) -> String {
    (0..spans)
        .map(|i| match i % 3 {
            0 => format!("[cpu {i}](fg:red,mod:bold) "),
            1 => format!("[mem [{i}]](fg:green,bg:black) "),
            _ => format!("plain {i} "),
        })
        .collect()
}

/// Every span opens but never closes, forcing rollbacks.
fn malformed_text(spans: usize) -> String {
    (0..spans).map(|i| format!("[broken {i}](fg:red ")).collect()
}

fn parse_by_kind(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_styles");

    for size in [64, 512, 4096] {
        let inputs = [
            ("plain", plain_text(size)),
            ("styled", styled_text(size / 16)),
            ("malformed", malformed_text(size / 16)),
        ];
        for (kind, text) in inputs {
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_with_input(BenchmarkId::new(kind, size), &text, |b, text| {
                b.iter(|| parse_styles(black_box(text), Style::CLEAR));
            });
        }
    }

    group.finish();
}

fn strip(c: &mut Criterion) {
    let text = styled_text(256);
    c.bench_function("strip_markup_256_spans", |b| {
        b.iter(|| strip_markup(black_box(&text)));
    });
}

criterion_group!(benches, parse_by_kind, strip);
criterion_main!(benches);
