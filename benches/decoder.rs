//! Decoder and renderer benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mochi_edit::document::{Tab, TabList};
use mochi_edit::input::{Decoder, Direction};
use mochi_edit::render::{Palette, Renderer};
use mochi_edit::term::WindowSize;

fn bench_decode_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Plain typing with line breaks
    let typing = "fn main() {}\r".repeat(1000);
    group.throughput(Throughput::Bytes(typing.len() as u64));

    group.bench_function("typing", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            black_box(decoder.decode_all(black_box(typing.as_bytes())))
        })
    });

    group.finish();
}

fn bench_decode_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Arrows, selection, tab switching and page keys
    let keys = "\x1b[A\x1b[1;2D\x1b[1;5C\x1b[5~\x1b[3~\x1bOH".repeat(500);
    group.throughput(Throughput::Bytes(keys.len() as u64));

    group.bench_function("navigation", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            black_box(decoder.decode_all(black_box(keys.as_bytes())))
        })
    });

    group.finish();
}

fn bench_decode_mouse(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder");

    // Wheel reports as sent by SGR mouse mode
    let wheel = "\x1b[<64;120;40M\x1b[<65;120;40M".repeat(500);
    group.throughput(Throughput::Bytes(wheel.len() as u64));

    group.bench_function("mouse_wheel", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            black_box(decoder.decode_all(black_box(wheel.as_bytes())))
        })
    });

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderer");

    let mut tab = Tab::new();
    for byte in "let value = compute(42);\r".repeat(500).bytes() {
        tab.write(byte);
    }
    // Select a block in the middle of the view
    tab.jump_top();
    tab.move_lines(Direction::Down, 10);
    tab.anchor = tab.cursor;
    for _ in 0..5 {
        tab.move_cursor(Direction::Down, true);
    }
    let mut tabs = TabList::new(tab);

    let renderer = Renderer::new(Palette::default());
    let size = WindowSize::new(120, 40);

    group.bench_function("full_frame", |b| {
        let mut out = Vec::with_capacity(64 * 1024);
        b.iter(|| {
            out.clear();
            renderer.draw(&mut out, &mut tabs, "", size).unwrap();
            black_box(out.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decode_typing,
    bench_decode_navigation,
    bench_decode_mouse,
    bench_render_frame,
);
criterion_main!(benches);
