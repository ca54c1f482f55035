//! Hot-path benches: hit resolution, path building, full gesture settle.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use patlock_core::{GridLayout, PathBuilder, PatternLock, Point, Rect};
use web_time::Instant;

fn laid_out_grid() -> GridLayout {
    let mut grid = GridLayout::new(3, 3);
    grid.layout(Rect::new(0.0, 0.0, 300.0, 300.0));
    grid
}

/// A dense zigzag of move samples sweeping every cell.
fn zigzag_samples() -> Vec<Point> {
    let mut points = Vec::new();
    for row in 0..3 {
        for step in 0..=20 {
            let x = if row % 2 == 0 {
                step as f32 * 15.0
            } else {
                300.0 - step as f32 * 15.0
            };
            points.push(Point::new(x, row as f32 * 100.0 + 50.0));
        }
    }
    points
}

fn bench_resolve(c: &mut Criterion) {
    let grid = laid_out_grid();
    c.bench_function("grid_resolve_hit", |b| {
        b.iter(|| grid.resolve_at(black_box(Point::new(150.0, 150.0))))
    });
    c.bench_function("grid_resolve_miss", |b| {
        b.iter(|| grid.resolve_at(black_box(Point::new(-10.0, 400.0))))
    });
}

fn bench_path(c: &mut Criterion) {
    let grid = laid_out_grid();
    let samples = zigzag_samples();
    c.bench_function("path_zigzag_sweep", |b| {
        b.iter(|| {
            let mut path = PathBuilder::new(9);
            for &p in &samples {
                path.feed(&grid, black_box(p));
            }
            path.len()
        })
    });
}

fn bench_full_gesture(c: &mut Criterion) {
    let samples = zigzag_samples();
    c.bench_function("lock_full_gesture", |b| {
        b.iter(|| {
            let mut lock = PatternLock::default();
            lock.layout(Rect::new(0.0, 0.0, 300.0, 300.0));
            lock.on_pointer_down(black_box(Point::new(50.0, 50.0)));
            for &p in &samples {
                lock.on_pointer_move(p);
            }
            lock.on_pointer_up(Instant::now())
        })
    });
}

criterion_group!(benches, bench_resolve, bench_path, bench_full_gesture);
criterion_main!(benches);
