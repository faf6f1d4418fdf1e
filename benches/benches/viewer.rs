// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_gesture::InputEvent;
use canopy_surface::StrokeStyle;
use canopy_surface::recording::{RecordingCanvas, RecordingLayer};
use canopy_surface_cpu::{CpuCanvas, CpuShaderSurface};
use canopy_turtle::{PathSet, SequenceTable};
use canopy_viewer::{ContentCache, DEFAULT_MAX_LAYER_DIMENSION, FractalViewer, TreeViewer};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

fn collatz(n: u64) -> Vec<u64> {
    let mut seq = vec![n];
    let mut v = n;
    while v > 1 {
        v = if v % 2 == 0 { v / 2 } else { 3 * v + 1 };
        seq.push(v);
    }
    seq
}

fn table(rows: u64) -> SequenceTable {
    SequenceTable::from_sequences((0..rows).map(|n| collatz(n.max(1))))
}

fn bench_cache(c: &mut Criterion) {
    let paths = PathSet::generate(&table(1_000), 1..1_000, 0.35, 10.0);

    let mut group = c.benchmark_group("viewer/cache_rebuild");
    group.bench_function("recording", |b| {
        let mut canvas = RecordingCanvas::new(Size::new(800.0, 600.0), 2.0);
        let mut cache: ContentCache<RecordingLayer> =
            ContentCache::new(StrokeStyle::DEFAULT, DEFAULT_MAX_LAYER_DIMENSION);
        b.iter(|| {
            cache.invalidate();
            black_box(cache.ensure(&mut canvas, &paths, 2.0).is_some())
        });
    });
    group.sample_size(10);
    group.bench_function("vello_cpu", |b| {
        let mut canvas = CpuCanvas::new(Size::new(800.0, 600.0), 1.0);
        let mut cache = ContentCache::new(StrokeStyle::DEFAULT, 2048);
        b.iter(|| {
            cache.invalidate();
            black_box(cache.ensure(&mut canvas, &paths, 1.0).is_some())
        });
    });
    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewer/frame");
    group.sample_size(20);

    group.bench_function("tree_pan_vello_cpu", |b| {
        let mut viewer = TreeViewer::new(table(300));
        viewer.attach(CpuCanvas::new(Size::new(400.0, 300.0), 1.0));
        viewer.frame();
        let mut x = 0.0;
        b.iter(|| {
            x += 1.0;
            viewer.handle_event(&InputEvent::Wheel {
                position: Point::new(200.0 + x % 50.0, 150.0),
                delta_y: if x % 2.0 == 0.0 { 1.0 } else { -1.0 },
            });
            black_box(viewer.frame())
        });
    });

    group.bench_function("fractal_cpu_64x64", |b| {
        b.iter_batched(
            || {
                let mut viewer = FractalViewer::new();
                viewer
                    .attach(CpuShaderSurface::new(Size::new(64.0, 64.0), 1.0))
                    .map_err(|e| e.error)
                    .expect("CPU surface runs the fractal program");
                viewer
            },
            |mut viewer| black_box(viewer.frame(0.0)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_cache, bench_frames);
criterion_main!(benches);
