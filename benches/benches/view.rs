// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_view2d::{PanZoom, PlaneViewport, Viewport2D, ViewportTransform};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};

fn bench_view(c: &mut Criterion) {
    let size = Size::new(1280.0, 720.0);
    let anchor = Point::new(913.0, 211.0);

    c.bench_function("view2d/fit_to_box", |b| {
        let content = Rect::new(-412.0, -987.0, 655.0, 12.0);
        let start = ViewportTransform::IDENTITY;
        b.iter(|| black_box(start.fit_to_box(black_box(content), size, 0.9)));
    });

    c.bench_function("view2d/viewport_wheel_zoom", |b| {
        let mut vp = Viewport2D::new(size);
        let mut factor = 1.05;
        b.iter(|| {
            // Alternate directions so the scale never settles on a limit.
            if !vp.zoom_about_view_point(anchor, factor) {
                factor = 1.0 / factor;
            }
            vp.pan_by_view(black_box(Vec2::new(0.5, -0.25)));
            black_box(vp.view_to_content_point(anchor))
        });
    });

    c.bench_function("view2d/plane_wheel_zoom", |b| {
        let mut plane = PlaneViewport::new(size, Point::new(-0.745, 0.1), 2.5);
        let mut factor = 1.05;
        b.iter(|| {
            if !plane.zoom_about_view_point(anchor, factor) {
                factor = 1.0 / factor;
            }
            black_box(plane.view_to_plane(anchor))
        });
    });
}

criterion_group!(benches, bench_view);
criterion_main!(benches);
