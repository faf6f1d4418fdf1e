// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the fractal headlessly with the CPU shader surface.
//!
//! Usage: `fractal_png [ZOOM_STEPS] [TIME_SECONDS]`
//!
//! Each zoom step is one wheel notch toward a point on the set's boundary.

use std::env;

use canopy_demos::{init_logging, write_png};
use canopy_gesture::InputEvent;
use canopy_surface_cpu::CpuShaderSurface;
use canopy_viewer::FractalViewer;
use kurbo::{Point, Size};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    let steps: u32 = args.first().map_or(Ok(0), |a| a.parse())?;
    let time: f64 = args.get(1).map_or(Ok(0.0), |a| a.parse())?;

    let display = Size::new(480.0, 320.0);
    let mut viewer = FractalViewer::new();
    viewer
        .attach(CpuShaderSurface::new(display, 1.0))
        .map_err(|e| e.error)?;

    // Seahorse valley, between the main cardioid and the period-2 bulb.
    let target = Point::new(-0.745, 0.1);
    viewer.set_center(target);
    let anchor = viewer.view().plane_to_view(target);
    for _ in 0..steps {
        viewer.handle_event(&InputEvent::Wheel {
            position: anchor,
            delta_y: -100.0,
        });
    }

    viewer.frame(time);
    let surface = viewer.surface().ok_or("viewer lost its surface")?;
    let image = surface.image().ok_or("surface has no pixels")?;
    write_png("canopy_fractal.png", &image)?;
    eprintln!(
        "Wrote canopy_fractal.png ({}x{}, scale {:.3e})",
        image.width,
        image.height,
        viewer.view().scale()
    );
    Ok(())
}
