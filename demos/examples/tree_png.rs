// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a branch tree headlessly with the CPU canvas.
//!
//! Usage: `tree_png [ANGLE_DEGREES] [FROM] [TO] [TABLE_FILE]`
//!
//! Writes `canopy_tree.png`, then a second frame zoomed in on the center to
//! `canopy_tree_zoomed.png`, reusing the cached layer.

use std::env;

use canopy_demos::{init_logging, load_table, write_png};
use canopy_gesture::InputEvent;
use canopy_surface_cpu::CpuCanvas;
use canopy_viewer::TreeViewer;
use kurbo::{Point, Size};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    let angle: f64 = args.first().map_or(Ok(20.0), |a| a.parse())?;
    let from: usize = args.get(1).map_or(Ok(1), |a| a.parse())?;
    let to: usize = args.get(2).map_or(Ok(400), |a| a.parse())?;
    let table = load_table(args.get(3).map(String::as_str), 1000)?;

    let display = Size::new(800.0, 600.0);
    let mut viewer = TreeViewer::new(table);
    viewer.set_angle_degrees(angle);
    viewer.set_range(from..to);
    viewer.attach(CpuCanvas::new(display, 2.0));

    viewer.frame();
    let canvas = viewer.surface_mut().ok_or("viewer lost its canvas")?;
    let image = canvas.render_rgba8().ok_or("canvas has no pixels")?;
    write_png("canopy_tree.png", &image)?;
    eprintln!("Wrote canopy_tree.png ({}x{})", image.width, image.height);

    viewer.handle_event(&InputEvent::Wheel {
        position: Point::new(display.width / 2.0, display.height / 2.0),
        delta_y: -400.0,
    });
    viewer.frame();
    let canvas = viewer.surface_mut().ok_or("viewer lost its canvas")?;
    let image = canvas.render_rgba8().ok_or("canvas has no pixels")?;
    write_png("canopy_tree_zoomed.png", &image)?;
    eprintln!(
        "Wrote canopy_tree_zoomed.png (cache rebuilds: {})",
        viewer.cache().rebuild_count()
    );
    Ok(())
}
