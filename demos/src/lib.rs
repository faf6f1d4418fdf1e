// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the headless Canopy demos.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use canopy_surface_cpu::RgbaImage;
use canopy_turtle::SequenceTable;
use png::{BitDepth, ColorType, Encoder};

/// Collatz trajectory of `n`, ending at 1.
pub fn collatz(n: u64) -> Vec<u64> {
    let mut seq = vec![n];
    let mut v = n;
    while v > 1 {
        v = if v % 2 == 0 { v / 2 } else { 3 * v + 1 };
        seq.push(v);
    }
    seq
}

/// Table whose row `n` is the trajectory of `n`; row 0 holds `[1]`.
pub fn collatz_table(rows: u64) -> SequenceTable {
    SequenceTable::from_sequences((0..rows).map(|n| collatz(n.max(1))))
}

/// Loads a table from a file in the text table format, or generates
/// `fallback_rows` Collatz rows when no path is given.
pub fn load_table(path: Option<&str>, fallback_rows: u64) -> Result<SequenceTable, Box<dyn Error>> {
    match path {
        Some(path) => Ok(SequenceTable::parse(&std::fs::read_to_string(path)?)?),
        None => Ok(collatz_table(fallback_rows)),
    }
}

/// Writes straight-alpha pixels as an 8-bit RGBA PNG.
pub fn write_png(path: impl AsRef<Path>, image: &RgbaImage) -> Result<(), Box<dyn Error>> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = Encoder::new(file, image.width, image.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.data)?;
    Ok(())
}

/// Installs a `tracing` subscriber honouring `RUST_LOG`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
