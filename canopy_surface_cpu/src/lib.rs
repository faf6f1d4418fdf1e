// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU backends for `canopy_surface`.
//!
//! - [`CpuCanvas`]: a [`Canvas2d`](canopy_surface::Canvas2d) on top of the
//!   sparse-strips [`vello_cpu::RenderContext`], with offscreen layers that
//!   are rasterized once and composited as images.
//! - [`CpuShaderSurface`]: runs a program's CPU evaluation for every pixel,
//!   for hosts without a GPU and for tests.
//!
//! Both read back as straight-alpha [`RgbaImage`]s.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

mod canvas;
mod shader;

pub use canvas::{CpuCanvas, CpuLayer};
pub use shader::CpuShaderSurface;

/// Straight-alpha RGBA8 pixels, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// Returns the pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
