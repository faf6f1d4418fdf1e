// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use canopy_surface::{
    CpuShade, PhysicalSize, ShaderError, ShaderProgram, ShaderSurface, Surface, Uniforms,
};
use kurbo::{Point, Size};

use crate::RgbaImage;

/// [`ShaderSurface`] that evaluates a program's CPU path for every pixel.
///
/// Programs without a CPU path are rejected at compile time.
#[derive(Debug)]
pub struct CpuShaderSurface {
    display: Size,
    dpr: f64,
    backing: Option<PhysicalSize>,
    shade: Option<CpuShade>,
    uniforms: Uniforms,
    pixels: Vec<u8>,
}

impl CpuShaderSurface {
    /// Creates a surface with no backing buffer and no program.
    #[must_use]
    pub fn new(display: Size, device_pixel_ratio: f64) -> Self {
        Self {
            display,
            dpr: device_pixel_ratio,
            backing: None,
            shade: None,
            uniforms: Uniforms::new(),
            pixels: Vec::new(),
        }
    }

    /// Changes the display size. The backing buffer follows on the next sync.
    pub fn set_display_size(&mut self, display: Size) {
        self.display = display;
    }

    /// Changes the pixel ratio. The backing buffer follows on the next sync.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    /// Copy of the last full-screen pass, or `None` if there is no backing
    /// buffer.
    #[must_use]
    pub fn image(&self) -> Option<RgbaImage> {
        let size = self.backing?;
        Some(RgbaImage {
            width: size.width,
            height: size.height,
            data: self.pixels.clone(),
        })
    }
}

impl Surface for CpuShaderSurface {
    fn display_size(&self) -> Size {
        self.display
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn backing_size(&self) -> Option<PhysicalSize> {
        self.backing
    }

    fn set_backing_size(&mut self, size: PhysicalSize) {
        #[cfg(feature = "tracing")]
        tracing::debug!(width = size.width, height = size.height, "cpu shader surface resized");
        self.backing = Some(size);
        self.pixels = vec![0; size.area() * 4];
    }
}

impl ShaderSurface for CpuShaderSurface {
    fn compile(&mut self, program: &ShaderProgram) -> Result<(), ShaderError> {
        let shade = program.cpu.ok_or(ShaderError::Unsupported {
            label: program.label,
        })?;
        self.shade = Some(shade);
        Ok(())
    }

    fn set_uniforms(&mut self, uniforms: &Uniforms) {
        self.uniforms.clone_from(uniforms);
    }

    fn draw_fullscreen(&mut self) {
        let (Some(shade), Some(size)) = (self.shade, self.backing) else {
            return;
        };
        let width = size.width as usize;
        for (i, px) in self.pixels.chunks_exact_mut(4).enumerate() {
            let x = (i % width) as f64 + 0.5;
            let y = (i / width) as f64 + 0.5;
            px.copy_from_slice(&shade(&self.uniforms, Point::new(x, y)));
        }
    }
}

#[cfg(test)]
mod tests {
    use canopy_surface::{UniformValue, sync_backing_size};

    use super::*;

    #[expect(
        clippy::cast_possible_truncation,
        reason = "Test coordinates are small."
    )]
    fn gradient(u: &Uniforms, p: Point) -> [u8; 4] {
        let level = u.u32("u_level").unwrap_or(0) as u8;
        [p.x as u8, p.y as u8, level, 255]
    }

    const GRADIENT: ShaderProgram = ShaderProgram {
        label: "gradient",
        wgsl: "",
        cpu: Some(gradient),
    };

    #[test]
    fn evaluates_every_pixel_at_its_centre() {
        let mut s = CpuShaderSurface::new(Size::new(3.0, 2.0), 2.0);
        s.compile(&GRADIENT).unwrap();
        sync_backing_size(&mut s, 1.0);
        s.set_uniforms(&Uniforms::new().with("u_level", UniformValue::U32(9)));
        s.draw_fullscreen();

        let img = s.image().unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        // Pixel (2, 1) has centre (2.5, 1.5).
        assert_eq!(img.pixel(2, 1), Some([2, 1, 9, 255]));
        assert_eq!(img.pixel(0, 0), Some([0, 0, 9, 255]));
    }

    #[test]
    fn program_without_cpu_path_is_unsupported() {
        let mut s = CpuShaderSurface::new(Size::new(3.0, 2.0), 1.0);
        let gpu_only = ShaderProgram {
            cpu: None,
            ..GRADIENT
        };
        assert_eq!(
            s.compile(&gpu_only),
            Err(ShaderError::Unsupported { label: "gradient" })
        );
    }

    #[test]
    fn draw_without_backing_is_noop() {
        let mut s = CpuShaderSurface::new(Size::new(0.0, 0.0), 1.0);
        s.compile(&GRADIENT).unwrap();
        s.draw_fullscreen();
        assert!(s.image().is_none());
    }
}
