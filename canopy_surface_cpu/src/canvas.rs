// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use canopy_surface::{Canvas2d, DrawContext, Layer, PhysicalSize, StrokeStyle, Surface};
use kurbo::{Affine, Point, Size};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat, ImageSampler};
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath, Rect, Stroke};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings};

use crate::RgbaImage;

/// Render context plus the size it was created for.
struct Target {
    size: PhysicalSize,
    ctx: RenderContext,
}

impl Target {
    fn new(size: PhysicalSize) -> Self {
        let settings = RenderSettings {
            // Keep output on the u8 pipeline even if `f32_pipeline` is enabled elsewhere.
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        Self {
            size,
            ctx: RenderContext::new_with(dim(size.width), dim(size.height), settings),
        }
    }

    fn stroke(&mut self, transform: Affine, style: &StrokeStyle, points: &[Point]) {
        let Some(path) = polyline(points) else {
            return;
        };
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(style.color());
        self.ctx.set_stroke(Stroke::new(style.width));
        self.ctx.stroke_path(&path);
    }

    fn render(&mut self) -> Pixmap {
        let mut pixmap = Pixmap::new(dim(self.size.width), dim(self.size.height));
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }
}

/// `vello_cpu` addresses pixmaps with `u16`; larger buffers are cropped.
fn dim(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn affine_to_cpu(xf: Affine) -> CpuAffine {
    CpuAffine::new(xf.as_coeffs())
}

fn polyline(points: &[Point]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to((first.x, first.y));
    for p in rest {
        path.line_to((p.x, p.y));
    }
    Some(path)
}

/// [`Canvas2d`] rasterizing with `vello_cpu`.
///
/// The canvas has no window of its own: the host sets the display size and
/// pixel ratio, and reads finished frames back with
/// [`CpuCanvas::render_rgba8`].
pub struct CpuCanvas {
    display: Size,
    dpr: f64,
    target: Option<Target>,
    transform: Affine,
    stroke: StrokeStyle,
}

impl fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("display", &self.display)
            .field("dpr", &self.dpr)
            .field("backing", &self.target.as_ref().map(|t| t.size))
            .finish_non_exhaustive()
    }
}

impl CpuCanvas {
    /// Creates a canvas with no backing buffer.
    #[must_use]
    pub fn new(display: Size, device_pixel_ratio: f64) -> Self {
        Self {
            display,
            dpr: device_pixel_ratio,
            target: None,
            transform: Affine::IDENTITY,
            stroke: StrokeStyle::DEFAULT,
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

    /// Rasterizes everything drawn since the last clear.
    ///
    /// Returns `None` if there is no backing buffer.
    pub fn render_rgba8(&mut self) -> Option<RgbaImage> {
        let target = self.target.as_mut()?;
        let pixmap = target.render();
        let mut data = Vec::with_capacity(target.size.area() * 4);
        for p in pixmap.take_unpremultiplied() {
            data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        Some(RgbaImage {
            width: u32::from(dim(target.size.width)),
            height: u32::from(dim(target.size.height)),
            data,
        })
    }
}

impl Surface for CpuCanvas {
    fn display_size(&self) -> Size {
        self.display
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn backing_size(&self) -> Option<PhysicalSize> {
        self.target.as_ref().map(|t| t.size)
    }

    fn set_backing_size(&mut self, size: PhysicalSize) {
        #[cfg(feature = "tracing")]
        tracing::debug!(width = size.width, height = size.height, "cpu canvas resized");
        self.target = Some(Target::new(size));
    }
}

impl DrawContext for CpuCanvas {
    fn clear(&mut self) {
        if let Some(target) = &mut self.target {
            target.ctx.reset();
        }
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        self.stroke = *style;
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        if let Some(target) = &mut self.target {
            target.stroke(self.transform, &self.stroke, points);
        }
    }
}

impl Canvas2d for CpuCanvas {
    type Layer = CpuLayer;

    fn create_layer(&mut self, size: PhysicalSize) -> CpuLayer {
        CpuLayer {
            target: Target::new(size),
            transform: Affine::IDENTITY,
            stroke: StrokeStyle::DEFAULT,
            image: None,
        }
    }

    fn draw_layer(&mut self, layer: &CpuLayer, transform: Affine) {
        let (Some(target), Some(image)) = (&mut self.target, &layer.image) else {
            return;
        };
        let size = layer.target.size;
        target.ctx.set_transform(affine_to_cpu(transform));
        target.ctx.set_paint(CpuImage {
            image: image.clone(),
            sampler: ImageSampler::default(),
        });
        target.ctx.fill_rect(&Rect::new(
            0.0,
            0.0,
            f64::from(dim(size.width)),
            f64::from(dim(size.height)),
        ));
    }
}

/// Offscreen layer of a [`CpuCanvas`].
///
/// Drawing is recorded into the layer's own render context; [`Layer::finish`]
/// rasterizes it into an image the canvas can sample.
pub struct CpuLayer {
    target: Target,
    transform: Affine,
    stroke: StrokeStyle,
    image: Option<ImageSource>,
}

impl fmt::Debug for CpuLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuLayer")
            .field("size", &self.target.size)
            .field("finished", &self.image.is_some())
            .finish_non_exhaustive()
    }
}

impl DrawContext for CpuLayer {
    fn clear(&mut self) {
        self.target.ctx.reset();
        self.image = None;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        self.stroke = *style;
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        self.target.stroke(self.transform, &self.stroke, points);
        self.image = None;
    }
}

impl Layer for CpuLayer {
    fn size(&self) -> PhysicalSize {
        self.target.size
    }

    fn finish(&mut self) {
        let pixmap = self.target.render();
        let mut pixels = Vec::with_capacity(self.target.size.area() * 4);
        for p in pixmap.data() {
            pixels.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        let image_data = ImageData {
            data: Blob::from(pixels),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::AlphaPremultiplied,
            width: u32::from(dim(self.target.size.width)),
            height: u32::from(dim(self.target.size.height)),
        };
        self.image = Some(ImageSource::from_peniko_image_data(&image_data));
    }
}
