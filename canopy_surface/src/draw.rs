// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};
use peniko::Color;

use crate::{PhysicalSize, Surface};

/// Stroke used for polylines.
///
/// `width` is in the units of the current transform's source space, so it
/// scales with zoom like the geometry does.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeStyle {
    /// Line width.
    pub width: f64,
    /// Straight (non-premultiplied) RGBA colour.
    pub rgba: [u8; 4],
}

impl StrokeStyle {
    /// Thin translucent green: width `1.0`, `rgb(100, 200, 100)` at 30% alpha.
    pub const DEFAULT: Self = Self {
        width: 1.0,
        rgba: [100, 200, 100, 77],
    };

    /// Returns the colour as a `peniko` colour.
    #[must_use]
    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.rgba;
        Color::from_rgba8(r, g, b, a)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Immediate-mode 2D drawing.
///
/// Coordinates passed to draw calls are mapped by the current transform into
/// the target's physical pixels.
pub trait DrawContext {
    /// Clears the whole target to transparent. The transform is not affected.
    fn clear(&mut self);

    /// Replaces the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Replaces the current stroke style.
    fn set_stroke(&mut self, style: &StrokeStyle);

    /// Strokes the open polyline through `points`.
    ///
    /// Fewer than two points draw nothing.
    fn stroke_polyline(&mut self, points: &[Point]);
}

/// Offscreen pixel buffer that can be drawn into and later composited.
pub trait Layer: DrawContext {
    /// Pixel size of the layer.
    fn size(&self) -> PhysicalSize;

    /// Completes pending drawing so the layer can be composited.
    ///
    /// Drawing after `finish` is allowed and requires another `finish`.
    fn finish(&mut self);
}

/// A surface that supports immediate-mode drawing and offscreen layers.
pub trait Canvas2d: Surface + DrawContext {
    /// Offscreen layer type produced by this canvas.
    type Layer: Layer;

    /// Allocates a transparent offscreen layer.
    fn create_layer(&mut self, size: PhysicalSize) -> Self::Layer;

    /// Composites a finished layer.
    ///
    /// `transform` maps layer pixel space (`0..width`, `0..height`) to this
    /// canvas's physical pixels; the current transform is ignored and left
    /// unchanged.
    fn draw_layer(&mut self, layer: &Self::Layer, transform: Affine);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stroke_is_translucent_green() {
        let s = StrokeStyle::default();
        assert_eq!(s.width, 1.0);
        assert_eq!(s.rgba, [100, 200, 100, 77]);
        let [r, g, b, a] = s.color().components;
        assert!((r - 100.0 / 255.0).abs() < 1e-6);
        assert!((g - 200.0 / 255.0).abs() < 1e-6);
        assert!((b - 100.0 / 255.0).abs() < 1e-6);
        assert!((a - 0.3).abs() < 0.01);
    }
}
