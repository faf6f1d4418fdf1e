// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_surface::{Canvas2d, Layer, PhysicalSize, StrokeStyle};
use canopy_turtle::PathSet;
use kurbo::{Affine, Point, Rect};

/// Default cap on either side of a cached layer, in physical pixels.
pub const DEFAULT_MAX_LAYER_DIMENSION: u32 = 8192;

/// A finished layer together with where it sits in content space.
#[derive(Debug)]
pub struct CachedLayer<L> {
    layer: L,
    origin: Point,
    resolution: f64,
}

impl<L: Layer> CachedLayer<L> {
    /// The rasterized content.
    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// Content point at the layer's top-left pixel corner.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Layer pixels per content unit.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Maps layer pixels to content coordinates.
    pub fn layer_to_content(&self) -> Affine {
        Affine::translate(self.origin.to_vec2()) * Affine::scale(self.resolution.recip())
    }
}

/// Rasterizes a [`PathSet`] once and keeps it until the geometry or style
/// changes.
///
/// The layer covers the content bounding box, padded by half the stroke
/// width so edge strokes are not clipped, at the device pixel ratio. Pan and
/// zoom never touch it; only [`ContentCache::invalidate`], a new style, or a
/// new pixel ratio cause a rebuild. When the box at that ratio would exceed
/// the maximum layer dimension, the resolution is lowered uniformly.
#[derive(Debug)]
pub struct ContentCache<L> {
    style: StrokeStyle,
    max_dimension: u32,
    entry: Option<CachedLayer<L>>,
    built_for: Option<f64>,
    rebuilds: u64,
}

impl<L: Layer> ContentCache<L> {
    /// Creates an empty cache.
    pub fn new(style: StrokeStyle, max_dimension: u32) -> Self {
        Self {
            style,
            max_dimension: max_dimension.max(1),
            entry: None,
            built_for: None,
            rebuilds: 0,
        }
    }

    /// Stroke used for every path.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Changes the stroke, invalidating the cache if it differs.
    pub fn set_style(&mut self, style: StrokeStyle) {
        if style != self.style {
            self.style = style;
            self.invalidate();
        }
    }

    /// Forces a rebuild on the next [`ContentCache::ensure`].
    pub fn invalidate(&mut self) {
        self.built_for = None;
    }

    /// Drops the layer. Used when the canvas it belongs to goes away.
    pub fn clear(&mut self) {
        self.entry = None;
        self.built_for = None;
    }

    /// Whether the cache is up to date for `device_pixel_ratio`.
    pub fn is_valid_for(&self, device_pixel_ratio: f64) -> bool {
        self.built_for == Some(device_pixel_ratio)
    }

    /// Number of rebuilds performed.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// The current layer, if built and non-empty.
    pub fn cached(&self) -> Option<&CachedLayer<L>> {
        self.entry.as_ref()
    }

    /// Returns the layer for `paths`, rebuilding it first if stale.
    ///
    /// Returns `None` when there is nothing to draw.
    pub fn ensure<C>(
        &mut self,
        canvas: &mut C,
        paths: &PathSet,
        device_pixel_ratio: f64,
    ) -> Option<&CachedLayer<L>>
    where
        C: Canvas2d<Layer = L> + ?Sized,
    {
        if !self.is_valid_for(device_pixel_ratio) {
            self.rebuild(canvas, paths, device_pixel_ratio);
        }
        self.entry.as_ref()
    }

    fn rebuild<C>(&mut self, canvas: &mut C, paths: &PathSet, device_pixel_ratio: f64)
    where
        C: Canvas2d<Layer = L> + ?Sized,
    {
        self.built_for = Some(device_pixel_ratio);
        self.rebuilds += 1;
        let Some(bounds) = paths.content_bounds() else {
            self.entry = None;
            return;
        };

        let pad = self.style.width.max(0.0) * 0.5;
        let padded = bounds.inflate(pad, pad);
        let (size, resolution) = layer_geometry(padded, device_pixel_ratio, self.max_dimension);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            paths = paths.len(),
            points = paths.total_points(),
            width = size.width,
            height = size.height,
            resolution,
            "rebuilding content cache"
        );

        // Reuse the existing layer when the size is unchanged.
        let mut layer = match self.entry.take() {
            Some(old) if old.layer.size() == size => old.layer,
            _ => canvas.create_layer(size),
        };
        layer.clear();
        layer.set_transform(
            Affine::scale(resolution) * Affine::translate(-padded.origin().to_vec2()),
        );
        layer.set_stroke(&self.style);

        let mut points = Vec::new();
        for path in paths.paths() {
            points.clear();
            points.extend(path.content_points());
            layer.stroke_polyline(&points);
        }
        layer.finish();

        self.entry = Some(CachedLayer {
            layer,
            origin: padded.origin(),
            resolution,
        });
    }
}

/// Pixel size and resolution for a layer covering `bounds`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Sizes are clamped into 1..=max_dimension before the cast."
)]
fn layer_geometry(
    bounds: Rect,
    device_pixel_ratio: f64,
    max_dimension: u32,
) -> (PhysicalSize, f64) {
    let width = bounds.width().max(1.0);
    let height = bounds.height().max(1.0);
    let max = f64::from(max_dimension);
    let dpr = if device_pixel_ratio > 0.0 && device_pixel_ratio.is_finite() {
        device_pixel_ratio
    } else {
        1.0
    };
    let resolution = dpr.min(max / width.max(height));
    let px = |extent: f64| (extent * resolution).ceil().clamp(1.0, max) as u32;
    let size = PhysicalSize {
        width: px(width),
        height: px(height),
    };
    (size, resolution)
}
