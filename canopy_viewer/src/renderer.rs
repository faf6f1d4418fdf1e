// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_surface::{Canvas2d, PhysicalSize, sync_backing_size};
use canopy_turtle::PathSet;
use canopy_view2d::{DEFAULT_FIT_MARGIN, Viewport2D};
use kurbo::Affine;

use crate::ContentCache;

/// Composites a [`ContentCache`] through a [`Viewport2D`] onto a canvas.
///
/// Each [`SurfaceRenderer::render`] call:
///
/// 1. Syncs the canvas backing buffer to `display * dpr`, skipping the frame
///    if the canvas is too small.
/// 2. Applies a pending auto-fit, snapping the view to the content bounds.
/// 3. Rebuilds the cache if stale.
/// 4. Clears and draws the cached layer under
///    `scale(dpr) * view * layer_to_content`.
#[derive(Clone, Debug)]
pub struct SurfaceRenderer {
    fit_margin: f64,
    fit_pending: bool,
    backing: Option<PhysicalSize>,
}

impl SurfaceRenderer {
    /// Creates a renderer that fits on its first frame.
    #[must_use]
    pub fn new(fit_margin: f64) -> Self {
        Self {
            fit_margin,
            fit_pending: true,
            backing: None,
        }
    }

    /// Fraction of the view the content occupies after a fit.
    #[must_use]
    pub fn fit_margin(&self) -> f64 {
        self.fit_margin
    }

    /// Fits the view to the content on the next frame that has a surface.
    pub fn request_fit(&mut self) {
        self.fit_pending = true;
    }

    /// Whether a fit is waiting for the next frame.
    #[must_use]
    pub fn is_fit_pending(&self) -> bool {
        self.fit_pending
    }

    /// Backing size used by the last rendered frame.
    #[must_use]
    pub fn backing_size(&self) -> Option<PhysicalSize> {
        self.backing
    }

    /// Snaps `view` so `paths` fills the fit margin, centered.
    ///
    /// Returns `false`, leaving the view alone, when there is no geometry or
    /// the view has no area.
    pub fn fit(&self, view: &mut Viewport2D, paths: &PathSet) -> bool {
        let Some(bounds) = paths.content_bounds() else {
            return false;
        };
        let fitted = view.fit_rect(bounds, self.fit_margin);
        #[cfg(feature = "tracing")]
        if fitted {
            let t = view.transform();
            tracing::debug!(
                scale = t.scale,
                tx = t.translate.x,
                ty = t.translate.y,
                "fit view to content"
            );
        }
        fitted
    }

    /// Draws one frame. Returns `false` if nothing could be drawn because
    /// the canvas has no usable size.
    pub fn render<C>(
        &mut self,
        canvas: &mut C,
        cache: &mut ContentCache<C::Layer>,
        paths: &PathSet,
        view: &mut Viewport2D,
    ) -> bool
    where
        C: Canvas2d + ?Sized,
    {
        let dpr = canvas.device_pixel_ratio();
        let Some(backing) = sync_backing_size(canvas, dpr) else {
            return false;
        };
        if self.backing != Some(backing) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                width = backing.width,
                height = backing.height,
                dpr,
                "backing resized"
            );
            self.backing = Some(backing);
        }

        view.set_view_size(canvas.display_size());
        if self.fit_pending {
            self.fit(view, paths);
            self.fit_pending = false;
        }

        canvas.set_transform(Affine::IDENTITY);
        canvas.clear();
        if let Some(cached) = cache.ensure(canvas, paths, dpr) {
            let transform =
                Affine::scale(dpr) * view.transform().to_affine() * cached.layer_to_content();
            canvas.draw_layer(cached.layer(), transform);
        }
        true
    }
}

impl Default for SurfaceRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_FIT_MARGIN)
    }
}

#[cfg(test)]
mod tests {
    use canopy_surface::StrokeStyle;
    use canopy_surface::recording::{DrawEvent, RecordingCanvas};
    use canopy_turtle::{PathSet, SequenceTable};
    use canopy_view2d::{PanZoom, ViewportTransform};
    use kurbo::{Point, Size, Vec2};

    use super::*;
    use crate::DEFAULT_MAX_LAYER_DIMENSION;

    fn paths() -> PathSet {
        let table = SequenceTable::from_sequences([vec![4_u64, 2, 1], vec![5, 16, 8, 4, 2, 1]]);
        PathSet::generate(&table, 0..2, 30_f64.to_radians(), 10.0)
    }

    fn last_layer_transform(canvas: &RecordingCanvas) -> Affine {
        canvas
            .events()
            .iter()
            .rev()
            .find_map(|e| match e {
                DrawEvent::DrawLayer { transform, .. } => Some(*transform),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn first_frame_fits_and_composites() {
        let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0), 2.0);
        let mut cache = ContentCache::new(StrokeStyle::DEFAULT, DEFAULT_MAX_LAYER_DIMENSION);
        let mut view = Viewport2D::new(Size::ZERO);
        let mut renderer = SurfaceRenderer::default();
        let paths = paths();

        assert!(renderer.render(&mut canvas, &mut cache, &paths, &mut view));
        assert!(!renderer.is_fit_pending());
        assert_eq!(renderer.backing_size(), PhysicalSize::new(800, 600));
        assert_eq!(view.view_size(), Size::new(400.0, 300.0));

        // The bounds center sits at the view center, in physical pixels.
        let bounds = paths.content_bounds().unwrap();
        let to_view = view.transform();
        let c = to_view.to_screen(bounds.center());
        assert!((c - Point::new(200.0, 150.0)).hypot() < 1e-9);

        // Layer pixels map through the dpr, view and layer placement.
        let cached = cache.cached().unwrap();
        let expected = Affine::scale(2.0) * to_view.to_affine() * cached.layer_to_content();
        assert_eq!(last_layer_transform(&canvas), expected);
        assert!(matches!(canvas.events()[0], DrawEvent::Resize(_)));
    }

    #[test]
    fn pan_reuses_cache_and_moves_layer() {
        let mut canvas = RecordingCanvas::new(Size::new(400.0, 300.0), 1.0);
        let mut cache = ContentCache::new(StrokeStyle::DEFAULT, DEFAULT_MAX_LAYER_DIMENSION);
        let mut view = Viewport2D::new(Size::ZERO);
        let mut renderer = SurfaceRenderer::default();
        let paths = paths();

        renderer.render(&mut canvas, &mut cache, &paths, &mut view);
        let before = last_layer_transform(&canvas);

        view.pan_by_view(Vec2::new(30.0, -10.0));
        renderer.render(&mut canvas, &mut cache, &paths, &mut view);
        let after = last_layer_transform(&canvas);

        assert_eq!(cache.rebuild_count(), 1);
        assert_eq!(canvas.resize_count(), 1);
        let expected = Affine::translate((30.0, -10.0)) * before;
        for (a, b) in after.as_coeffs().iter().zip(expected.as_coeffs()) {
            assert!((a - b).abs() < 1e-9, "{after:?} != {expected:?}");
        }
    }

    #[test]
    fn unavailable_canvas_defers_fit() {
        let mut canvas = RecordingCanvas::new(Size::new(0.0, 0.0), 1.0);
        let mut cache = ContentCache::new(StrokeStyle::DEFAULT, DEFAULT_MAX_LAYER_DIMENSION);
        let mut view = Viewport2D::new(Size::ZERO);
        let mut renderer = SurfaceRenderer::default();
        let paths = paths();

        assert!(!renderer.render(&mut canvas, &mut cache, &paths, &mut view));
        assert!(renderer.is_fit_pending());
        assert!(canvas.events().is_empty());
        assert_eq!(view.transform(), ViewportTransform::IDENTITY);

        canvas.set_display_size(Size::new(100.0, 100.0));
        assert!(renderer.render(&mut canvas, &mut cache, &paths, &mut view));
        assert!(!renderer.is_fit_pending());
    }

    #[test]
    fn empty_paths_clear_without_layer() {
        let mut canvas = RecordingCanvas::new(Size::new(50.0, 50.0), 1.0);
        let mut cache = ContentCache::new(StrokeStyle::DEFAULT, DEFAULT_MAX_LAYER_DIMENSION);
        let mut view = Viewport2D::new(Size::ZERO);
        let mut renderer = SurfaceRenderer::default();

        assert!(renderer.render(&mut canvas, &mut cache, &PathSet::default(), &mut view));
        assert_eq!(canvas.events().last(), Some(&DrawEvent::Clear));
        assert_eq!(view.transform(), ViewportTransform::IDENTITY);
    }
}
