// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::{PanZoom, ScaleLimits, ViewportTransform};

/// 2D viewport over a content plane, backed by a [`ViewportTransform`].
///
/// `Viewport2D` tracks the logical size of a view and a bounded pan+zoom
/// transform mapping content coordinates into it. It can be used to:
/// - Convert points and rectangles between content and view coordinates.
/// - Pan and zoom around a chosen anchor point.
/// - Fit a content rectangle into the view.
///
/// The scale always stays within the configured [`ScaleLimits`].
#[derive(Clone, Debug)]
pub struct Viewport2D {
    view_size: Size,
    transform: ViewportTransform,
    limits: ScaleLimits,
}

impl Viewport2D {
    /// Creates a new viewport of `view_size` with the identity transform and
    /// [`ScaleLimits::RASTER`].
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        Self {
            view_size,
            transform: ViewportTransform::IDENTITY,
            limits: ScaleLimits::RASTER,
        }
    }

    /// Returns the logical view size.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the logical view size.
    ///
    /// This does not change the transform, only the visible content region.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Returns the current transform.
    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    /// Replaces the transform, clamping its scale into the limits.
    pub fn set_transform(&mut self, transform: ViewportTransform) {
        self.transform = self.limits.clamp_scale(transform);
    }

    /// Returns the current scale limits.
    #[must_use]
    pub fn scale_limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Sets the scale limits. The current scale is clamped into the new
    /// range, anchored at the view center.
    pub fn set_scale_limits(&mut self, limits: ScaleLimits) {
        self.limits = limits;
        let clamped = limits.clamp(self.transform.scale);
        if clamped != self.transform.scale {
            let center = self.view_size.to_rect().center();
            self.transform = self.transform.zoom_about(center, clamped);
        }
    }

    /// Returns the current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Fits `rect` into the view with the given margin and centers it.
    ///
    /// If the fitting scale falls outside the limits, the clamped scale is
    /// used and the rectangle stays centered. Returns `false`, leaving the
    /// transform unchanged, when the rectangle or the view is degenerate.
    pub fn fit_rect(&mut self, rect: Rect, margin: f64) -> bool {
        let mut fitted = self.transform.fit_to_box(rect, self.view_size, margin);
        if fitted == self.transform {
            return false;
        }
        let clamped = self.limits.clamp(fitted.scale);
        if clamped != fitted.scale {
            let view_center = self.view_size.to_rect().center().to_vec2();
            let translate = view_center - rect.center().to_vec2() * clamped;
            fitted = ViewportTransform::new(translate, clamped);
        }
        self.transform = fitted;
        true
    }

    /// Returns the content-space rectangle currently visible.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        self.view_to_content_rect(self.view_size.to_rect())
    }

    /// Converts a content-space point into view coordinates.
    #[must_use]
    pub fn content_to_view_point(&self, pt: Point) -> Point {
        self.transform.to_screen(pt)
    }

    /// Converts a view-space point into content coordinates.
    #[must_use]
    pub fn view_to_content_point(&self, pt: Point) -> Point {
        self.transform.to_content(pt)
    }

    /// Converts a view-space rectangle into content coordinates.
    #[must_use]
    pub fn view_to_content_rect(&self, rect: Rect) -> Rect {
        // Uniform positive scale keeps the corners ordered.
        Rect::from_points(
            self.view_to_content_point(rect.origin()),
            self.view_to_content_point(Point::new(rect.max_x(), rect.max_y())),
        )
    }
}

impl PanZoom for Viewport2D {
    fn pan_by_view(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.transform = self.transform.pan_by(delta);
        true
    }

    fn zoom_about_view_point(&mut self, anchor: Point, factor: f64) -> bool {
        if !(factor > 0.0 && factor.is_finite()) {
            return false;
        }
        let old_scale = self.transform.scale;
        let new_scale = self.limits.clamp(old_scale * factor);
        if (new_scale - old_scale).abs() < f64::EPSILON {
            return false;
        }
        self.transform = self.transform.zoom_about(anchor, new_scale);
        true
    }
}
