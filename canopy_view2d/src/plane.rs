// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

use crate::{PanZoom, ScaleLimits};

/// View of a y-up plane described by its center and visible height.
///
/// This is the state a per-pixel shading program consumes directly: the
/// program maps each pixel through the same formula as
/// [`PlaneViewport::view_to_plane`]. Unlike [`crate::Viewport2D`], `scale`
/// here is the height of the visible plane region, so zooming in makes it
/// smaller.
#[derive(Clone, Debug)]
pub struct PlaneViewport {
    view_size: Size,
    center: Point,
    scale: f64,
    limits: ScaleLimits,
}

impl PlaneViewport {
    /// Creates a plane view centered on `center` showing `scale` plane units
    /// vertically, with [`ScaleLimits::PLANE`].
    #[must_use]
    pub fn new(view_size: Size, center: Point, scale: f64) -> Self {
        let limits = ScaleLimits::PLANE;
        Self {
            view_size,
            center,
            scale: limits.clamp(scale),
            limits,
        }
    }

    /// Returns the view size in logical pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the view size. Center and scale are kept.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Plane point shown at the view center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Moves the view center.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Visible plane height.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the visible plane height, clamped into the limits.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.limits.clamp(scale);
    }

    /// Returns the current scale limits.
    #[must_use]
    pub fn scale_limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Sets the scale limits and clamps the current scale.
    pub fn set_scale_limits(&mut self, limits: ScaleLimits) {
        self.limits = limits;
        self.scale = limits.clamp(self.scale);
    }

    /// Width over height of the view; `1.0` for an empty view.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.view_size.height > 0.0 {
            self.view_size.width / self.view_size.height
        } else {
            1.0
        }
    }

    /// Maps a view point to the plane.
    ///
    /// With `(u, v)` the view point normalized to `[0, 1]` (top-left origin),
    /// the result is `center + ((u - 0.5) * aspect * scale, -(v - 0.5) * scale)`.
    #[must_use]
    pub fn view_to_plane(&self, pt: Point) -> Point {
        self.center + self.offset_at(pt, self.scale)
    }

    /// Maps a plane point to the view.
    #[must_use]
    pub fn plane_to_view(&self, p: Point) -> Point {
        let d = p - self.center;
        let u = d.x / (self.aspect() * self.scale) + 0.5;
        let v = -d.y / self.scale + 0.5;
        Point::new(u * self.view_size.width, v * self.view_size.height)
    }

    fn offset_at(&self, pt: Point, scale: f64) -> Vec2 {
        let u = pt.x / self.view_size.width;
        let v = pt.y / self.view_size.height;
        Vec2::new((u - 0.5) * self.aspect() * scale, -(v - 0.5) * scale)
    }

    fn has_area(&self) -> bool {
        self.view_size.width > 0.0 && self.view_size.height > 0.0
    }
}

impl PanZoom for PlaneViewport {
    fn pan_by_view(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO || !self.has_area() {
            return false;
        }
        // One pixel spans `scale / height` plane units on both axes.
        let units_per_px = self.scale / self.view_size.height;
        self.center += Vec2::new(-delta.x * units_per_px, delta.y * units_per_px);
        true
    }

    fn zoom_about_view_point(&mut self, anchor: Point, factor: f64) -> bool {
        if !(factor > 0.0 && factor.is_finite()) || !self.has_area() {
            return false;
        }
        let new_scale = self.limits.clamp(self.scale / factor);
        if (new_scale - self.scale).abs() <= f64::EPSILON * self.scale {
            return false;
        }
        let under_anchor = self.view_to_plane(anchor);
        self.center = under_anchor - self.offset_at(anchor, new_scale);
        self.scale = new_scale;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point, tol: f64) -> bool {
        (a - b).hypot() <= tol
    }

    fn view() -> PlaneViewport {
        PlaneViewport::new(Size::new(800.0, 400.0), Point::new(-0.5, 0.25), 2.5)
    }

    #[test]
    fn center_pixel_maps_to_center() {
        let vp = view();
        assert!(close(vp.view_to_plane(Point::new(400.0, 200.0)), vp.center(), 1e-12));
    }

    #[test]
    fn corners_follow_aspect_and_y_up() {
        let vp = view();
        // Aspect 2: the visible region is 5 units wide and 2.5 tall.
        let top_left = vp.view_to_plane(Point::ZERO);
        assert!(close(top_left, Point::new(-3.0, 1.5), 1e-12));
        let back = vp.plane_to_view(top_left);
        assert!(close(back, Point::ZERO, 1e-9));
    }

    #[test]
    fn pan_moves_content_with_the_pointer() {
        let mut vp = view();
        let grab = Point::new(120.0, 330.0);
        let under = vp.view_to_plane(grab);
        assert!(vp.pan_by_view(Vec2::new(37.0, -12.0)));
        let moved = Point::new(157.0, 318.0);
        assert!(close(vp.view_to_plane(moved), under, 1e-12));
    }

    #[test]
    fn zoom_keeps_plane_point_under_anchor() {
        let mut vp = view();
        let anchor = Point::new(611.0, 37.0);
        let before = vp.view_to_plane(anchor);
        assert!(vp.zoom_about_view_point(anchor, 4.0));
        assert!((vp.scale() - 0.625).abs() < 1e-12);
        assert!(close(vp.view_to_plane(anchor), before, 1e-12));
    }

    #[test]
    fn deep_zoom_clamps_at_limit_and_keeps_anchor() {
        let mut vp = view();
        let anchor = Point::new(200.0, 100.0);
        let before = vp.view_to_plane(anchor);
        for _ in 0..200 {
            vp.zoom_about_view_point(anchor, 2.0);
        }
        assert_eq!(vp.scale(), ScaleLimits::PLANE.min());
        assert!(close(vp.view_to_plane(anchor), before, 1e-9));

        for _ in 0..200 {
            vp.zoom_about_view_point(anchor, 0.25);
        }
        assert_eq!(vp.scale(), ScaleLimits::PLANE.max());
    }

    #[test]
    fn empty_view_ignores_input() {
        let mut vp = PlaneViewport::new(Size::ZERO, Point::ZERO, 2.5);
        assert!(!vp.pan_by_view(Vec2::new(1.0, 1.0)));
        assert!(!vp.zoom_about_view_point(Point::ZERO, 2.0));
        assert_eq!(vp.scale(), 2.5);
    }
}
