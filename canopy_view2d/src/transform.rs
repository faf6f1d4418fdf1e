// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Fraction of the view a fitted box occupies along its limiting axis.
pub const DEFAULT_FIT_MARGIN: f64 = 0.9;

/// Translate + uniform scale from content space to screen space.
///
/// A content point `c` maps to `c * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    /// Screen-space offset applied after scaling.
    pub translate: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
}

impl ViewportTransform {
    /// The identity transform: no translate, scale `1`.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from its parts.
    #[must_use]
    pub const fn new(translate: Vec2, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// Maps a content-space point to screen space.
    #[must_use]
    pub fn to_screen(&self, content: Point) -> Point {
        (content.to_vec2() * self.scale + self.translate).to_point()
    }

    /// Maps a screen-space point back to content space.
    #[must_use]
    pub fn to_content(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.translate) / self.scale).to_point()
    }

    /// Returns the transform mapping screen space back to content space.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv = 1.0 / self.scale;
        Self {
            translate: -self.translate * inv,
            scale: inv,
        }
    }

    /// Applies `delta` after `self`.
    ///
    /// The result maps `c` to `delta.to_screen(self.to_screen(c))`, which is
    /// how a relative pan/zoom step is folded into the current view.
    #[must_use]
    pub fn compose(&self, delta: Self) -> Self {
        Self {
            translate: self.translate * delta.scale + delta.translate,
            scale: self.scale * delta.scale,
        }
    }

    /// Returns a copy translated by a screen-space delta.
    ///
    /// The delta is not scaled by the zoom level.
    #[must_use]
    pub fn pan_by(&self, delta: Vec2) -> Self {
        Self {
            translate: self.translate + delta,
            scale: self.scale,
        }
    }

    /// Returns the transform with scale `new_scale` that keeps the content
    /// point currently under `anchor` at `anchor`.
    #[must_use]
    pub fn zoom_about(&self, anchor: Point, new_scale: f64) -> Self {
        let content = self.to_content(anchor);
        Self {
            translate: anchor.to_vec2() - content.to_vec2() * new_scale,
            scale: new_scale,
        }
    }

    /// Fits `bounds` into a view of `view_size`, centered.
    ///
    /// The box occupies `margin` of the view along its limiting axis. A box
    /// with zero extent on one axis is fitted along the other. If the box has
    /// no extent at all, is not finite, or the view is empty, `self` is
    /// returned unchanged.
    #[must_use]
    pub fn fit_to_box(&self, bounds: Rect, view_size: Size, margin: f64) -> Self {
        let (bw, bh) = (bounds.width(), bounds.height());
        if !(bw.is_finite() && bh.is_finite()) || (bw <= 0.0 && bh <= 0.0) {
            return *self;
        }
        if !(view_size.width > 0.0 && view_size.height > 0.0) {
            return *self;
        }

        let sx = if bw > 0.0 { view_size.width / bw } else { f64::INFINITY };
        let sy = if bh > 0.0 { view_size.height / bh } else { f64::INFINITY };
        let scale = sx.min(sy) * margin;

        let tx = (view_size.width - bw * scale) / 2.0 - bounds.min_x() * scale;
        let ty = (view_size.height - bh * scale) / 2.0 - bounds.min_y() * scale;
        Self {
            translate: Vec2::new(tx, ty),
            scale,
        }
    }

    /// Converts to a [`kurbo::Affine`]: translate, then scale.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
