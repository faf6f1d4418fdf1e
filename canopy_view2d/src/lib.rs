// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy View 2D: pan/zoom state for interactive 2D views.
//!
//! This crate provides small, headless models of the view state shared by
//! Canopy's raster and shader viewers:
//! - [`ViewportTransform`]: translate + uniform scale from content space to
//!   screen space, with composition, inversion, and box fitting.
//! - [`ScaleLimits`]: the `[min, max]` range every scale is clamped into.
//! - [`Viewport2D`]: a bounded transform over a view of known size, used by
//!   cached-raster views.
//! - [`PlaneViewport`]: a center + visible-height description of a plane,
//!   used by views whose pixels are recomputed every frame.
//! - [`PanZoom`]: the pan and anchored-zoom operations both viewports share,
//!   so gesture handling can drive either one.
//!
//! It does **not** own any geometry or rendering backend.
//!
//! ## Zoom toward the pointer
//!
//! Every zoom is anchored: the content point under the anchor before the
//! zoom is still under the anchor afterwards, even when the requested scale
//! is clamped.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use canopy_view2d::{PanZoom, Viewport2D};
//!
//! let mut view = Viewport2D::new(Size::new(800.0, 600.0));
//! let anchor = Point::new(200.0, 150.0);
//! let before = view.view_to_content_point(anchor);
//!
//! view.zoom_about_view_point(anchor, 3.0);
//! let after = view.view_to_content_point(anchor);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! ## Fitting
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use canopy_view2d::ViewportTransform;
//!
//! let fitted = ViewportTransform::IDENTITY.fit_to_box(
//!     Rect::new(-50.0, -20.0, 50.0, 20.0),
//!     Size::new(200.0, 100.0),
//!     0.9,
//! );
//! assert!((fitted.scale - 1.8).abs() < 1e-12);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod limits;
mod plane;
mod transform;
mod viewport2d;

pub use limits::ScaleLimits;
pub use plane::PlaneViewport;
pub use transform::{DEFAULT_FIT_MARGIN, ViewportTransform};
pub use viewport2d::Viewport2D;

use kurbo::{Point, Vec2};

/// Pan and anchored-zoom operations on a view.
///
/// Positions and deltas are in view space (logical pixels relative to the
/// view's top-left corner). A zoom `factor` greater than one zooms in.
pub trait PanZoom {
    /// Pans by a raw view-space delta. Returns `true` if the view changed.
    fn pan_by_view(&mut self, delta: Vec2) -> bool;

    /// Zooms by `factor`, keeping the content under `anchor` fixed.
    ///
    /// The resulting scale is clamped to the view's limits. Returns `true`
    /// if the view changed.
    fn zoom_about_view_point(&mut self, anchor: Point, factor: f64) -> bool;
}
