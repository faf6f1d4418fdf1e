// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_gesture::GestureConfig;
use canopy_surface::StrokeStyle;
use canopy_turtle::DEFAULT_STEP_LENGTH;
use canopy_view2d::{DEFAULT_FIT_MARGIN, ScaleLimits};
use kurbo::{Point, Vec2};

use crate::DEFAULT_MAX_LAYER_DIMENSION;

/// Settings for a [`crate::TreeViewer`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeViewerConfig {
    /// Turn angle in degrees.
    pub angle_degrees: f64,
    /// First selected table row.
    pub range_start: usize,
    /// One past the last selected table row.
    pub range_end: usize,
    /// Turtle step length in content units.
    pub step_length: f64,
    /// Stroke for every branch.
    pub stroke: StrokeStyle,
    /// Bounds on the view scale.
    pub scale_limits: ScaleLimits,
    /// Fraction of the view filled by an auto-fit.
    pub fit_margin: f64,
    /// Largest side of the cached layer, in physical pixels.
    pub max_layer_dimension: u32,
    /// Gesture tuning.
    pub gestures: GestureConfig,
}

impl Default for TreeViewerConfig {
    fn default() -> Self {
        Self {
            angle_degrees: 45.0,
            range_start: 1,
            range_end: 100,
            step_length: DEFAULT_STEP_LENGTH,
            stroke: StrokeStyle::DEFAULT,
            scale_limits: ScaleLimits::RASTER,
            fit_margin: DEFAULT_FIT_MARGIN,
            max_layer_dimension: DEFAULT_MAX_LAYER_DIMENSION,
            gestures: GestureConfig::RASTER,
        }
    }
}

/// Settings for a [`crate::FractalViewer`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FractalViewerConfig {
    /// Initial plane point at the view center.
    pub center: Point,
    /// Initial visible plane height.
    pub scale: f64,
    /// Constant added at every iteration.
    pub c: Vec2,
    /// Iteration budget per pixel.
    pub iterations: u32,
    /// Orbit-derivative threshold below which a point counts as interior.
    pub interior_epsilon: f32,
    /// Escape radius.
    pub escape_radius: f32,
    /// Upper bound on the rendering pixel ratio; `None` renders at the
    /// surface's own ratio.
    pub max_device_pixel_ratio: Option<f64>,
    /// Bounds on the visible plane height.
    pub scale_limits: ScaleLimits,
    /// Gesture tuning.
    pub gestures: GestureConfig,
}

impl Default for FractalViewerConfig {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            scale: 2.5,
            c: Vec2::ZERO,
            iterations: 256,
            interior_epsilon: 8e-3,
            escape_radius: 1e3,
            max_device_pixel_ratio: Some(2.0),
            scale_limits: ScaleLimits::PLANE,
            gestures: GestureConfig::PLANE,
        }
    }
}
