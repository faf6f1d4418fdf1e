// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ViewportTransform;

/// Inclusive range a view's scale is clamped into.
///
/// Both bounds are always positive and ordered, so clamping never fails.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawScaleLimits"))]
pub struct ScaleLimits {
    min: f64,
    max: f64,
}

impl ScaleLimits {
    /// Default range for views that composite a cached raster.
    pub const RASTER: Self = Self { min: 0.1, max: 20.0 };

    /// Default range for views whose pixels are recomputed at every zoom level.
    pub const PLANE: Self = Self {
        min: 5e-4,
        max: 1e6,
    };

    /// Creates limits, swapping the bounds if they are given in reverse.
    ///
    /// A NaN bound leaves that side open. The lower bound never drops below
    /// [`f64::MIN_POSITIVE`], so a clamped scale stays invertible.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        // `f64::max` ignores a NaN operand.
        let min = lo.max(f64::MIN_POSITIVE);
        let max = if hi.is_nan() { f64::INFINITY } else { hi.max(min) };
        Self { min, max }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps a scale value into the range.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    /// Returns `t` with its scale clamped.
    ///
    /// The translate is left untouched. Callers keeping a zoom anchored must
    /// recompute translate from the clamped scale (see
    /// [`ViewportTransform::zoom_about`]).
    #[must_use]
    pub fn clamp_scale(&self, t: ViewportTransform) -> ViewportTransform {
        ViewportTransform {
            scale: self.clamp(t.scale),
            ..t
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawScaleLimits {
    min: f64,
    max: f64,
}

#[cfg(feature = "serde")]
impl From<RawScaleLimits> for ScaleLimits {
    fn from(raw: RawScaleLimits) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::RASTER
    }
}
