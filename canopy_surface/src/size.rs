// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Size;

/// Size of a pixel buffer in physical (device) pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalSize {
    /// Width in pixels. Never zero for sizes produced by this crate.
    pub width: u32,
    /// Height in pixels. Never zero for sizes produced by this crate.
    pub height: u32,
}

impl PhysicalSize {
    /// Creates a size. Returns `None` if either dimension is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Backing size for a surface displayed at `display` logical pixels.
    ///
    /// Each dimension is `floor(display) * device_pixel_ratio`, truncated.
    /// Returns `None` when a display dimension is below one pixel or not
    /// finite, or the ratio is not a positive finite number: such a surface
    /// is unavailable and should not be drawn to.
    #[must_use]
    pub fn from_display(display: Size, device_pixel_ratio: f64) -> Option<Self> {
        if !(device_pixel_ratio > 0.0 && device_pixel_ratio.is_finite()) {
            return None;
        }
        let width = physical_dim(display.width, device_pixel_ratio)?;
        let height = physical_dim(display.height, device_pixel_ratio)?;
        Self::new(width, height)
    }

    /// Returns the size as floating-point pixels.
    #[must_use]
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Number of pixels.
    #[must_use]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Backing sizes are truncated to whole pixels; the range is checked first."
)]
fn physical_dim(logical: f64, dpr: f64) -> Option<u32> {
    if !(logical >= 1.0 && logical.is_finite()) {
        return None;
    }
    let px = logical.floor() * dpr;
    (px < f64::from(u32::MAX)).then(|| px as u32)
}
