// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::PhysicalSize;

/// A drawable region with a logical display size and a physical backing
/// buffer.
///
/// The display size and device pixel ratio are owned by the host (a window,
/// an element on a page, a headless target). The backing buffer is resized
/// lazily by whoever draws, through [`sync_backing_size`].
pub trait Surface {
    /// Current display size in logical pixels.
    fn display_size(&self) -> Size;

    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Current backing buffer size, or `None` if none is allocated.
    fn backing_size(&self) -> Option<PhysicalSize>;

    /// Reallocates the backing buffer. Contents are discarded.
    fn set_backing_size(&mut self, size: PhysicalSize);

    /// Asks the host to route (or stop routing) a pointer's events here.
    ///
    /// Hosts without pointer capture can ignore this.
    fn set_pointer_capture(&mut self, pointer: u64, capture: bool) {
        let _ = (pointer, capture);
    }
}

/// Brings a surface's backing buffer in line with its display size.
///
/// `device_pixel_ratio` is the ratio to render at, which callers may cap below
/// the surface's own. The buffer is only reallocated when the computed size
/// differs from the current one. Returns the size to draw at, or `None` when
/// the surface is too small to draw to; in that case the existing buffer is
/// left alone.
pub fn sync_backing_size<S>(surface: &mut S, device_pixel_ratio: f64) -> Option<PhysicalSize>
where
    S: Surface + ?Sized,
{
    let wanted = PhysicalSize::from_display(surface.display_size(), device_pixel_ratio)?;
    if surface.backing_size() != Some(wanted) {
        surface.set_backing_size(wanted);
    }
    Some(wanted)
}
