// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Surface: backend-agnostic drawing targets.
//!
//! Renderers in Canopy draw through the traits here so that the same view
//! logic can target a window, a browser canvas, a GPU pass, or a headless
//! buffer.
//!
//! - [`Surface`]: a display size in logical pixels, a device pixel ratio, and
//!   a physical backing buffer resized lazily by [`sync_backing_size`].
//! - [`Canvas2d`]: immediate-mode polylines plus offscreen [`Layer`]s that
//!   can be composited under an arbitrary affine transform.
//! - [`ShaderSurface`]: a single full-screen fragment pass driven by
//!   [`Uniforms`].
//! - [`recording`]: backends that log calls instead of producing pixels, for
//!   tests.
//!
//! Sizing rule: the backing buffer is `floor(display) * device_pixel_ratio`
//! physical pixels per axis, truncated. A display dimension below one logical
//! pixel makes the surface unavailable; renderers skip drawing rather than
//! fail.
//!
//! ```
//! use canopy_surface::{PhysicalSize, Surface, sync_backing_size};
//! use canopy_surface::recording::RecordingCanvas;
//! use kurbo::Size;
//!
//! let mut canvas = RecordingCanvas::new(Size::new(800.0, 600.0), 2.0);
//! let dpr = canvas.device_pixel_ratio();
//! assert_eq!(sync_backing_size(&mut canvas, dpr), PhysicalSize::new(1600, 1200));
//! assert_eq!(canvas.resize_count(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod recording;

mod draw;
mod shader;
mod size;
mod surface;

pub use draw::{Canvas2d, DrawContext, Layer, StrokeStyle};
pub use shader::{CpuShade, ShaderError, ShaderProgram, ShaderSurface, UniformValue, Uniforms};
pub use size::PhysicalSize;
pub use surface::{Surface, sync_backing_size};
