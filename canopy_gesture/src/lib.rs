// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Gesture: pan/zoom gesture recognition for interactive views.
//!
//! This crate turns raw input events into pan and anchored-zoom operations
//! on any view implementing [`canopy_view2d::PanZoom`]. It provides:
//!
//! - [`drag`]: per-pointer drag tracking with incremental and total offsets.
//! - [`pinch`]: two-finger distance tracking producing incremental zoom steps.
//! - [`GestureController`]: the `Idle` / `Panning` / `PinchZooming` state
//!   machine tying the two together with wheel zoom.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use canopy_gesture::{GestureConfig, GestureController, InputEvent, PointerId};
//! use canopy_view2d::Viewport2D;
//!
//! let mut view = Viewport2D::new(Size::new(800.0, 600.0));
//! let mut gestures = GestureController::new(GestureConfig::RASTER);
//!
//! let pointer = PointerId(1);
//! let down = InputEvent::PointerDown { pointer, position: Point::new(10.0, 10.0) };
//! gestures.handle(&down, &mut view);
//! let response = gestures.handle(
//!     &InputEvent::PointerMove { pointer, position: Point::new(25.0, 5.0) },
//!     &mut view,
//! );
//! assert!(response.changed);
//! assert_eq!(view.transform().translate, kurbo::Vec2::new(15.0, -5.0));
//! ```
//!
//! ## Capture
//!
//! Hosts are expected to route move/up events for a captured pointer to the
//! controller even when the pointer leaves the surface. The controller
//! reports when capture should be acquired or released through
//! [`GestureResponse::capture`]; hosts report lost capture with
//! [`InputEvent::PointerCaptureLost`].
//!
//! Zoom factors follow one convention throughout: greater than one zooms in.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod pinch;

mod controller;
mod event;

pub use controller::{GestureConfig, GestureController, GesturePhase};
pub use event::{Capture, GestureResponse, InputEvent, PointerId, TouchPhase, Touches};
