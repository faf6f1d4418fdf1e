// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use canopy_view2d::PanZoom;

use crate::drag::PointerDrag;
use crate::pinch::Pinch;
use crate::{Capture, GestureResponse, InputEvent, PointerId, TouchPhase};

/// Tuning for a [`GestureController`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Wheel zoom factor is `exp(-wheel_sensitivity * delta_y)`.
    pub wheel_sensitivity: f64,
}

impl GestureConfig {
    /// Wheel tuning for cached-raster views.
    pub const RASTER: Self = Self {
        wheel_sensitivity: 0.002,
    };

    /// Wheel tuning for shader-driven plane views.
    pub const PLANE: Self = Self {
        wheel_sensitivity: 0.0012,
    };

    /// Zoom factor for a wheel delta; scrolling up (negative) zooms in.
    #[must_use]
    pub fn wheel_factor(&self, delta_y: f64) -> f64 {
        (-self.wheel_sensitivity * delta_y).exp()
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::RASTER
    }
}

/// Coarse state of a [`GestureController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// No gesture in progress.
    Idle,
    /// A captured pointer is panning the view.
    Panning,
    /// Two touches are zooming the view.
    PinchZooming,
}

#[derive(Clone, Copy, Debug)]
enum State {
    Idle,
    Panning(PointerDrag),
    PinchZooming(Pinch),
}

/// Converts input events into pan and anchored-zoom operations.
///
/// - `Idle -> Panning` on pointer down; the pointer should be captured.
/// - `Panning` applies each move's raw view-space delta as a pan.
/// - `Panning -> Idle` on pointer up or lost capture.
/// - Two touches enter `PinchZooming` from any state, cancelling a pan.
///   Fewer than two touches returns to `Idle`.
/// - Wheel events zoom about the cursor regardless of state.
///
/// The controller holds no view state of its own; each call mutates the
/// view passed in.
#[derive(Clone, Debug)]
pub struct GestureController {
    config: GestureConfig,
    state: State,
}

impl GestureController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: State::Idle,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.state {
            State::Idle => GesturePhase::Idle,
            State::Panning(_) => GesturePhase::Panning,
            State::PinchZooming(_) => GesturePhase::PinchZooming,
        }
    }

    /// The pointer being panned with, if any.
    #[must_use]
    pub fn captured_pointer(&self) -> Option<PointerId> {
        match self.state {
            State::Panning(drag) => Some(drag.pointer()),
            _ => None,
        }
    }

    /// Drops any gesture in progress without applying it.
    ///
    /// Returns the capture release the host should perform, if a pointer was
    /// captured.
    pub fn reset(&mut self) -> Option<Capture> {
        let release = self.captured_pointer().map(Capture::Release);
        self.state = State::Idle;
        release
    }

    /// Handles one event, mutating `view` as needed.
    pub fn handle<V>(&mut self, event: &InputEvent, view: &mut V) -> GestureResponse
    where
        V: PanZoom + ?Sized,
    {
        match event {
            InputEvent::PointerDown { pointer, position } => match self.state {
                State::Idle => {
                    self.state = State::Panning(PointerDrag::new(*pointer, *position));
                    GestureResponse::capture(Capture::Acquire(*pointer))
                }
                State::Panning(_) | State::PinchZooming(_) => GestureResponse::NONE,
            },
            InputEvent::PointerMove { pointer, position } => match &mut self.state {
                State::Panning(drag) => match drag.move_to(*pointer, *position) {
                    Some(delta) => GestureResponse::changed(view.pan_by_view(delta)),
                    None => GestureResponse::NONE,
                },
                _ => GestureResponse::NONE,
            },
            InputEvent::PointerUp { pointer, .. } => match self.state {
                State::Panning(drag) if drag.pointer() == *pointer => {
                    self.state = State::Idle;
                    GestureResponse::capture(Capture::Release(*pointer))
                }
                _ => GestureResponse::NONE,
            },
            InputEvent::PointerCaptureLost { pointer } => {
                if self.captured_pointer() == Some(*pointer) {
                    self.state = State::Idle;
                }
                GestureResponse::NONE
            }
            InputEvent::Wheel { position, delta_y } => {
                let factor = self.config.wheel_factor(*delta_y);
                GestureResponse::changed(view.zoom_about_view_point(*position, factor))
            }
            InputEvent::Touch { phase, touches } => {
                self.handle_touch(*phase, touches.as_slice(), view)
            }
        }
    }

    fn handle_touch<V>(
        &mut self,
        phase: TouchPhase,
        touches: &[Point],
        view: &mut V,
    ) -> GestureResponse
    where
        V: PanZoom + ?Sized,
    {
        let pair = match (phase, touches) {
            (TouchPhase::Cancel, _) | (_, [] | [_]) => None,
            (_, [a, b, ..]) => Some((*a, *b)),
        };

        let Some((a, b)) = pair else {
            if matches!(self.state, State::PinchZooming(_)) {
                self.state = State::Idle;
            }
            return GestureResponse::NONE;
        };

        if phase == TouchPhase::Move {
            if let State::PinchZooming(pinch) = &mut self.state {
                return match pinch.update(a, b) {
                    Some(step) => GestureResponse::changed(
                        view.zoom_about_view_point(step.anchor, step.factor),
                    ),
                    None => GestureResponse::NONE,
                };
            }
        }

        // New pair of touches: start measuring from here, abandoning any pan.
        let release = self.captured_pointer().map(Capture::Release);
        self.state = State::PinchZooming(Pinch::new(a, b));
        GestureResponse {
            changed: false,
            capture: release,
        }
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
