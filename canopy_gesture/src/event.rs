// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use smallvec::SmallVec;

/// Host-assigned identifier of a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Positions of the active touch points, in view coordinates.
pub type Touches = SmallVec<[Point; 2]>;

/// Phase of a multi-touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    /// One or more touches began.
    Start,
    /// Touches moved.
    Move,
    /// One or more touches ended; the event lists those that remain.
    End,
    /// The platform cancelled the touch sequence.
    Cancel,
}

/// Input delivered to a [`crate::GestureController`].
///
/// Positions are in view space: logical pixels relative to the top-left of
/// the view.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer was pressed.
    PointerDown {
        /// Pointer identity.
        pointer: PointerId,
        /// Press position.
        position: Point,
    },
    /// A pointer moved.
    PointerMove {
        /// Pointer identity.
        pointer: PointerId,
        /// New position.
        position: Point,
    },
    /// A pointer was released.
    PointerUp {
        /// Pointer identity.
        pointer: PointerId,
        /// Release position.
        position: Point,
    },
    /// The host lost capture of a pointer (for example, the window lost focus).
    PointerCaptureLost {
        /// Pointer identity.
        pointer: PointerId,
    },
    /// A wheel or trackpad scroll.
    Wheel {
        /// Cursor position.
        position: Point,
        /// Vertical scroll amount; negative when scrolling up.
        delta_y: f64,
    },
    /// Multi-touch update listing every touch still on the surface.
    Touch {
        /// Event phase.
        phase: TouchPhase,
        /// Active touches after this event.
        touches: Touches,
    },
}

/// Pointer capture change requested by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Route this pointer's events here until released.
    Acquire(PointerId),
    /// Stop routing this pointer's events here.
    Release(PointerId),
}

/// What handling an event did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureResponse {
    /// The view changed and needs a redraw.
    pub changed: bool,
    /// Capture change the host should apply, if any.
    pub capture: Option<Capture>,
}

impl GestureResponse {
    pub(crate) const NONE: Self = Self {
        changed: false,
        capture: None,
    };

    pub(crate) fn changed(changed: bool) -> Self {
        Self {
            changed,
            capture: None,
        }
    }

    pub(crate) fn capture(capture: Capture) -> Self {
        Self {
            changed: false,
            capture: Some(capture),
        }
    }
}
