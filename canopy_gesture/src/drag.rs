// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking for a single captured pointer.
//!
//! ## Usage
//!
//! 1) Begin a drag with [`PointerDrag::new`] when the pointer is pressed.
//! 2) On each move, call [`PointerDrag::move_to`] to get the delta since the
//!    previous position. Moves from other pointers return `None`.
//! 3) Optionally read [`PointerDrag::total_offset`] for the offset since the
//!    press.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use canopy_gesture::PointerId;
//! use canopy_gesture::drag::PointerDrag;
//!
//! let mut drag = PointerDrag::new(PointerId(7), Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.move_to(PointerId(7), Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.move_to(PointerId(8), Point::new(99.0, 99.0)), None);
//! assert_eq!(drag.total_offset(), Vec2::new(5.0, 5.0));
//! ```

use kurbo::{Point, Vec2};

use crate::PointerId;

/// An in-progress drag of one pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDrag {
    pointer: PointerId,
    press_pos: Point,
    last_pos: Point,
}

impl PointerDrag {
    /// Starts tracking `pointer`, pressed at `pos`.
    #[must_use]
    pub fn new(pointer: PointerId, pos: Point) -> Self {
        Self {
            pointer,
            press_pos: pos,
            last_pos: pos,
        }
    }

    /// The pointer this drag follows.
    #[must_use]
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Where the drag started.
    #[must_use]
    pub fn press_pos(&self) -> Point {
        self.press_pos
    }

    /// Most recent position of the tracked pointer.
    #[must_use]
    pub fn last_pos(&self) -> Point {
        self.last_pos
    }

    /// Records a move of `pointer` to `pos`, returning the delta since the
    /// previous position.
    ///
    /// Returns `None` and leaves state untouched for any other pointer.
    pub fn move_to(&mut self, pointer: PointerId, pos: Point) -> Option<Vec2> {
        if pointer != self.pointer {
            return None;
        }
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        Some(delta)
    }

    /// Offset from the press position to the most recent position.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last_pos - self.press_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PointerId = PointerId(1);

    #[test]
    fn new_drag_has_zero_offset() {
        let drag = PointerDrag::new(P, Point::new(10.0, 20.0));
        assert_eq!(drag.total_offset(), Vec2::ZERO);
        assert_eq!(drag.press_pos(), drag.last_pos());
        assert_eq!(drag.pointer(), P);
    }

    #[test]
    fn multiple_moves_track_incremental_deltas() {
        let mut drag = PointerDrag::new(P, Point::new(0.0, 0.0));

        assert_eq!(drag.move_to(P, Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.move_to(P, Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.move_to(P, Point::new(10.0, 10.0)), Some(Vec2::new(2.0, 3.0)));
        assert_eq!(drag.total_offset(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn other_pointers_are_ignored() {
        let mut drag = PointerDrag::new(P, Point::new(50.0, 50.0));
        assert_eq!(drag.move_to(PointerId(2), Point::new(0.0, 0.0)), None);
        assert_eq!(drag.last_pos(), Point::new(50.0, 50.0));
    }

    #[test]
    fn negative_and_zero_movement() {
        let mut drag = PointerDrag::new(P, Point::new(100.0, 100.0));
        assert_eq!(drag.move_to(P, Point::new(90.0, 85.0)), Some(Vec2::new(-10.0, -15.0)));
        assert_eq!(drag.move_to(P, Point::new(90.0, 85.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn large_coordinate_values() {
        let mut drag = PointerDrag::new(P, Point::new(1000000.0, 2000000.0));
        let delta = drag.move_to(P, Point::new(1000001.0, 2000002.0));
        assert_eq!(delta, Some(Vec2::new(1.0, 2.0)));
    }
}
