// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pinch tracking.
//!
//! A [`Pinch`] remembers the distance between the two touches at the
//! previous step. Each [`Pinch::update`] returns the zoom factor for that
//! step alone (`new / previous`, so spreading the fingers zooms in) and the
//! midpoint to anchor it at, then makes the new distance the reference.
//! Steps are incremental rather than relative to the first contact.

use kurbo::Point;

/// Incremental zoom step produced by a pinch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchStep {
    /// Midpoint between the two touches.
    pub anchor: Point,
    /// Zoom factor for this step; greater than one zooms in.
    pub factor: f64,
}

/// Distance tracking for an active two-finger pinch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pinch {
    distance: f64,
}

impl Pinch {
    /// Starts a pinch with touches at `a` and `b`.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            distance: a.distance(b),
        }
    }

    /// Distance between the touches at the last step.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Advances to touches at `a` and `b`.
    ///
    /// Returns `None` when either distance is zero or not finite; the new
    /// distance still becomes the reference so the next step can recover.
    pub fn update(&mut self, a: Point, b: Point) -> Option<PinchStep> {
        let previous = self.distance;
        let current = a.distance(b);
        self.distance = current;

        let usable = |d: f64| d > 0.0 && d.is_finite();
        if !(usable(previous) && usable(current)) {
            return None;
        }
        Some(PinchStep {
            anchor: a.midpoint(b),
            factor: current / previous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreading_zooms_in() {
        let mut pinch = Pinch::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let step = pinch
            .update(Point::new(-50.0, 0.0), Point::new(150.0, 0.0))
            .unwrap();
        assert_eq!(step.factor, 2.0);
        assert_eq!(step.anchor, Point::new(50.0, 0.0));
    }

    #[test]
    fn steps_are_incremental() {
        let mut pinch = Pinch::new(Point::new(0.0, 0.0), Point::new(0.0, 100.0));
        let first = pinch.update(Point::new(0.0, 0.0), Point::new(0.0, 50.0)).unwrap();
        assert_eq!(first.factor, 0.5);
        assert_eq!(pinch.distance(), 50.0);

        let second = pinch.update(Point::new(0.0, 0.0), Point::new(0.0, 50.0)).unwrap();
        assert_eq!(second.factor, 1.0);
    }

    #[test]
    fn coincident_touches_produce_no_step() {
        let mut pinch = Pinch::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert_eq!(pinch.update(Point::new(0.0, 0.0), Point::new(10.0, 0.0)), None);
        // Recovered: the reference is now 10.
        let step = pinch.update(Point::new(0.0, 0.0), Point::new(20.0, 0.0)).unwrap();
        assert_eq!(step.factor, 2.0);
    }
}
