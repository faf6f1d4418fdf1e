// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

/// Distance the turtle advances per consumed sequence value.
pub const DEFAULT_STEP_LENGTH: f64 = 10.0;

/// Heading of the turtle before the first step: straight up.
pub const INITIAL_HEADING: f64 = FRAC_PI_2;

/// An immutable polyline in the turtle's y-up plane.
///
/// A path always holds at least one point, the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Returns the points of the path in walk order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of points, which is one more than the sequence length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a path contains at least the origin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the points mapped into y-down content space.
    pub fn content_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied().map(to_content)
    }
}

/// Maps a turtle-plane point into y-down content space.
#[must_use]
pub fn to_content(p: Point) -> Point {
    Point::new(p.x, -p.y)
}

/// Walks `sequence` from its last element to its first, producing a path.
///
/// The turtle starts at the origin heading [`INITIAL_HEADING`]. For each
/// consumed value it turns by `+angle` (even) or `-angle` (odd), then steps
/// `step_length` along the new heading and records the position. The result
/// has `sequence.len() + 1` points.
///
/// Consuming from the end models the tree growing outward from the terminal
/// value of the trajectory.
#[must_use]
pub fn branch_path(angle: f64, sequence: &[u64], step_length: f64) -> Path {
    let mut points = Vec::with_capacity(sequence.len() + 1);
    let mut position = Point::ORIGIN;
    let mut heading = INITIAL_HEADING;
    points.push(position);

    for &value in sequence.iter().rev() {
        if value % 2 == 0 {
            heading += angle;
        } else {
            heading -= angle;
        }
        position += Vec2::new(heading.cos() * step_length, heading.sin() * step_length);
        points.push(position);
    }

    Path { points }
}
