// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration tests for `canopy_turtle`.
//!
//! These pin the walk to hand-computed coordinates and check the structural
//! properties every generated path must have.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use canopy_turtle::{DEFAULT_STEP_LENGTH, PathSet, SequenceTable, branch_path};
use kurbo::{Point, Vec2};

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn sixteen_down_to_one_at_forty_five_degrees() {
    let theta = FRAC_PI_4;
    let path = branch_path(theta, &[16, 8, 4, 2, 1], DEFAULT_STEP_LENGTH);

    // Consumption order is 1, 2, 4, 8, 16. The first value is odd and turns
    // right; the rest are even and each turn left by 45 degrees.
    let headings = [
        FRAC_PI_2 - theta,
        FRAC_PI_2,
        FRAC_PI_2 + theta,
        FRAC_PI_2 + 2.0 * theta,
        FRAC_PI_2 + 3.0 * theta,
    ];
    let h = core::f64::consts::SQRT_2 * 5.0;
    let expected = [
        Point::new(0.0, 0.0),
        Point::new(h, h),
        Point::new(h, h + 10.0),
        Point::new(0.0, 2.0 * h + 10.0),
        Point::new(-10.0, 2.0 * h + 10.0),
        Point::new(-10.0 - h, h + 10.0),
    ];

    assert_eq!(path.len(), 6);
    for (got, want) in path.points().iter().zip(expected) {
        assert!(close(*got, want), "{got:?} != {want:?}");
    }

    // Cross-check the same points by replaying the headings.
    let mut p = Point::ORIGIN;
    for (i, heading) in headings.iter().enumerate() {
        p += Vec2::new(10.0 * heading.cos(), 10.0 * heading.sin());
        assert!(close(path.points()[i + 1], p));
    }
}

#[test]
fn every_path_starts_at_origin_with_one_extra_point() {
    let sequences = [
        vec![],
        vec![1],
        vec![6, 3, 10, 5, 16, 8, 4, 2, 1],
        vec![27, 82, 41, 124, 62, 31],
    ];
    for angle in [0.0, 0.1, FRAC_PI_4, 1.3, -0.7] {
        for seq in &sequences {
            let path = branch_path(angle, seq, DEFAULT_STEP_LENGTH);
            assert_eq!(path.len(), seq.len() + 1);
            assert_eq!(path.points()[0], Point::ORIGIN);
        }
    }
}

#[test]
fn walk_is_deterministic() {
    let seq = [27_u64, 82, 41, 124, 62, 31, 94, 47, 142, 71];
    let a = branch_path(0.31, &seq, DEFAULT_STEP_LENGTH);
    let b = branch_path(0.31, &seq, DEFAULT_STEP_LENGTH);
    for (p, q) in a.points().iter().zip(b.points()) {
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.y.to_bits(), q.y.to_bits());
    }
}

#[test]
fn parsed_table_feeds_path_set() {
    let text = "n,seq\n1,1\n2,\"2, 1\"\n3,\"3, 10, 5, 16, 8, 4, 2, 1\"\n4,\"4, 2, 1\"\n";
    let table = SequenceTable::parse(text).unwrap();

    let set = PathSet::generate(&table, 1..3, FRAC_PI_4, DEFAULT_STEP_LENGTH);
    assert_eq!(set.len(), 2);
    assert_eq!(set.paths()[0].len(), 3);
    assert_eq!(set.paths()[1].len(), 9);

    let bounds = set.content_bounds().unwrap();
    for path in set.paths() {
        for p in path.content_points() {
            assert!(bounds.min_x() <= p.x && p.x <= bounds.max_x());
            assert!(bounds.min_y() <= p.y && p.y <= bounds.max_y());
        }
    }
}
