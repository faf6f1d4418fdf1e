// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::Rect;

use crate::{Path, SequenceTable, branch_path};

/// The paths currently selected for display, with their content-space bounds.
///
/// A path set is always regenerated as a whole; there is no incremental
/// update. Bounds are computed once at construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathSet {
    paths: Vec<Path>,
    bounds: Option<Rect>,
}

impl PathSet {
    /// Slices `table` to `range` and walks every selected row.
    ///
    /// `angle` is the turn angle in radians. Invalid ranges produce an empty
    /// set.
    #[must_use]
    pub fn generate(table: &SequenceTable, range: Range<usize>, angle: f64, step: f64) -> Self {
        let paths = table
            .select(range)
            .iter()
            .map(|row| branch_path(angle, &row.values, step))
            .collect();
        Self::from_paths(paths)
    }

    /// Wraps already-built paths and computes their bounds.
    #[must_use]
    pub fn from_paths(paths: Vec<Path>) -> Self {
        let bounds = content_bounds_of(&paths);
        Self { paths, bounds }
    }

    /// Returns the paths.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Number of paths in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no path is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Total number of points over all paths.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// Bounding box of every point in y-down content space.
    ///
    /// `None` when the set is empty. A set whose points coincide yields a
    /// zero-area rectangle.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

fn content_bounds_of(paths: &[Path]) -> Option<Rect> {
    let mut points = paths.iter().flat_map(Path::content_points);
    let first = points.next()?;
    let init = Rect::from_points(first, first);
    Some(points.fold(init, |r, p| r.union_pt(p)))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::DEFAULT_STEP_LENGTH;

    fn table() -> SequenceTable {
        SequenceTable::from_sequences([vec![1], vec![2, 1], vec![3, 10, 5, 16, 8, 4, 2, 1]])
    }

    #[test]
    fn generate_walks_each_selected_row() {
        let set = PathSet::generate(&table(), 0..3, 0.5, DEFAULT_STEP_LENGTH);
        assert_eq!(set.len(), 3);
        assert_eq!(set.total_points(), 2 + 3 + 9);
        assert_eq!(set.paths()[1].len(), 3);
    }

    #[test]
    fn invalid_range_is_empty_without_bounds() {
        let set = PathSet::generate(&table(), 3..1, 0.5, DEFAULT_STEP_LENGTH);
        assert!(set.is_empty());
        assert_eq!(set.content_bounds(), None);
        assert_eq!(set.total_points(), 0);
    }

    #[test]
    fn bounds_are_in_y_down_content_space() {
        // Angle zero: every step goes straight up in the turtle plane.
        let set = PathSet::generate(&table(), 1..2, 0.0, DEFAULT_STEP_LENGTH);
        let bounds = set.content_bounds().unwrap();
        assert_eq!(bounds.min_y(), -20.0);
        assert_eq!(bounds.max_y(), 0.0);
        assert!(bounds.width() < 1e-9);
    }

    #[test]
    fn origin_only_paths_have_degenerate_bounds() {
        let set = PathSet::generate(&SequenceTable::from_sequences([vec![]]), 0..1, 0.3, 10.0);
        let bounds = set.content_bounds().unwrap();
        assert_eq!(bounds.area(), 0.0);
    }
}
