// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Turtle: integer sequences to plane geometry.
//!
//! This crate turns discrete input sequences (Collatz trajectories, for
//! example) into polylines by simulating a turtle with a fixed step length.
//! It provides:
//! - [`branch_path`]: a single sequence to a [`Path`].
//! - [`SequenceTable`]: the read-only table of input sequences, with range
//!   selection and a parser for the shipped text format.
//! - [`PathSet`]: every path for a selected range, plus its content-space
//!   bounding box.
//!
//! It does **not** compute the sequences themselves, and it does not draw
//! anything. Rendering and view state live in higher-level crates.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::f64::consts::FRAC_PI_4;
//! use canopy_turtle::{DEFAULT_STEP_LENGTH, branch_path};
//!
//! let path = branch_path(FRAC_PI_4, &[4, 2, 1], DEFAULT_STEP_LENGTH);
//! assert_eq!(path.len(), 4);
//! assert_eq!(path.points()[0], kurbo::Point::ORIGIN);
//! ```
//!
//! ## Orientation
//!
//! Turtle paths live in a y-up plane with the walk starting straight up.
//! Content space, used for bounds and by the viewport crates, is y-down like
//! a raster surface: [`to_content`] maps `(x, y)` to `(x, -y)`.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod branch;
mod path_set;
mod table;

pub use branch::{DEFAULT_STEP_LENGTH, INITIAL_HEADING, Path, branch_path, to_content};
pub use path_set::PathSet;
pub use table::{ParseError, ParseErrorKind, SequenceRow, SequenceTable};
