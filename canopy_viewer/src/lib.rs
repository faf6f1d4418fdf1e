// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Viewer: interactive viewers built from the Canopy crates.
//!
//! Two viewers share the same gesture handling and redraw scheduling but
//! render in different ways:
//!
//! - [`TreeViewer`] draws sequence branches once into a [`ContentCache`]
//!   layer and composites that layer through a [`canopy_view2d::Viewport2D`]
//!   on demand. Pan and zoom never regenerate geometry.
//! - [`FractalViewer`] drives a full-screen shader whose uniforms carry the
//!   view center and scale, re-evaluated continuously at any zoom depth.
//!
//! Both own their view state and an attached surface. Hosts forward input
//! events, report resizes, and call `frame` on every display refresh; the
//! viewer's [`FrameScheduler`] decides whether anything is drawn.
//!
//! ## Usage
//!
//! ```rust
//! use canopy_surface::recording::RecordingCanvas;
//! use canopy_turtle::SequenceTable;
//! use canopy_viewer::TreeViewer;
//! use kurbo::Size;
//!
//! let table = SequenceTable::from_sequences([vec![1], vec![2, 1], vec![4, 2, 1]]);
//! let mut viewer = TreeViewer::new(table);
//! viewer.attach(RecordingCanvas::new(Size::new(640.0, 480.0), 2.0));
//!
//! assert!(viewer.frame());
//! // Nothing changed, so the next refresh draws nothing.
//! assert!(!viewer.frame());
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for cache rebuilds, fits, resizes and
//!   frames.
//! - `serde`: derive `Serialize`/`Deserialize` for the configuration types.

pub mod fractal;

mod cache;
mod config;
mod fractal_viewer;
mod renderer;
mod scheduler;
mod tree;

pub use cache::{CachedLayer, ContentCache, DEFAULT_MAX_LAYER_DIMENSION};
pub use config::{FractalViewerConfig, TreeViewerConfig};
pub use fractal::FRACTAL_PROGRAM;
pub use fractal_viewer::{AttachError, FractalViewer};
pub use renderer::SurfaceRenderer;
pub use scheduler::{FrameScheduler, RedrawMode};
pub use tree::TreeViewer;
