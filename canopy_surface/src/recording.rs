// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording backends for tests and debugging.
//!
//! These implement [`Canvas2d`] and [`ShaderSurface`] without producing any
//! pixels. Every call is appended to an event log so tests can assert on
//! exactly what a renderer asked for: which transform was current, how often
//! the backing buffer was reallocated, which layer was composited where.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Size};

use crate::{
    Canvas2d, DrawContext, Layer, PhysicalSize, ShaderError, ShaderProgram, ShaderSurface,
    StrokeStyle, Surface, Uniforms,
};

/// Drawing call recorded by a [`RecordingCanvas`] or [`RecordingLayer`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawEvent {
    /// The backing buffer was reallocated.
    Resize(PhysicalSize),
    /// The target was cleared.
    Clear,
    /// Stroke style change.
    SetStroke(StrokeStyle),
    /// A polyline was stroked.
    StrokePolyline {
        /// Points as given.
        points: Vec<Point>,
        /// Transform current at the time.
        transform: Affine,
    },
    /// A layer was composited.
    DrawLayer {
        /// Identity of the layer, in creation order.
        layer: u32,
        /// Layer size.
        size: PhysicalSize,
        /// Layer-to-canvas transform.
        transform: Affine,
    },
    /// Pointer capture change.
    PointerCapture {
        /// Pointer id.
        pointer: u64,
        /// Whether capture was acquired.
        capture: bool,
    },
}

/// Canvas that records draw calls instead of rasterizing.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    display: Size,
    dpr: f64,
    backing: Option<PhysicalSize>,
    transform: Affine,
    next_layer: u32,
    events: Vec<DrawEvent>,
}

impl RecordingCanvas {
    /// Creates a canvas with the given display size and pixel ratio and no
    /// backing buffer.
    #[must_use]
    pub fn new(display: Size, device_pixel_ratio: f64) -> Self {
        Self {
            display,
            dpr: device_pixel_ratio,
            backing: None,
            transform: Affine::IDENTITY,
            next_layer: 0,
            events: Vec::new(),
        }
    }

    /// Changes the display size, as a host would on layout.
    pub fn set_display_size(&mut self, display: Size) {
        self.display = display;
    }

    /// Changes the pixel ratio, as a host would when moving between screens.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    /// Clears the event log.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of layers created so far.
    #[must_use]
    pub fn layers_created(&self) -> u32 {
        self.next_layer
    }

    /// Number of recorded backing reallocations.
    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DrawEvent::Resize(_)))
            .count()
    }
}

impl Surface for RecordingCanvas {
    fn display_size(&self) -> Size {
        self.display
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn backing_size(&self) -> Option<PhysicalSize> {
        self.backing
    }

    fn set_backing_size(&mut self, size: PhysicalSize) {
        self.backing = Some(size);
        self.events.push(DrawEvent::Resize(size));
    }

    fn set_pointer_capture(&mut self, pointer: u64, capture: bool) {
        self.events.push(DrawEvent::PointerCapture { pointer, capture });
    }
}

impl DrawContext for RecordingCanvas {
    fn clear(&mut self) {
        self.events.push(DrawEvent::Clear);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        self.events.push(DrawEvent::SetStroke(*style));
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        if points.len() < 2 {
            return;
        }
        self.events.push(DrawEvent::StrokePolyline {
            points: points.to_vec(),
            transform: self.transform,
        });
    }
}

impl Canvas2d for RecordingCanvas {
    type Layer = RecordingLayer;

    fn create_layer(&mut self, size: PhysicalSize) -> RecordingLayer {
        let id = self.next_layer;
        self.next_layer += 1;
        RecordingLayer {
            id,
            size,
            transform: Affine::IDENTITY,
            finished: false,
            events: Vec::new(),
        }
    }

    fn draw_layer(&mut self, layer: &RecordingLayer, transform: Affine) {
        self.events.push(DrawEvent::DrawLayer {
            layer: layer.id,
            size: layer.size,
            transform,
        });
    }
}

/// Offscreen layer of a [`RecordingCanvas`].
#[derive(Clone, Debug)]
pub struct RecordingLayer {
    id: u32,
    size: PhysicalSize,
    transform: Affine,
    finished: bool,
    events: Vec<DrawEvent>,
}

impl RecordingLayer {
    /// Creation-order identity of this layer within its canvas.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Whether [`Layer::finish`] was called after the last draw.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    /// Number of polylines stroked into the layer.
    #[must_use]
    pub fn polyline_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DrawEvent::StrokePolyline { .. }))
            .count()
    }
}

impl DrawContext for RecordingLayer {
    fn clear(&mut self) {
        self.finished = false;
        self.events.push(DrawEvent::Clear);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        self.events.push(DrawEvent::SetStroke(*style));
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        if points.len() < 2 {
            return;
        }
        self.finished = false;
        self.events.push(DrawEvent::StrokePolyline {
            points: points.to_vec(),
            transform: self.transform,
        });
    }
}

impl Layer for RecordingLayer {
    fn size(&self) -> PhysicalSize {
        self.size
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

/// Shader call recorded by a [`RecordingShaderSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum ShaderEvent {
    /// The backing buffer was reallocated.
    Resize(PhysicalSize),
    /// A program was compiled.
    Compile(&'static str),
    /// Uniforms were uploaded.
    SetUniforms(Uniforms),
    /// A full-screen pass ran at this backing size.
    DrawFullscreen(PhysicalSize),
    /// Pointer capture change.
    PointerCapture {
        /// Pointer id.
        pointer: u64,
        /// Whether capture was acquired.
        capture: bool,
    },
}

/// Shader surface that records calls instead of running programs.
#[derive(Clone, Debug)]
pub struct RecordingShaderSurface {
    display: Size,
    dpr: f64,
    backing: Option<PhysicalSize>,
    program: Option<&'static str>,
    reject: bool,
    events: Vec<ShaderEvent>,
}

impl RecordingShaderSurface {
    /// Creates a surface with no backing buffer.
    #[must_use]
    pub fn new(display: Size, device_pixel_ratio: f64) -> Self {
        Self {
            display,
            dpr: device_pixel_ratio,
            backing: None,
            program: None,
            reject: false,
            events: Vec::new(),
        }
    }

    /// Creates a surface whose [`ShaderSurface::compile`] always fails, like a
    /// host without GPU support.
    #[must_use]
    pub fn rejecting(display: Size, device_pixel_ratio: f64) -> Self {
        Self {
            reject: true,
            ..Self::new(display, device_pixel_ratio)
        }
    }

    /// Changes the display size.
    pub fn set_display_size(&mut self, display: Size) {
        self.display = display;
    }

    /// Changes the device pixel ratio.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    /// Label of the compiled program.
    #[must_use]
    pub fn program(&self) -> Option<&'static str> {
        self.program
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ShaderEvent] {
        &self.events
    }

    /// Most recently uploaded uniforms.
    #[must_use]
    pub fn last_uniforms(&self) -> Option<&Uniforms> {
        self.events.iter().rev().find_map(|e| match e {
            ShaderEvent::SetUniforms(u) => Some(u),
            _ => None,
        })
    }

    /// Clears the event log.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Surface for RecordingShaderSurface {
    fn display_size(&self) -> Size {
        self.display
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn backing_size(&self) -> Option<PhysicalSize> {
        self.backing
    }

    fn set_backing_size(&mut self, size: PhysicalSize) {
        self.backing = Some(size);
        self.events.push(ShaderEvent::Resize(size));
    }

    fn set_pointer_capture(&mut self, pointer: u64, capture: bool) {
        self.events.push(ShaderEvent::PointerCapture { pointer, capture });
    }
}

impl ShaderSurface for RecordingShaderSurface {
    fn compile(&mut self, program: &ShaderProgram) -> Result<(), ShaderError> {
        if self.reject {
            return Err(ShaderError::Unsupported {
                label: program.label,
            });
        }
        self.program = Some(program.label);
        self.events.push(ShaderEvent::Compile(program.label));
        Ok(())
    }

    fn set_uniforms(&mut self, uniforms: &Uniforms) {
        self.events.push(ShaderEvent::SetUniforms(uniforms.clone()));
    }

    fn draw_fullscreen(&mut self) {
        if let (Some(_), Some(size)) = (self.program, self.backing) {
            self.events.push(ShaderEvent::DrawFullscreen(size));
        }
    }
}
