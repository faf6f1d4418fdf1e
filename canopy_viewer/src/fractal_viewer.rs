// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use canopy_gesture::{Capture, GestureController, GestureResponse, InputEvent};
use canopy_surface::{
    PhysicalSize, ShaderError, ShaderSurface, UniformValue, Uniforms, sync_backing_size,
};
use canopy_view2d::PlaneViewport;
use kurbo::{Point, Size, Vec2};

use crate::fractal::{FRACTAL_PROGRAM, uniform};
use crate::{FractalViewerConfig, FrameScheduler, RedrawMode};

/// A surface the fractal program could not be compiled for.
///
/// Hands the surface back so the host can fall back to something else.
pub struct AttachError<S> {
    /// Why compilation failed.
    pub error: ShaderError,
    /// The rejected surface.
    pub surface: S,
}

impl<S> fmt::Debug for AttachError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<S> fmt::Display for AttachError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot attach fractal viewer: {}", self.error)
    }
}

impl<S> core::error::Error for AttachError<S> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Interactive view of the escape-time fractal.
///
/// Unlike [`crate::TreeViewer`] there is no cached raster: every frame
/// re-runs the fractal program with the current center and scale, so zoom
/// depth is limited only by the scale bounds and float precision. Frames run
/// continuously because the palette cycles with time.
#[derive(Debug)]
pub struct FractalViewer<S: ShaderSurface> {
    config: FractalViewerConfig,
    view: PlaneViewport,
    gestures: GestureController,
    scheduler: FrameScheduler,
    uniforms: Uniforms,
    surface: Option<S>,
}

impl<S: ShaderSurface> FractalViewer<S> {
    /// Creates a detached viewer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FractalViewerConfig::default())
    }

    /// Creates a detached viewer.
    #[must_use]
    pub fn with_config(config: FractalViewerConfig) -> Self {
        let mut view = PlaneViewport::new(Size::ZERO, config.center, config.scale);
        view.set_scale_limits(config.scale_limits);
        Self {
            gestures: GestureController::new(config.gestures),
            scheduler: FrameScheduler::new(RedrawMode::Continuous),
            uniforms: Uniforms::new(),
            view,
            config,
            surface: None,
        }
    }

    /// Compiles the fractal program on `surface` and takes ownership of it.
    ///
    /// Returns the previously attached surface, if any. On failure the viewer
    /// keeps its current surface and the rejected one is returned in the
    /// error.
    pub fn attach(&mut self, mut surface: S) -> Result<Option<S>, AttachError<S>> {
        if let Err(error) = surface.compile(&FRACTAL_PROGRAM) {
            #[cfg(feature = "tracing")]
            tracing::debug!(%error, "fractal program rejected");
            return Err(AttachError { error, surface });
        }
        let previous = self.detach();
        #[cfg(feature = "tracing")]
        tracing::debug!(display = ?surface.display_size(), "fractal viewer attached");
        self.view.set_view_size(surface.display_size());
        self.surface = Some(surface);
        self.scheduler.request_redraw();
        Ok(previous)
    }

    /// Releases the surface, dropping any gesture in progress.
    pub fn detach(&mut self) -> Option<S> {
        let mut surface = self.surface.take()?;
        if let Some(Capture::Release(pointer)) = self.gestures.reset() {
            surface.set_pointer_capture(pointer.0, false);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("fractal viewer detached");
        Some(surface)
    }

    /// Whether a surface is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// The attached surface.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutable access to the attached surface, for hosts that resize it.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Current settings. Center and scale here are the initial values; see
    /// [`FractalViewer::view`] for the live ones.
    #[must_use]
    pub fn config(&self) -> &FractalViewerConfig {
        &self.config
    }

    /// The live view.
    #[must_use]
    pub fn view(&self) -> &PlaneViewport {
        &self.view
    }

    /// Moves the view center.
    pub fn set_center(&mut self, center: Point) {
        self.view.set_center(center);
        self.scheduler.request_redraw();
    }

    /// Sets the visible plane height, clamped to the scale limits.
    pub fn set_scale(&mut self, scale: f64) {
        self.view.set_scale(scale);
        self.scheduler.request_redraw();
    }

    /// Constant added at every iteration.
    #[must_use]
    pub fn c(&self) -> Vec2 {
        self.config.c
    }

    /// Sets the constant added at every iteration.
    pub fn set_c(&mut self, c: Vec2) {
        self.config.c = c;
        self.scheduler.request_redraw();
    }

    /// Iteration budget per pixel.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.config.iterations
    }

    /// Sets the iteration budget per pixel.
    pub fn set_iterations(&mut self, iterations: u32) {
        self.config.iterations = iterations;
        self.scheduler.request_redraw();
    }

    /// Restores the initial center and scale.
    pub fn reset_view(&mut self) {
        self.view.set_center(self.config.center);
        self.view.set_scale(self.config.scale);
        self.scheduler.request_redraw();
    }

    /// The frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Uniforms uploaded by the last frame.
    #[must_use]
    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    /// Pixel ratio frames render at: the surface's, capped by the config.
    #[must_use]
    pub fn effective_pixel_ratio(&self) -> Option<f64> {
        let dpr = self.surface.as_ref()?.device_pixel_ratio();
        Some(match self.config.max_device_pixel_ratio {
            Some(cap) => dpr.min(cap),
            None => dpr,
        })
    }

    /// Routes an input event through the gesture controller.
    ///
    /// Returns whether the view changed. Events while detached are ignored.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        self.view.set_view_size(surface.display_size());
        let GestureResponse { changed, capture } = self.gestures.handle(event, &mut self.view);
        match capture {
            Some(Capture::Acquire(pointer)) => surface.set_pointer_capture(pointer.0, true),
            Some(Capture::Release(pointer)) => surface.set_pointer_capture(pointer.0, false),
            None => {}
        }
        if changed {
            self.scheduler.request_redraw();
        }
        changed
    }

    /// Draws a frame if one is due. `time_seconds` drives the palette cycle.
    ///
    /// Returns whether a full-screen pass was issued.
    pub fn frame(&mut self, time_seconds: f64) -> bool {
        let Some(dpr) = self.effective_pixel_ratio() else {
            return false;
        };
        if !self.scheduler.begin_frame() {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        self.view.set_view_size(surface.display_size());
        let Some(backing) = sync_backing_size(surface, dpr) else {
            return false;
        };

        fill_uniforms(&mut self.uniforms, &self.config, &self.view, backing, time_seconds);
        surface.set_uniforms(&self.uniforms);
        surface.draw_fullscreen();
        #[cfg(feature = "tracing")]
        tracing::trace!(
            frame = self.scheduler.frame_count(),
            width = backing.width,
            height = backing.height,
            scale = self.view.scale(),
            "fractal frame"
        );
        true
    }
}

impl<S: ShaderSurface> Default for FractalViewer<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "The fractal program computes in f32."
)]
fn fill_uniforms(
    uniforms: &mut Uniforms,
    config: &FractalViewerConfig,
    view: &PlaneViewport,
    backing: PhysicalSize,
    time_seconds: f64,
) {
    let size = backing.to_size();
    let center = view.center();
    uniforms.set(uniform::TIME, UniformValue::F32(time_seconds as f32));
    uniforms.set(
        uniform::RESOLUTION,
        UniformValue::Vec2([size.width as f32, size.height as f32]),
    );
    uniforms.set(
        uniform::CENTER,
        UniformValue::Vec2([center.x as f32, center.y as f32]),
    );
    uniforms.set(uniform::SCALE, UniformValue::F32(view.scale() as f32));
    uniforms.set(
        uniform::C,
        UniformValue::Vec2([config.c.x as f32, config.c.y as f32]),
    );
    uniforms.set(uniform::ITERATIONS, UniformValue::U32(config.iterations));
    uniforms.set(
        uniform::INTERIOR_EPSILON,
        UniformValue::F32(config.interior_epsilon),
    );
    uniforms.set(uniform::ESCAPE_RADIUS, UniformValue::F32(config.escape_radius));
}
