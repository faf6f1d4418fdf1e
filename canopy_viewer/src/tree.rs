// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use canopy_gesture::{Capture, GestureController, GestureResponse, InputEvent};
use canopy_surface::{Canvas2d, StrokeStyle};
use canopy_turtle::{PathSet, SequenceTable};
use canopy_view2d::{Viewport2D, ViewportTransform};
use kurbo::{Rect, Size};

use crate::{ContentCache, FrameScheduler, RedrawMode, SurfaceRenderer, TreeViewerConfig};

/// Interactive view of a tree of sequence branches.
///
/// The viewer owns every piece of view state; the host only supplies a
/// canvas through [`TreeViewer::attach`], forwards input through
/// [`TreeViewer::handle_event`], and calls [`TreeViewer::frame`] on every
/// display refresh. Frames are drawn on demand: after attach, after any
/// parameter change, after a gesture changes the view, and after
/// [`TreeViewer::notify_resize`].
///
/// Changing the angle or range regenerates every path, invalidates the
/// cached raster, and snaps the view to the new content on the next frame.
#[derive(Debug)]
pub struct TreeViewer<C: Canvas2d> {
    config: TreeViewerConfig,
    table: SequenceTable,
    paths: PathSet,
    cache: ContentCache<C::Layer>,
    view: Viewport2D,
    gestures: GestureController,
    scheduler: FrameScheduler,
    renderer: SurfaceRenderer,
    surface: Option<C>,
}

impl<C: Canvas2d> TreeViewer<C> {
    /// Creates a detached viewer over `table` with default settings.
    #[must_use]
    pub fn new(table: SequenceTable) -> Self {
        Self::with_config(table, TreeViewerConfig::default())
    }

    /// Creates a detached viewer over `table`.
    #[must_use]
    pub fn with_config(table: SequenceTable, config: TreeViewerConfig) -> Self {
        let mut view = Viewport2D::new(Size::ZERO);
        view.set_scale_limits(config.scale_limits);
        let mut viewer = Self {
            cache: ContentCache::new(config.stroke, config.max_layer_dimension),
            gestures: GestureController::new(config.gestures),
            scheduler: FrameScheduler::new(RedrawMode::OnDemand),
            renderer: SurfaceRenderer::new(config.fit_margin),
            paths: PathSet::default(),
            view,
            table,
            config,
            surface: None,
        };
        viewer.regenerate();
        viewer
    }

    /// Takes ownership of `surface` and schedules a fitted first frame.
    ///
    /// Returns the previously attached surface, if any.
    pub fn attach(&mut self, surface: C) -> Option<C> {
        let previous = self.detach();
        #[cfg(feature = "tracing")]
        tracing::debug!(display = ?surface.display_size(), "tree viewer attached");
        self.surface = Some(surface);
        self.renderer.request_fit();
        self.scheduler.request_redraw();
        previous
    }

    /// Releases the surface. Any gesture in progress is dropped and its
    /// pointer capture released; the cached layer, which belongs to the
    /// surface, is discarded.
    pub fn detach(&mut self) -> Option<C> {
        let mut surface = self.surface.take()?;
        if let Some(Capture::Release(pointer)) = self.gestures.reset() {
            surface.set_pointer_capture(pointer.0, false);
        }
        self.cache.clear();
        #[cfg(feature = "tracing")]
        tracing::debug!("tree viewer detached");
        Some(surface)
    }

    /// Whether a surface is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// The attached surface.
    #[must_use]
    pub fn surface(&self) -> Option<&C> {
        self.surface.as_ref()
    }

    /// Mutable access to the attached surface, for hosts that resize it.
    pub fn surface_mut(&mut self) -> Option<&mut C> {
        self.surface.as_mut()
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &TreeViewerConfig {
        &self.config
    }

    /// Turn angle in degrees.
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        self.config.angle_degrees
    }

    /// Sets the turn angle, regenerating the paths if it changed.
    pub fn set_angle_degrees(&mut self, degrees: f64) {
        if degrees != self.config.angle_degrees {
            self.config.angle_degrees = degrees;
            self.regenerate();
        }
    }

    /// Selected table rows.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.config.range_start..self.config.range_end
    }

    /// Selects table rows, regenerating the paths if the range changed.
    ///
    /// Inverted or out-of-bounds ranges select whatever rows remain, possibly
    /// none.
    pub fn set_range(&mut self, range: Range<usize>) {
        if range != self.range() {
            self.config.range_start = range.start;
            self.config.range_end = range.end;
            self.regenerate();
        }
    }

    /// Stroke used for every branch.
    #[must_use]
    pub fn stroke(&self) -> StrokeStyle {
        self.config.stroke
    }

    /// Changes the branch stroke. Geometry and view are kept; only the
    /// cached raster is rebuilt.
    pub fn set_stroke(&mut self, stroke: StrokeStyle) {
        if stroke != self.config.stroke {
            self.config.stroke = stroke;
            self.cache.set_style(stroke);
            self.scheduler.request_redraw();
        }
    }

    /// Replaces the sequence table and regenerates.
    pub fn set_table(&mut self, table: SequenceTable) {
        self.table = table;
        self.regenerate();
    }

    /// The displayed paths.
    #[must_use]
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Content bounds of the displayed paths, `None` when nothing is shown.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.paths.content_bounds()
    }

    /// The view state.
    #[must_use]
    pub fn view(&self) -> &Viewport2D {
        &self.view
    }

    /// Current pan/zoom transform.
    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.view.transform()
    }

    /// Replaces the transform (clamped to the scale limits) and redraws.
    pub fn set_transform(&mut self, transform: ViewportTransform) {
        self.view.set_transform(transform);
        self.scheduler.request_redraw();
    }

    /// The content cache.
    #[must_use]
    pub fn cache(&self) -> &ContentCache<C::Layer> {
        &self.cache
    }

    /// The frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Snaps the view to the content on the next frame.
    pub fn fit_to_content(&mut self) {
        self.renderer.request_fit();
        self.scheduler.request_redraw();
    }

    /// Routes an input event through the gesture controller.
    ///
    /// Capture requests are forwarded to the surface. Returns whether the
    /// view changed. Events while detached are ignored.
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

    /// Tells the viewer the surface's display size or pixel ratio changed.
    pub fn notify_resize(&mut self) {
        self.scheduler.request_redraw();
    }

    /// Draws a frame if one is due. Returns whether anything was drawn.
    ///
    /// A due frame that cannot be drawn because the surface has no usable
    /// size stays due.
    pub fn frame(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if !self.scheduler.begin_frame() {
            return false;
        }
        let drawn = self
            .renderer
            .render(surface, &mut self.cache, &self.paths, &mut self.view);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            drawn,
            frame = self.scheduler.frame_count(),
            scale = self.view.scale(),
            "tree frame"
        );
        if !drawn {
            self.scheduler.request_redraw();
        }
        drawn
    }

    fn regenerate(&mut self) {
        let angle = self.config.angle_degrees.to_radians();
        self.paths = PathSet::generate(&self.table, self.range(), angle, self.config.step_length);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            paths = self.paths.len(),
            points = self.paths.total_points(),
            angle_degrees = self.config.angle_degrees,
            "regenerated paths"
        );
        self.cache.invalidate();
        self.renderer.request_fit();
        self.scheduler.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use canopy_gesture::PointerId;
    use canopy_surface::recording::{DrawEvent, RecordingCanvas};
    use kurbo::Point;

    use super::*;

    fn table() -> SequenceTable {
        SequenceTable::from_sequences([
            vec![1_u64],
            vec![2, 1],
            vec![3, 10, 5, 16, 8, 4, 2, 1],
            vec![4, 2, 1],
            vec![5, 16, 8, 4, 2, 1],
        ])
    }

    fn attached() -> TreeViewer<RecordingCanvas> {
        let mut viewer = TreeViewer::new(table());
        viewer.attach(RecordingCanvas::new(Size::new(400.0, 300.0), 1.0));
        viewer
    }

    fn layers_drawn(viewer: &TreeViewer<RecordingCanvas>) -> usize {
        viewer
            .surface()
            .unwrap()
            .events()
            .iter()
            .filter(|e| matches!(e, DrawEvent::DrawLayer { .. }))
            .count()
    }

    #[test]
    fn default_range_skips_row_zero() {
        let viewer: TreeViewer<RecordingCanvas> = TreeViewer::new(table());
        assert_eq!(viewer.range(), 1..100);
        assert_eq!(viewer.paths().len(), 4);
        assert!(!viewer.is_attached());
    }

    #[test]
    fn frames_only_when_due() {
        let mut viewer = attached();
        assert!(viewer.frame());
        assert!(!viewer.frame());
        assert_eq!(layers_drawn(&viewer), 1);

        viewer.notify_resize();
        assert!(viewer.frame());
        assert_eq!(viewer.cache().rebuild_count(), 1);
    }

    #[test]
    fn angle_change_regenerates_and_refits() {
        let mut viewer = attached();
        viewer.frame();
        let before = viewer.transform();

        viewer.set_angle_degrees(45.0);
        assert!(!viewer.frame(), "unchanged angle schedules nothing");

        viewer.set_angle_degrees(20.0);
        assert!(viewer.frame());
        assert_eq!(viewer.cache().rebuild_count(), 2);
        assert_ne!(viewer.transform(), before);

        let bounds = viewer.bounds().unwrap();
        let center = viewer.transform().to_screen(bounds.center());
        assert!((center - Point::new(200.0, 150.0)).hypot() < 1e-9);
    }

    #[test]
    fn empty_range_draws_nothing() {
        let mut viewer = attached();
        viewer.set_range(3..1);
        assert!(viewer.paths().is_empty());
        assert!(viewer.bounds().is_none());
        assert!(viewer.frame());
        assert_eq!(layers_drawn(&viewer), 0);
    }

    #[test]
    fn stroke_change_rebuilds_without_refit() {
        let mut viewer = attached();
        viewer.frame();
        viewer.set_transform(ViewportTransform::new(kurbo::Vec2::new(5.0, 5.0), 3.0));
        viewer.frame();

        viewer.set_stroke(StrokeStyle {
            width: 3.0,
            ..StrokeStyle::DEFAULT
        });
        assert!(viewer.frame());
        assert_eq!(viewer.cache().rebuild_count(), 2);
        assert_eq!(viewer.transform().scale, 3.0);
    }

    #[test]
    fn drag_pans_and_captures() {
        let mut viewer = attached();
        viewer.frame();
        let before = viewer.transform();
        let pointer = PointerId(7);

        assert!(!viewer.handle_event(&InputEvent::PointerDown {
            pointer,
            position: Point::new(10.0, 10.0),
        }));
        assert!(viewer.handle_event(&InputEvent::PointerMove {
            pointer,
            position: Point::new(40.0, 30.0),
        }));
        assert!(viewer.frame());
        assert_eq!(viewer.cache().rebuild_count(), 1);
        assert_eq!(
            viewer.transform().translate - before.translate,
            kurbo::Vec2::new(30.0, 20.0)
        );

        let surface = viewer.detach().unwrap();
        assert!(surface.events().contains(&DrawEvent::PointerCapture {
            pointer: 7,
            capture: true,
        }));
        assert_eq!(
            surface.events().last(),
            Some(&DrawEvent::PointerCapture {
                pointer: 7,
                capture: false,
            })
        );
    }

    #[test]
    fn detached_viewer_ignores_input() {
        let mut viewer: TreeViewer<RecordingCanvas> = TreeViewer::new(table());
        let wheel = InputEvent::Wheel {
            position: Point::new(10.0, 10.0),
            delta_y: -100.0,
        };
        assert!(!viewer.handle_event(&wheel));
        assert!(!viewer.frame());
        assert_eq!(viewer.transform(), ViewportTransform::IDENTITY);
        assert!(viewer.detach().is_none());
    }

    #[test]
    fn zero_sized_surface_keeps_frame_due() {
        let mut viewer = TreeViewer::new(table());
        viewer.attach(RecordingCanvas::new(Size::ZERO, 1.0));
        assert!(!viewer.frame());
        assert!(viewer.scheduler().is_redraw_requested());

        viewer
            .surface_mut()
            .unwrap()
            .set_display_size(Size::new(200.0, 200.0));
        assert!(viewer.frame());
        assert_eq!(layers_drawn(&viewer), 1);
    }
}
