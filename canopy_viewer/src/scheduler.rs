// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// When a [`FrameScheduler`] lets frames run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RedrawMode {
    /// Only after [`FrameScheduler::request_redraw`].
    OnDemand,
    /// On every display refresh.
    Continuous,
}

/// Decides whether a display refresh tick should produce a frame.
///
/// The host calls [`FrameScheduler::begin_frame`] on every refresh tick and
/// draws only when it returns `true`. Anything that changes what is on screen
/// calls [`FrameScheduler::request_redraw`] without caring which mode is
/// active.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    mode: RedrawMode,
    requested: bool,
    frames: u64,
}

impl FrameScheduler {
    /// Creates a scheduler. The first tick always produces a frame.
    #[must_use]
    pub fn new(mode: RedrawMode) -> Self {
        Self {
            mode,
            requested: true,
            frames: 0,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> RedrawMode {
        self.mode
    }

    /// Switches mode. A pending request survives the switch.
    pub fn set_mode(&mut self, mode: RedrawMode) {
        self.mode = mode;
    }

    /// Marks the view as needing a frame.
    pub fn request_redraw(&mut self) {
        self.requested = true;
    }

    /// Whether a frame is pending.
    #[must_use]
    pub fn is_redraw_requested(&self) -> bool {
        self.requested || self.mode == RedrawMode::Continuous
    }

    /// Consumes a pending request and reports whether to draw this tick.
    pub fn begin_frame(&mut self) -> bool {
        let run = self.is_redraw_requested();
        self.requested = false;
        if run {
            self.frames += 1;
        }
        run
    }

    /// Number of frames begun.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_demand_runs_once_per_request() {
        let mut s = FrameScheduler::new(RedrawMode::OnDemand);
        assert!(s.begin_frame());
        assert!(!s.begin_frame());

        s.request_redraw();
        s.request_redraw();
        assert!(s.begin_frame());
        assert!(!s.begin_frame());
        assert_eq!(s.frame_count(), 2);
    }

    #[test]
    fn continuous_always_runs() {
        let mut s = FrameScheduler::new(RedrawMode::Continuous);
        for _ in 0..5 {
            assert!(s.begin_frame());
        }
        assert_eq!(s.frame_count(), 5);
    }

    #[test]
    fn switching_to_on_demand_settles() {
        let mut s = FrameScheduler::new(RedrawMode::Continuous);
        s.begin_frame();
        s.set_mode(RedrawMode::OnDemand);
        assert!(!s.begin_frame());
        s.request_redraw();
        assert!(s.is_redraw_requested());
        assert!(s.begin_frame());
    }
}
