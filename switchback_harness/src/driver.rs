// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use switchback_core::config::TrailConfig;
use switchback_core::render::TrailFrame;
use switchback_core::section::SectionNode;
use switchback_core::time::{Duration, HostTime};
use switchback_core::trace::{TraceSink, Tracer};
use switchback_core::widget::{TrailStatus, TrailWidget};

use crate::{ManualScheduler, SmoothnessReport, SmoothnessTracker, StubGeometry, VirtualClock};

/// Ring size of the smoothness history kept by [`Harness`].
const HISTORY: usize = 64;

/// Drives a [`TrailWidget`] through virtual frames.
///
/// Each [`step`](Self::step) advances the clock by one frame interval and
/// then does what a browser host does on an animation frame: fires the
/// anticipation timer if its deadline has passed (at the deadline, not at the
/// frame time), runs a pending update, delivers the pending frame callback and
/// builds the frame.
#[derive(Debug)]
pub struct Harness {
    widget: TrailWidget,
    clock: VirtualClock,
    scheduler: ManualScheduler,
    geometry: StubGeometry,
    frame_interval: Duration,
    smoothness: SmoothnessTracker<HISTORY>,
    last_report: Option<SmoothnessReport>,
}

impl Harness {
    /// Creates a harness at time zero with a 60 Hz frame interval.
    #[must_use]
    pub fn new(config: TrailConfig, geometry: StubGeometry) -> Self {
        Self {
            widget: TrailWidget::new(config),
            clock: VirtualClock::default(),
            scheduler: ManualScheduler::new(),
            geometry,
            frame_interval: Duration::from_micros(16_667),
            smoothness: SmoothnessTracker::default(),
            last_report: None,
        }
    }

    /// Sets the frame interval.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// The driven widget.
    #[must_use]
    pub fn widget(&self) -> &TrailWidget {
        &self.widget
    }

    /// Mutable access to the widget, e.g. to install a click handler.
    pub fn widget_mut(&mut self) -> &mut TrailWidget {
        &mut self.widget
    }

    /// The virtual clock.
    #[must_use]
    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.clock.now()
    }

    /// The recording scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    /// The stub geometry.
    #[must_use]
    pub fn geometry(&self) -> &StubGeometry {
        &self.geometry
    }

    /// Mutable access to the geometry. Call
    /// [`invalidate_layout`](Self::invalidate_layout) afterwards so the widget
    /// re-measures.
    pub fn geometry_mut(&mut self) -> &mut StubGeometry {
        &mut self.geometry
    }

    /// Smoothness report as of the last step.
    #[must_use]
    pub fn smoothness(&self) -> Option<SmoothnessReport> {
        self.last_report
    }

    /// The smoothness tracker.
    #[must_use]
    pub fn smoothness_tracker(&self) -> &SmoothnessTracker<HISTORY> {
        &self.smoothness
    }

    /// Replaces the section tree.
    pub fn set_items(&mut self, tree: Vec<SectionNode>) {
        self.widget.set_items(tree, &mut self.scheduler);
    }

    /// Sets the active section.
    pub fn set_active(&mut self, id: Option<&str>) {
        self.widget.set_active(id, &mut self.scheduler);
    }

    /// Marks every position stale.
    pub fn invalidate_layout(&mut self) {
        self.widget.invalidate_layout(&mut self.scheduler);
    }

    /// Builds the frame for the current state without advancing time.
    #[must_use]
    pub fn frame(&self) -> TrailFrame {
        self.widget.frame(&self.geometry)
    }

    /// Status of the last update.
    #[must_use]
    pub fn status(&self) -> &TrailStatus {
        self.widget.status()
    }

    /// Advances one frame.
    pub fn step(&mut self) -> TrailFrame {
        self.step_with(&mut Tracer::none())
    }

    /// Advances one frame, reporting events to `sink`.
    pub fn step_traced(&mut self, sink: &mut dyn TraceSink) -> TrailFrame {
        self.step_with(&mut Tracer::new(sink))
    }

    /// Steps until `duration` has elapsed. Returns the last frame.
    pub fn run_for(&mut self, duration: Duration) -> TrailFrame {
        self.run_for_with(duration, &mut Tracer::none())
    }

    /// Like [`run_for`](Self::run_for), reporting events to `sink`.
    pub fn run_for_traced(&mut self, duration: Duration, sink: &mut dyn TraceSink) -> TrailFrame {
        self.run_for_with(duration, &mut Tracer::new(sink))
    }

    /// Steps until nothing is pending, for at most `limit`. Returns the time
    /// it took, or `None` if work was still pending at the limit.
    pub fn settle(&mut self, limit: Duration) -> Option<Duration> {
        let start = self.clock.now();
        let deadline = start.saturating_add(limit);
        let mut tracer = Tracer::none();
        while !self.scheduler.is_idle() {
            if self.clock.now() >= deadline {
                return None;
            }
            self.step_with(&mut tracer);
        }
        Some(self.clock.now().saturating_duration_since(start))
    }

    /// Shuts the widget down.
    pub fn shutdown(&mut self) {
        self.widget.shutdown(&mut self.scheduler);
    }

    fn run_for_with(&mut self, duration: Duration, tracer: &mut Tracer<'_>) -> TrailFrame {
        let end = self.clock.now().saturating_add(duration);
        let mut frame = self.frame();
        while self.clock.now() < end {
            frame = self.step_with(tracer);
        }
        frame
    }

    fn step_with(&mut self, tracer: &mut Tracer<'_>) -> TrailFrame {
        let now = self.clock.advance(self.frame_interval);

        if let Some((deadline, generation)) = self.scheduler.take_due_timer(now) {
            self.widget
                .on_timer(generation, deadline, &mut self.scheduler, tracer);
        }
        if self.scheduler.take_update() {
            self.widget
                .update(now, &self.geometry, &mut self.scheduler, tracer);
        }
        if let Some(generation) = self.scheduler.take_frame() {
            self.widget
                .on_frame(generation, now, &mut self.scheduler, tracer);
        }

        let frame = self.widget.frame(&self.geometry);
        if frame.visible {
            let motion = self.widget.motion();
            self.last_report = Some(
                self.smoothness
                    .observe(motion.generation(), motion.state().progress),
            );
        } else {
            self.smoothness.reset_baseline();
        }
        frame
    }
}
