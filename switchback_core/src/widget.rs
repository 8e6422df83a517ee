// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The trail widget.
//!
//! [`TrailWidget`] is the public contract of the trail: it takes a section
//! tree, an active section id and an item-click handler, and produces
//! [`TrailFrame`]s. It owns the pipeline state (flat items, waypoints, path,
//! length table) and the single [`MotionController`].
//!
//! # Update model
//!
//! Mutating calls ([`set_items`](TrailWidget::set_items),
//! [`set_active`](TrailWidget::set_active),
//! [`invalidate_layout`](TrailWidget::invalidate_layout), ...) only mark dirty
//! channels and ask the scheduler for a deferred
//! [`update`](TrailWidget::update). The host runs the update on the next
//! frame, after layout has settled, which drains every channel and then:
//!
//! 1. re-measures and rebuilds the path if any channel was marked,
//! 2. retargets motion.
//!
//! An [`ACTIVE`](dirty::ACTIVE) change re-measures too, so items that were
//! unmeasurable at the last rebuild rejoin the path once they mount.
//!
//! Measurement happens before synthesis, synthesis before length mapping and
//! length mapping before targeting, all within the one call.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::BezPath;
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::arclen::LengthTable;
use crate::config::TrailConfig;
use crate::dirty;
use crate::error::Degradation;
use crate::geometry::GeometryProvider;
use crate::motion::MotionController;
use crate::path::TrailPath;
use crate::render::{TrailFrame, TrailRenderer, TrailScene};
use crate::sampler::{SampledWaypoints, sample_waypoints};
use crate::schedule::{FrameScheduler, Generation};
use crate::section::{FlatItem, SectionNode, flatten, position_of};
use crate::time::HostTime;
use crate::trace::{RebuildEvent, SuppressEvent, SuppressReason, Tracer};

/// Dirty key for changes that are not tied to one item.
const TREE_KEY: u32 = u32::MAX;

/// Outcome of an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrailStatus {
    /// The trail and marker are shown.
    Visible,
    /// The trail is hidden, for the given reason.
    Hidden(Degradation),
}

impl TrailStatus {
    /// Returns `true` if the trail is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Item-click handler.
pub type ClickHandler = Box<dyn FnMut(&str)>;

/// Animated navigation trail for a table of contents.
pub struct TrailWidget {
    config: TrailConfig,
    tree: Vec<SectionNode>,
    items: Vec<FlatItem>,
    active_id: Option<String>,
    on_item_click: Option<ClickHandler>,

    // -- Pipeline --
    sampled: SampledWaypoints,
    path: TrailPath,
    drawn: BezPath,
    lengths: LengthTable,

    motion: MotionController,
    renderer: TrailRenderer,
    dirty: DirtyTracker<u32>,
    status: TrailStatus,
    shut_down: bool,
}

impl fmt::Debug for TrailWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailWidget")
            .field("items", &self.items.len())
            .field("active_id", &self.active_id)
            .field("waypoints", &self.sampled.waypoints.len())
            .field("total_length", &self.lengths.total_length)
            .field("motion", &self.motion)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Default for TrailWidget {
    fn default() -> Self {
        Self::new(TrailConfig::default())
    }
}

impl TrailWidget {
    /// Creates an empty widget.
    #[must_use]
    pub fn new(config: TrailConfig) -> Self {
        let mut dirty = DirtyTracker::with_cycle_handling(CycleHandling::Error);
        dirty.mark(TREE_KEY, dirty::TOPOLOGY);
        Self {
            config,
            tree: Vec::new(),
            items: Vec::new(),
            active_id: None,
            on_item_click: None,
            sampled: SampledWaypoints::default(),
            path: TrailPath::default(),
            drawn: BezPath::new(),
            lengths: LengthTable::default(),
            motion: MotionController::new(config.motion),
            renderer: TrailRenderer::new(config.layout, config.marker),
            dirty,
            status: TrailStatus::Hidden(Degradation::EmptyTree),
            shut_down: false,
        }
    }

    // -- Accessors --

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Returns the section tree.
    #[must_use]
    pub fn tree(&self) -> &[SectionNode] {
        &self.tree
    }

    /// Returns the flattened items.
    #[must_use]
    pub fn items(&self) -> &[FlatItem] {
        &self.items
    }

    /// Returns the active section id.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Returns the waypoints of the last rebuild.
    #[must_use]
    pub fn waypoints(&self) -> &SampledWaypoints {
        &self.sampled
    }

    /// Returns the path of the last rebuild.
    #[must_use]
    pub fn path(&self) -> &TrailPath {
        &self.path
    }

    /// Returns the length table of the last rebuild.
    #[must_use]
    pub fn lengths(&self) -> &LengthTable {
        &self.lengths
    }

    /// Returns the motion controller.
    #[must_use]
    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    /// Returns the status of the last update.
    #[must_use]
    pub fn status(&self) -> &TrailStatus {
        &self.status
    }

    /// Partial failures of the last rebuild that leave the trail shown: one
    /// [`MeasurementUnavailable`](Degradation::MeasurementUnavailable) per
    /// skipped item, then [`PathDegenerate`](Degradation::PathDegenerate) if
    /// the measured items collapse to a single point.
    #[must_use]
    pub fn degradations(&self) -> Vec<Degradation> {
        let mut out: Vec<Degradation> = self.sampled.degradations().collect();
        if !self.sampled.waypoints.is_empty() && self.lengths.is_degenerate() {
            out.push(Degradation::PathDegenerate);
        }
        out
    }

    // -- Inputs --

    /// Replaces the section tree.
    ///
    /// Items are flattened immediately; measuring waits for the update.
    pub fn set_items(&mut self, tree: Vec<SectionNode>, scheduler: &mut impl FrameScheduler) {
        let items = flatten(&tree);
        for stale in items.len()..self.items.len() {
            self.dirty.remove_key(key(stale));
        }
        self.tree = tree;
        self.items = items;
        self.dirty.mark(TREE_KEY, dirty::TOPOLOGY);
        scheduler.request_update();
    }

    /// Sets the active section.
    pub fn set_active(&mut self, id: Option<&str>, scheduler: &mut impl FrameScheduler) {
        if self.active_id.as_deref() == id {
            return;
        }
        let old = self.active_index();
        self.active_id = id.map(String::from);
        let new = self.active_index();
        for index in [old, new] {
            self.dirty.mark(index.map_or(TREE_KEY, key), dirty::ACTIVE);
        }
        scheduler.request_update();
    }

    /// Marks every item position stale, e.g. after a container resize.
    pub fn invalidate_layout(&mut self, scheduler: &mut impl FrameScheduler) {
        self.dirty.mark(TREE_KEY, dirty::LAYOUT);
        for index in 0..self.items.len() {
            self.dirty.mark(key(index), dirty::LAYOUT);
        }
        scheduler.request_update();
    }

    /// Marks one item's position stale, e.g. when it mounts late. Returns
    /// `false` if no item has this id.
    pub fn invalidate_item(&mut self, id: &str, scheduler: &mut impl FrameScheduler) -> bool {
        let Some(index) = position_of(&self.items, id) else {
            return false;
        };
        self.dirty.mark(key(index), dirty::LAYOUT);
        scheduler.request_update();
        true
    }

    /// Installs the item-click handler.
    pub fn set_on_item_click(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_item_click = Some(Box::new(handler));
    }

    /// Removes the item-click handler.
    pub fn clear_on_item_click(&mut self) {
        self.on_item_click = None;
    }

    /// Reports a click on the row for `id`.
    ///
    /// Invokes the click handler and returns `true` if `id` is a known item
    /// and a handler is installed. The active section is not changed; hosts
    /// typically scroll to the section and let it become active.
    pub fn click(&mut self, id: &str) -> bool {
        if position_of(&self.items, id).is_none() {
            return false;
        }
        match &mut self.on_item_click {
            Some(handler) => {
                handler(id);
                true
            }
            None => false,
        }
    }

    // -- Host callbacks --

    /// Runs the deferred update: drains dirty channels, rebuilds the path if
    /// positions may have changed and retargets the marker.
    pub fn update(
        &mut self,
        now: HostTime,
        geometry: &impl GeometryProvider,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) -> TrailStatus {
        if self.shut_down {
            return self.status.clone();
        }

        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        let layout: Vec<u32> = self
            .dirty
            .drain(dirty::LAYOUT)
            .deterministic()
            .run()
            .collect();
        let active: Vec<u32> = self
            .dirty
            .drain(dirty::ACTIVE)
            .deterministic()
            .run()
            .collect();

        if !topology.is_empty() || !layout.is_empty() || !active.is_empty() {
            self.rebuild(now, geometry, tracer);
            self.aim(now, scheduler, tracer);
        }
        self.status.clone()
    }

    /// Forwards the anticipation timer. Returns `false` if it was stale.
    pub fn on_timer(
        &mut self,
        generation: Generation,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        !self.shut_down && self.motion.on_timer(generation, now, scheduler, tracer)
    }

    /// Forwards a frame callback. Returns `false` if it was stale.
    pub fn on_frame(
        &mut self,
        generation: Generation,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        !self.shut_down && self.motion.on_frame(generation, now, scheduler, tracer)
    }

    /// Builds the frame for the current state.
    #[must_use]
    pub fn frame(&self, geometry: &impl GeometryProvider) -> TrailFrame {
        let scene = TrailScene {
            items: &self.items,
            active: self.active_index(),
            path: &self.path,
            drawn: &self.drawn,
            lengths: &self.lengths,
            motion: self.motion.state(),
        };
        self.renderer.render(&scene, geometry)
    }

    /// Releases the timer and frame loop. Later updates and callbacks are
    /// ignored.
    pub fn shutdown(&mut self, scheduler: &mut impl FrameScheduler) {
        self.motion.shutdown(scheduler);
        self.shut_down = true;
    }

    // -- Internals --

    fn active_index(&self) -> Option<usize> {
        self.active_id
            .as_deref()
            .and_then(|id| position_of(&self.items, id))
    }

    fn rebuild(&mut self, now: HostTime, geometry: &impl GeometryProvider, tracer: &mut Tracer<'_>) {
        self.sampled = sample_waypoints(&self.items, &self.config.layout, geometry);
        self.path = TrailPath::from_waypoints(&self.sampled.waypoints, &self.config.path);
        self.drawn = self.path.to_bez_path();
        self.lengths = LengthTable::measure(&self.path, &self.drawn, geometry);
        tracer.rebuild(&RebuildEvent {
            at: now,
            items: self.items.len(),
            waypoints: self.sampled.waypoints.len(),
            skipped: self.sampled.skipped.len(),
            total_length: self.lengths.total_length,
        });
    }

    /// Resolves the active section to a progress and retargets, or hides.
    fn aim(&mut self, now: HostTime, scheduler: &mut impl FrameScheduler, tracer: &mut Tracer<'_>) {
        let target = self.resolve_target();
        match target {
            Ok(progress) => {
                self.motion.retarget(progress, now, scheduler, tracer);
                self.status = TrailStatus::Visible;
            }
            Err(reason) => {
                self.motion.hide(now, scheduler, tracer);
                if self.status != TrailStatus::Hidden(reason.clone()) {
                    if let Some(reason) = SuppressReason::from_degradation(&reason) {
                        tracer.suppress(&SuppressEvent { at: now, reason });
                    }
                }
                self.status = TrailStatus::Hidden(reason);
            }
        }
    }

    fn resolve_target(&self) -> Result<f64, Degradation> {
        if self.items.is_empty() {
            return Err(Degradation::EmptyTree);
        }
        let id = self.active_id.as_deref().ok_or(Degradation::NoActiveSection)?;
        let index = position_of(&self.items, id)
            .ok_or_else(|| Degradation::UnknownSection { id: id.into() })?;
        if self.sampled.waypoints.is_empty() {
            return Err(Degradation::NoMeasurableItems);
        }
        let waypoint = self
            .sampled
            .resolve(index)
            .ok_or_else(|| Degradation::MeasurementUnavailable { id: id.into() })?;
        self.lengths
            .progress_of(waypoint)
            .ok_or(Degradation::NoMeasurableItems)
    }
}

fn key(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(TREE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionPhase;
    use crate::schedule::PendingWork;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;
    use kurbo::{Point, Rect};

    /// Rows stacked 32 units apart; ids in `hidden` are unmeasurable.
    struct Rows {
        order: Vec<&'static str>,
        hidden: Vec<&'static str>,
    }

    impl GeometryProvider for Rows {
        fn measure(&self, id: &str) -> Option<Rect> {
            if self.hidden.contains(&id) {
                return None;
            }
            let row = self.order.iter().position(|r| *r == id)? as f64;
            Some(Rect::new(0.0, row * 32.0, 200.0, row * 32.0 + 24.0))
        }
    }

    fn tree() -> Vec<SectionNode> {
        vec![
            SectionNode::new("a", "A").with_children([
                SectionNode::new("b", "B"),
                SectionNode::new("c", "C").with_children([SectionNode::new("d", "D")]),
            ]),
        ]
    }

    fn rows() -> Rows {
        Rows {
            order: vec!["a", "b", "c", "d"],
            hidden: Vec::new(),
        }
    }

    fn ms(v: u64) -> HostTime {
        HostTime(v * 1_000)
    }

    fn step(widget: &mut TrailWidget, work: &mut PendingWork, geometry: &Rows, now: HostTime) {
        let mut tracer = Tracer::none();
        if work.take_update() {
            widget.update(now, geometry, work, &mut tracer);
        }
        if let Some(g) = work.take_due_timer(now) {
            widget.on_timer(g, now, work, &mut tracer);
        }
        if let Some(g) = work.take_frame() {
            widget.on_frame(g, now, work, &mut tracer);
        }
    }

    fn settle(widget: &mut TrailWidget, work: &mut PendingWork, geometry: &Rows, from: u64) -> u64 {
        let mut t = from;
        while !work.is_idle() && t < from + 5_000 {
            step(widget, work, geometry, ms(t));
            t += 16;
        }
        t
    }

    #[test]
    fn empty_widget_is_hidden() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        let status = widget.update(ms(0), &rows(), &mut work, &mut Tracer::none());
        assert_eq!(status, TrailStatus::Hidden(Degradation::EmptyTree));
        assert!(!widget.frame(&rows()).visible);
    }

    #[test]
    fn mutations_defer_to_update() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("d"), &mut work);
        assert!(work.update_requested());
        assert!(widget.waypoints().waypoints.is_empty(), "nothing measured yet");
        assert_eq!(widget.items().len(), 4, "flattening is immediate");

        let status = widget.update(ms(0), &rows(), &mut work, &mut Tracer::none());
        assert_eq!(status, TrailStatus::Visible);
        assert_eq!(widget.waypoints().waypoints.len(), 4);
        assert_eq!(widget.motion().target(), Some(1.0));
    }

    #[test]
    fn marker_reaches_active_section() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        let geometry = rows();
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("c"), &mut work);
        settle(&mut widget, &mut work, &geometry, 0);

        let frame = widget.frame(&geometry);
        assert!(frame.visible);
        // c is at depth 1 in row 2: (12 + 28, 2 * 32 + 12).
        assert!(
            frame.marker.distance(Point::new(40.0, 76.0)) < 1e-6,
            "marker at {:?}",
            frame.marker
        );
        assert_eq!(frame.marker_scale, 1.0);
        assert!(frame.rows[2].active);
        assert_eq!(widget.motion().phase(), MotionPhase::Idle);
    }

    #[test]
    fn unknown_and_missing_active_hide() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        widget.set_items(tree(), &mut work);
        let status = widget.update(ms(0), &rows(), &mut work, &mut Tracer::none());
        assert_eq!(status, TrailStatus::Hidden(Degradation::NoActiveSection));

        widget.set_active(Some("zzz"), &mut work);
        let status = widget.update(ms(16), &rows(), &mut work, &mut Tracer::none());
        assert_eq!(
            status,
            TrailStatus::Hidden(Degradation::UnknownSection { id: "zzz".into() })
        );
    }

    #[test]
    fn unmeasured_active_falls_back_to_previous_item() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        let geometry = Rows {
            order: vec!["a", "b", "c", "d"],
            hidden: vec!["d"],
        };
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("d"), &mut work);
        let status = widget.update(ms(0), &geometry, &mut work, &mut Tracer::none());
        assert_eq!(status, TrailStatus::Visible);
        assert_eq!(widget.waypoints().skipped, vec![String::from("d")]);
        assert_eq!(widget.motion().target(), Some(1.0), "c is now the last waypoint");

        let nothing = Rows {
            order: vec!["a", "b", "c", "d"],
            hidden: vec!["a", "b", "c", "d"],
        };
        widget.invalidate_layout(&mut work);
        let status = widget.update(ms(16), &nothing, &mut work, &mut Tracer::none());
        assert_eq!(status, TrailStatus::Hidden(Degradation::NoMeasurableItems));
    }

    #[test]
    fn single_item_renders_a_point() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        let geometry = Rows {
            order: vec!["only"],
            hidden: Vec::new(),
        };
        widget.set_items(vec![SectionNode::new("only", "Only")], &mut work);
        widget.set_active(Some("only"), &mut work);
        settle(&mut widget, &mut work, &geometry, 0);
        let frame = widget.frame(&geometry);
        assert!(frame.visible);
        assert_eq!(frame.total_length, 0.0);
        assert_eq!(frame.revealed_length, 0.0);
        assert_eq!(frame.marker, Point::new(12.0, 12.0));
        assert_eq!(widget.degradations(), vec![Degradation::PathDegenerate]);
    }

    #[test]
    fn skipped_items_are_reported() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        let geometry = Rows {
            order: vec!["a", "b", "c", "d"],
            hidden: vec!["b"],
        };
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("a"), &mut work);
        widget.update(ms(0), &geometry, &mut work, &mut Tracer::none());
        assert_eq!(
            widget.degradations(),
            vec![Degradation::MeasurementUnavailable { id: "b".into() }]
        );

        widget.invalidate_layout(&mut work);
        widget.update(ms(16), &rows(), &mut work, &mut Tracer::none());
        assert!(widget.degradations().is_empty());
    }

    #[test]
    fn mounted_item_rejoins_on_activation() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        let unmounted = Rows {
            order: vec!["a", "b", "c", "d"],
            hidden: vec!["c"],
        };
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("b"), &mut work);
        widget.update(ms(0), &unmounted, &mut work, &mut Tracer::none());
        assert_eq!(widget.waypoints().skipped, vec![String::from("c")]);

        // c mounts without any layout notification.
        widget.set_active(Some("c"), &mut work);
        let status = widget.update(ms(16), &rows(), &mut work, &mut Tracer::none());
        assert_eq!(status, TrailStatus::Visible);
        assert!(widget.waypoints().skipped.is_empty());
        assert_eq!(widget.waypoints().waypoints.len(), 4);
        let expected = widget.lengths().progress_of(2);
        assert!(expected.is_some());
        assert_eq!(widget.motion().target(), expected, "aims at c, not b");
    }

    #[test]
    fn relayout_retargets_from_live_progress() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("b"), &mut work);
        settle(&mut widget, &mut work, &rows(), 0);
        let before = widget.motion().state().progress;

        // Row d moves down; the fraction for b shrinks.
        let taller = Rows {
            order: vec!["a", "b", "c", "", "", "d"],
            hidden: Vec::new(),
        };
        widget.invalidate_item("d", &mut work);
        widget.update(ms(5_000), &taller, &mut work, &mut Tracer::none());
        assert_eq!(
            widget.motion().state().progress,
            before,
            "restart departs from the live value"
        );
        let target = widget.motion().target().unwrap_or_default();
        assert!(target < before, "new target {target} vs {before}");
    }

    #[test]
    fn relayout_during_travel_restarts_from_live_progress() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        let geometry = rows();
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("a"), &mut work);
        let t0 = settle(&mut widget, &mut work, &geometry, 0);

        widget.set_active(Some("c"), &mut work);
        let mut t = t0;
        while t < t0 + 200 {
            step(&mut widget, &mut work, &geometry, ms(t));
            t += 16;
        }
        assert_eq!(widget.motion().phase(), MotionPhase::Travel);
        let now = ms(t);
        let before = widget.motion().generation();
        assert!(widget.on_frame(before, now, &mut work, &mut Tracer::none()));
        let live = widget.motion().state().progress;
        assert!(live > 0.0, "travel under way at {live}");

        // Row d moves down; c's fraction of the path shrinks.
        let taller = Rows {
            order: vec!["a", "b", "c", "", "", "d"],
            hidden: Vec::new(),
        };
        widget.invalidate_item("d", &mut work);
        assert!(work.take_update());
        widget.update(now, &taller, &mut work, &mut Tracer::none());

        assert_eq!(widget.motion().state().progress, live, "no jump");
        let after = widget.motion().generation();
        assert_eq!(after.0, before.0 + 1, "travel superseded once");
        assert!(matches!(
            widget.motion().phase(),
            MotionPhase::Anticipation { .. }
        ));
        let anticipation = widget.config().motion.anticipation;
        assert_eq!(
            work.timer(),
            Some((now.saturating_add(anticipation), after)),
            "one timer, for the new generation"
        );
        assert_eq!(work.frame(), Some(after));
    }

    #[test]
    fn clicks_reach_handler() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        widget.set_items(tree(), &mut work);
        assert!(!widget.click("a"), "no handler yet");

        let clicked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&clicked);
        widget.set_on_item_click(move |id| sink.borrow_mut().push(String::from(id)));
        assert!(widget.click("c"));
        assert!(!widget.click("nope"));
        assert_eq!(*clicked.borrow(), vec![String::from("c")]);
        assert_eq!(widget.active_id(), None, "clicking does not activate");
    }

    #[test]
    fn shutdown_stops_everything() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        widget.set_items(tree(), &mut work);
        widget.set_active(Some("d"), &mut work);
        widget.update(ms(0), &rows(), &mut work, &mut Tracer::none());
        let g = widget.motion().generation();
        widget.shutdown(&mut work);
        assert_eq!(work.timer(), None);
        assert_eq!(work.frame(), None);
        assert!(!widget.on_frame(g, ms(16), &mut work, &mut Tracer::none()));
        assert!(!widget.frame(&rows()).visible);
    }

    #[test]
    fn shrinking_tree_forgets_stale_items() {
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        widget.set_items(tree(), &mut work);
        widget.invalidate_layout(&mut work);
        widget.set_items(vec![SectionNode::new("a", "A")], &mut work);
        widget.set_active(Some("a"), &mut work);
        let status = widget.update(ms(0), &rows(), &mut work, &mut Tracer::none());
        assert_eq!(status, TrailStatus::Visible);
        assert_eq!(widget.waypoints().waypoints.len(), 1);
    }
}
