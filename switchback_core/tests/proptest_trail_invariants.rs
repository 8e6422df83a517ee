// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the trail pipeline and motion.
//!
//! 1. Waypoint lengths are non-decreasing and end at the total length.
//! 2. Sampling at a progress lands on the path, and does so repeatably.
//! 3. Retargeting to the same progress twice settles where once does.
//! 4. Travel never takes longer than the travel cap.
//! 5. Rapid retargeting keeps at most one live timer and frame loop.
//! 6. A single-item tree renders a zero-length trail without panicking.

use kurbo::{BezPath, Point, Rect};
use proptest::prelude::*;
use switchback_core::arclen::LengthTable;
use switchback_core::config::{LayoutConfig, MotionConfig, PathConfig};
use switchback_core::geometry::{GeometryProvider, analytic_length};
use switchback_core::motion::{MotionController, MotionPhase};
use switchback_core::path::{TrailPath, synthesize};
use switchback_core::schedule::{FrameScheduler, Generation, PendingWork};
use switchback_core::section::SectionNode;
use switchback_core::time::{Duration, HostTime};
use switchback_core::trace::Tracer;
use switchback_core::widget::TrailWidget;

// ── Helpers ─────────────────────────────────────────────────────────────

struct Analytic;

impl GeometryProvider for Analytic {
    fn measure(&self, _: &str) -> Option<Rect> {
        None
    }
}

/// Reports drawn lengths off by a constant factor, like a surface that
/// applies a transform.
struct Stretched(f64);

impl GeometryProvider for Stretched {
    fn measure(&self, _: &str) -> Option<Rect> {
        None
    }

    fn path_length(&self, path: &BezPath) -> f64 {
        analytic_length(path) * self.0
    }
}

/// One row at a fixed box.
struct OneRow(Rect);

impl GeometryProvider for OneRow {
    fn measure(&self, _: &str) -> Option<Rect> {
        Some(self.0)
    }
}

/// `(depth, gap)` pairs: depth of each item and its distance below the
/// previous one.
fn layout(max_len: usize) -> impl Strategy<Value = Vec<(usize, f64)>> {
    proptest::collection::vec((0_usize..4, 1.0_f64..120.0), 1..=max_len)
}

fn trail(rows: &[(usize, f64)]) -> TrailPath {
    let columns = LayoutConfig::standard();
    let mut y = 0.0;
    let points: Vec<Point> = rows
        .iter()
        .map(|&(depth, gap)| {
            y += gap;
            Point::new(columns.column_x(depth), y)
        })
        .collect();
    synthesize(points, &PathConfig::standard())
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn distance_to_path(p: Point, path: &TrailPath) -> f64 {
    if path.vertices.len() == 1 {
        return p.distance(path.vertices[0]);
    }
    path.vertices
        .windows(2)
        .map(|w| distance_to_segment(p, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

fn ms(v: u64) -> HostTime {
    HostTime(v * 1_000)
}

/// Delivers a due timer and then a pending frame.
fn pump(ctrl: &mut MotionController, sched: &mut impl Host, now: HostTime) {
    let mut tracer = Tracer::none();
    if let Some(g) = sched.pending().take_due_timer(now) {
        ctrl.on_timer(g, now, sched, &mut tracer);
    }
    if let Some(g) = sched.pending().take_frame() {
        ctrl.on_frame(g, now, sched, &mut tracer);
    }
}

/// Steps 1 ms at a time until nothing is pending. Returns the end time.
fn run_until_idle(ctrl: &mut MotionController, sched: &mut impl Host, from: u64) -> u64 {
    let mut t = from;
    while !sched.pending().is_idle() && t < from + 10_000 {
        pump(ctrl, sched, ms(t));
        t += 1;
    }
    t
}

trait Host: FrameScheduler {
    fn pending(&mut self) -> &mut PendingWork;
}

impl Host for PendingWork {
    fn pending(&mut self) -> &mut PendingWork {
        self
    }
}

/// Counts timers armed while another one was still pending.
#[derive(Debug, Default)]
struct Counting {
    work: PendingWork,
    overlapping_timers: usize,
}

impl FrameScheduler for Counting {
    fn set_timer(&mut self, deadline: HostTime, generation: Generation) {
        if self.work.timer().is_some() {
            self.overlapping_timers += 1;
        }
        self.work.set_timer(deadline, generation);
    }

    fn clear_timer(&mut self) {
        self.work.clear_timer();
    }

    fn request_frame(&mut self, generation: Generation) {
        self.work.request_frame(generation);
    }

    fn cancel_frame(&mut self) {
        self.work.cancel_frame();
    }

    fn request_update(&mut self) {
        self.work.request_update();
    }
}

impl Host for Counting {
    fn pending(&mut self) -> &mut PendingWork {
        &mut self.work
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Waypoint lengths are non-decreasing and end at the total
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn waypoint_lengths_are_monotonic(rows in layout(24), stretch in 0.5_f64..2.0) {
        let path = trail(&rows);
        let drawn = path.to_bez_path();
        let table = LengthTable::measure(&path, &drawn, &Stretched(stretch));

        prop_assert_eq!(table.waypoint_lengths.len(), rows.len());
        prop_assert_eq!(table.waypoint_lengths[0], 0.0, "first waypoint starts the path");
        for w in table.waypoint_lengths.windows(2) {
            prop_assert!(w[0] <= w[1], "decreasing lengths {:?}", table.waypoint_lengths);
        }
        let last = table.waypoint_lengths[rows.len() - 1];
        prop_assert!(
            (last - table.total_length).abs() <= 1e-9 * table.total_length.max(1.0),
            "last waypoint {} vs total {}",
            last,
            table.total_length
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Sampling at a progress lands on the path
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sampled_points_lie_on_the_path(rows in layout(16), progress in 0.0_f64..=1.0) {
        let path = trail(&rows);
        let drawn = path.to_bez_path();
        let table = LengthTable::measure(&path, &drawn, &Analytic);
        let length = table.length_at(progress);

        let first = Analytic.point_at_length(&drawn, length);
        let second = Analytic.point_at_length(&drawn, length);
        prop_assert_eq!(first, second, "sampling is repeatable");
        let off = distance_to_path(first, &path);
        prop_assert!(off < 1e-4, "{:?} is {} away from the path", first, off);
    }
}

proptest! {
    #[test]
    fn waypoints_sit_at_their_lengths(rows in layout(16)) {
        let path = trail(&rows);
        let drawn = path.to_bez_path();
        let table = LengthTable::measure(&path, &drawn, &Analytic);
        for (i, expected) in path.waypoints().enumerate() {
            let p = Analytic.point_at_length(&drawn, table.waypoint_lengths[i]);
            prop_assert!(p.distance(expected) < 1e-4, "waypoint {} at {:?}, want {:?}", i, p, expected);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Same-target retargets are idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_retarget_settles_identically(target in 0.0_f64..=1.0, delay in 0_u64..700) {
        let mut tracer = Tracer::none();

        let mut once = MotionController::default();
        let mut work = PendingWork::new();
        once.retarget(target, ms(0), &mut work, &mut tracer);
        run_until_idle(&mut once, &mut work, 0);

        let mut twice = MotionController::default();
        let mut work = PendingWork::new();
        let first = twice.retarget(target, ms(0), &mut work, &mut tracer);
        let mut t = 0;
        while t < delay {
            pump(&mut twice, &mut work, ms(t));
            t += 1;
        }
        let second = twice.retarget(target, ms(t), &mut work, &mut tracer);
        prop_assert_eq!(first, second, "no new sequence for the same target");
        run_until_idle(&mut twice, &mut work, t);

        prop_assert_eq!(once.state(), twice.state());
        prop_assert_eq!(twice.phase(), MotionPhase::Idle);
        prop_assert_eq!(twice.state().progress, target);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Travel is capped
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn travel_never_exceeds_cap(from in 0.0_f64..=1.0, to in 0.0_f64..=1.0) {
        let config = MotionConfig::snappy();
        prop_assert!(config.travel_duration(to - from) <= config.max_travel);

        let mut ctrl = MotionController::new(config);
        let mut work = PendingWork::new();
        let mut tracer = Tracer::none();
        ctrl.retarget(from, ms(0), &mut work, &mut tracer);
        let t = run_until_idle(&mut ctrl, &mut work, 0);

        ctrl.retarget(to, ms(t), &mut work, &mut tracer);
        let mut started = None;
        let mut left = None;
        for now in t..t + 2_000 {
            pump(&mut ctrl, &mut work, ms(now));
            match (ctrl.phase(), started) {
                (MotionPhase::Travel, None) => started = Some(now),
                (MotionPhase::Travel, Some(_)) => {}
                (_, Some(_)) if left.is_none() => left = Some(now),
                _ => {}
            }
        }
        if let (Some(started), Some(left)) = (started, left) {
            let cap = Duration::from_millis(600).as_millis_f64();
            prop_assert!(((left - started) as f64) <= cap, "travelled {} ms", left - started);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Rapid toggling keeps one sequence in flight
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rapid_toggling_keeps_one_timer(toggles in proptest::collection::vec((any::<bool>(), 0_u64..120), 1..20)) {
        let mut ctrl = MotionController::default();
        let mut sched = Counting::default();
        let mut tracer = Tracer::none();
        let mut t = 0;
        let mut last = 0.0;

        for (upper, wait) in toggles {
            last = if upper { 0.8 } else { 0.2 };
            ctrl.retarget(last, ms(t), &mut sched, &mut tracer);
            for _ in 0..wait {
                pump(&mut ctrl, &mut sched, ms(t));
                if let Some((_, g)) = sched.work.timer() {
                    prop_assert_eq!(g, ctrl.generation(), "stale timer left armed");
                }
                if let Some(g) = sched.work.frame() {
                    prop_assert_eq!(g, ctrl.generation(), "stale frame loop left running");
                }
                t += 1;
            }
        }
        prop_assert_eq!(sched.overlapping_timers, 0, "a timer was armed over another");

        run_until_idle(&mut ctrl, &mut sched, t);
        prop_assert_eq!(ctrl.phase(), MotionPhase::Idle);
        prop_assert_eq!(ctrl.state().progress, last);
        prop_assert_eq!(ctrl.state().scale, 1.0, "no pulse left behind");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Single item trees
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn single_item_renders_a_point(top in 0.0_f64..500.0, height in 1.0_f64..60.0) {
        let geometry = OneRow(Rect::new(0.0, top, 180.0, top + height));
        let mut widget = TrailWidget::default();
        let mut work = PendingWork::new();
        widget.set_items(vec![SectionNode::new("only", "Only")], &mut work);
        widget.set_active(Some("only"), &mut work);

        let mut tracer = Tracer::none();
        let mut t = 0;
        while !work.is_idle() && t < 5_000 {
            let now = ms(t);
            if work.take_update() {
                widget.update(now, &geometry, &mut work, &mut tracer);
            }
            if let Some(g) = work.take_due_timer(now) {
                widget.on_timer(g, now, &mut work, &mut tracer);
            }
            if let Some(g) = work.take_frame() {
                widget.on_frame(g, now, &mut work, &mut tracer);
            }
            t += 16;
        }

        let frame = widget.frame(&geometry);
        prop_assert!(frame.visible);
        prop_assert_eq!(frame.total_length, 0.0);
        prop_assert_eq!(frame.revealed_length, 0.0);
        prop_assert!(frame.dash_array > 0.0, "dash array must stay positive");
        let centre = Point::new(12.0, top + height / 2.0);
        prop_assert!(frame.marker.distance(centre) < 1e-9, "marker at {:?}", frame.marker);
    }
}
