// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated reading session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Drives a documentation-page trail through a virtual clock: the reader
//! scrolls down section by section, skims back up, and one row unmounts
//! mid-animation. Events go to both a
//! [`PrettyPrintSink`](switchback_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](switchback_debug::recorder::RecorderSink), and the
//! recording is exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Vec2;
use switchback_core::config::TrailConfig;
use switchback_core::section::SectionNode;
use switchback_core::time::Duration;
use switchback_core::trace::{
    CancelEvent, PhaseEvent, RebuildEvent, RetargetEvent, SuppressEvent, TraceSink, TravelEvent,
};
use switchback_harness::{Harness, StubGeometry};

use switchback_debug::pretty::PrettyPrintSink;
use switchback_debug::recorder::RecorderSink;

const ROW_HEIGHT: f64 = 24.0;
const ROW_GAP: f64 = 8.0;

/// Forwards every event to both sinks.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.pretty.on_rebuild(e);
        self.recorder.on_rebuild(e);
    }

    fn on_suppress(&mut self, e: &SuppressEvent) {
        self.pretty.on_suppress(e);
        self.recorder.on_suppress(e);
    }

    fn on_retarget(&mut self, e: &RetargetEvent) {
        self.pretty.on_retarget(e);
        self.recorder.on_retarget(e);
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        self.pretty.on_cancel(e);
        self.recorder.on_cancel(e);
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        self.pretty.on_phase(e);
        self.recorder.on_phase(e);
    }

    fn on_travel(&mut self, e: &TravelEvent) {
        self.pretty.on_travel(e);
        self.recorder.on_travel(e);
    }
}

fn table_of_contents() -> Vec<SectionNode> {
    vec![
        SectionNode::new("installation", "Installation"),
        SectionNode::new("usage", "Usage"),
        SectionNode::new("examples", "Examples").with_children([
            SectionNode::new("line-chart", "Line Chart"),
            SectionNode::new("bar-chart", "Bar Chart"),
            SectionNode::new("pie-chart", "Pie Chart"),
        ]),
        SectionNode::new("test-cases", "Test Cases"),
        SectionNode::new("props", "Props"),
        SectionNode::new("allowed-variables", "Allowed Variables"),
        SectionNode::new("usecases", "Usecases"),
    ]
}

const ROWS: [&str; 10] = [
    "installation",
    "usage",
    "examples",
    "line-chart",
    "bar-chart",
    "pie-chart",
    "test-cases",
    "props",
    "allowed-variables",
    "usecases",
];

fn main() {
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    let geometry = StubGeometry::stacked_rows(ROWS, ROW_HEIGHT, ROW_GAP);
    let mut harness = Harness::new(TrailConfig::default(), geometry);
    harness.set_items(table_of_contents());

    {
        let mut sink = Tee {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };

        // Nothing is active yet: the trail stays hidden.
        harness.step_traced(&mut sink);

        // Reading top to bottom, lingering on each section.
        for id in ["installation", "usage", "line-chart", "pie-chart", "props"] {
            harness.set_active(Some(id));
            harness.run_for_traced(Duration::from_millis(900), &mut sink);
        }

        // Skimming back up faster than the marker can follow.
        for id in ["test-cases", "bar-chart", "examples", "usage"] {
            harness.set_active(Some(id));
            harness.run_for_traced(Duration::from_millis(40), &mut sink);
        }
        harness.run_for_traced(Duration::from_millis(900), &mut sink);

        // A late font load pushes every row down.
        harness.geometry_mut().shift(Vec2::new(0.0, 6.0));
        harness.invalidate_layout();
        harness.set_active(Some("usecases"));
        harness.run_for_traced(Duration::from_millis(120), &mut sink);

        // The target row unmounts mid-travel; the trail falls back to the
        // nearest measured row above it.
        harness.geometry_mut().remove("usecases");
        harness.invalidate_layout();
        harness.run_for_traced(Duration::from_millis(900), &mut sink);
    }

    if let Some(report) = harness.smoothness() {
        println!(
            "smoothness: max step {:.3}, {} reversals, {} jumps over {} frames",
            report.max_step, report.reversals, report.jumps, report.total_frames
        );
    }
    println!(
        "progress {}",
        harness.smoothness_tracker().sparkline_ascii(0.1)
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    switchback_debug::chrome::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!(
        "Wrote {path} ({} frames, {} bytes recorded)",
        harness.scheduler().frames_requested(),
        recorder.as_bytes().len()
    );
}
