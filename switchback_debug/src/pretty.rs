// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds relative to the first event the sink saw.

use std::io::Write;

use switchback_core::time::HostTime;
use switchback_core::trace::{
    CancelEvent, PhaseEvent, PhaseKind, RebuildEvent, RetargetEvent, SuppressEvent, TraceSink,
    TravelEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    origin: Option<HostTime>,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            origin: None,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            origin: None,
        }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ms(&mut self, t: HostTime) -> f64 {
        let origin = *self.origin.get_or_insert(t);
        t.saturating_duration_since(origin).as_millis_f64()
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Anticipation => "anticipate",
        PhaseKind::Travel => "travel",
        PhaseKind::Arrival => "arrive",
        PhaseKind::Settled => "settled",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        let at = self.ms(e.at);
        let _ = writeln!(
            self.writer,
            "[rebuild] {at:8.1}ms items={} waypoints={} skipped={} length={:.1}",
            e.items, e.waypoints, e.skipped, e.total_length,
        );
    }

    fn on_suppress(&mut self, e: &SuppressEvent) {
        let at = self.ms(e.at);
        let _ = writeln!(self.writer, "[hidden] {at:8.1}ms {}", e.reason.as_str());
    }

    fn on_retarget(&mut self, e: &RetargetEvent) {
        let at = self.ms(e.at);
        let _ = writeln!(
            self.writer,
            "[retarget] {at:8.1}ms gen={} {:.3} -> {:.3}",
            e.generation.get(),
            e.from,
            e.to,
        );
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        let at = self.ms(e.at);
        let _ = writeln!(
            self.writer,
            "[cancel] {at:8.1}ms gen={}",
            e.superseded.get()
        );
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        let at = self.ms(e.at);
        let _ = writeln!(
            self.writer,
            "[phase:{}] {at:8.1}ms gen={} progress={:.3} scale={:.2}",
            phase_name(e.phase),
            e.generation.get(),
            e.progress,
            e.scale,
        );
    }

    fn on_travel(&mut self, e: &TravelEvent) {
        let at = self.ms(e.at);
        let _ = writeln!(
            self.writer,
            "[travel] {at:8.1}ms gen={} {:.3} -> {:.3} over {:.0}ms",
            e.generation.get(),
            e.from,
            e.to,
            e.duration.as_millis_f64(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchback_core::schedule::Generation;
    use switchback_core::time::Duration;
    use switchback_core::trace::SuppressReason;

    #[test]
    fn times_are_relative_to_first_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_retarget(&RetargetEvent {
            at: HostTime(2_000_000),
            generation: Generation(1),
            from: 0.0,
            to: 0.5,
        });
        sink.on_travel(&TravelEvent {
            at: HostTime(2_050_000),
            generation: Generation(1),
            from: 0.0,
            to: 0.5,
            duration: Duration::from_millis(600),
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2, "got: {output}");
        assert!(lines[0].contains("[retarget]") && lines[0].contains("0.0ms"), "got: {output}");
        assert!(lines[1].contains("50.0ms") && lines[1].contains("over 600ms"), "got: {output}");
    }

    #[test]
    fn suppress_prints_reason() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_suppress(&SuppressEvent {
            at: HostTime(0),
            reason: SuppressReason::NoActiveSection,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[hidden]"), "got: {output}");
        assert!(output.contains("no-active-section"), "got: {output}");
    }
}
