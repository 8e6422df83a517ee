// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for rebuilds and motion.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! widget and motion controller call at each transition. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::error::Degradation;
use crate::schedule::Generation;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which stage of the motion sequence was entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Marker shrinks before moving.
    Anticipation,
    /// Progress moves toward the target.
    Travel,
    /// Arrival pulse on the target.
    Arrival,
    /// Sequence completed; the marker rests on the target.
    Settled,
}

/// Why the trail was hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuppressReason {
    /// No items.
    EmptyTree,
    /// No active section.
    NoActiveSection,
    /// Active section id not in the tree.
    UnknownSection,
    /// Nothing could be measured.
    NoMeasurableItems,
    /// The active section and every section before it are unmeasured.
    ActiveUnmeasured,
}

impl SuppressReason {
    /// Maps a degradation reported as the reason for hiding the trail.
    ///
    /// Returns `None` for [`Degradation::PathDegenerate`], which never hides
    /// the trail.
    #[must_use]
    pub fn from_degradation(d: &Degradation) -> Option<Self> {
        match d {
            Degradation::EmptyTree => Some(Self::EmptyTree),
            Degradation::NoActiveSection => Some(Self::NoActiveSection),
            Degradation::UnknownSection { .. } => Some(Self::UnknownSection),
            Degradation::NoMeasurableItems => Some(Self::NoMeasurableItems),
            Degradation::MeasurementUnavailable { .. } => Some(Self::ActiveUnmeasured),
            Degradation::PathDegenerate => None,
        }
    }

    /// Short lowercase name, used by text and JSON exporters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyTree => "empty-tree",
            Self::NoActiveSection => "no-active-section",
            Self::UnknownSection => "unknown-section",
            Self::NoMeasurableItems => "no-measurable-items",
            Self::ActiveUnmeasured => "active-unmeasured",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after the path and length table are rebuilt.
#[derive(Clone, Copy, Debug)]
pub struct RebuildEvent {
    /// Host time of the rebuild.
    pub at: HostTime,
    /// Number of flat items.
    pub items: usize,
    /// Number of items that produced a waypoint.
    pub waypoints: usize,
    /// Number of items that could not be measured.
    pub skipped: usize,
    /// Rendered length of the new path.
    pub total_length: f64,
}

/// Emitted when the trail is hidden.
#[derive(Clone, Copy, Debug)]
pub struct SuppressEvent {
    /// Host time.
    pub at: HostTime,
    /// Why.
    pub reason: SuppressReason,
}

/// Emitted when the motion controller is aimed at a new progress.
#[derive(Clone, Copy, Debug)]
pub struct RetargetEvent {
    /// Host time of the retarget.
    pub at: HostTime,
    /// Generation armed by this retarget.
    pub generation: Generation,
    /// Live progress at the time of the retarget.
    pub from: f64,
    /// Target progress.
    pub to: f64,
}

/// Emitted when an in-flight sequence is superseded before it settled.
#[derive(Clone, Copy, Debug)]
pub struct CancelEvent {
    /// Host time.
    pub at: HostTime,
    /// Generation that was cancelled.
    pub superseded: Generation,
}

/// Emitted when the motion sequence enters a phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEvent {
    /// Host time.
    pub at: HostTime,
    /// Generation of the sequence.
    pub generation: Generation,
    /// Phase entered.
    pub phase: PhaseKind,
    /// Progress at entry.
    pub progress: f64,
    /// Marker scale at entry.
    pub scale: f64,
}

/// Emitted when travel starts, with its resolved duration.
#[derive(Clone, Copy, Debug)]
pub struct TravelEvent {
    /// Host time travel starts.
    pub at: HostTime,
    /// Generation of the sequence.
    pub generation: Generation,
    /// Start progress.
    pub from: f64,
    /// Target progress.
    pub to: f64,
    /// Clamped travel duration.
    pub duration: Duration,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the trail.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a rebuild.
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        _ = e;
    }

    /// Called when the trail is hidden.
    fn on_suppress(&mut self, e: &SuppressEvent) {
        _ = e;
    }

    /// Called on every retarget.
    fn on_retarget(&mut self, e: &RetargetEvent) {
        _ = e;
    }

    /// Called when an in-flight sequence is superseded.
    fn on_cancel(&mut self, e: &CancelEvent) {
        _ = e;
    }

    /// Called when the motion sequence enters a phase.
    fn on_phase(&mut self, e: &PhaseEvent) {
        _ = e;
    }

    /// Called when travel starts.
    fn on_travel(&mut self, e: &TravelEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RebuildEvent`].
    #[inline]
    pub fn rebuild(&mut self, e: &RebuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rebuild(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SuppressEvent`].
    #[inline]
    pub fn suppress(&mut self, e: &SuppressEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_suppress(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RetargetEvent`].
    #[inline]
    pub fn retarget(&mut self, e: &RetargetEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_retarget(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CancelEvent`].
    #[inline]
    pub fn cancel(&mut self, e: &CancelEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cancel(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PhaseEvent`].
    #[inline]
    pub fn phase(&mut self, e: &PhaseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TravelEvent`].
    #[inline]
    pub fn travel(&mut self, e: &TravelEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_travel(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_phase() -> PhaseEvent {
        PhaseEvent {
            at: HostTime(50_000),
            generation: Generation(3),
            phase: PhaseKind::Travel,
            progress: 0.25,
            scale: 0.85,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_phase(&sample_phase());
        sink.on_rebuild(&RebuildEvent {
            at: HostTime(0),
            items: 4,
            waypoints: 4,
            skipped: 0,
            total_length: 128.0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.phase(&sample_phase());
        tracer.cancel(&CancelEvent {
            at: HostTime(0),
            superseded: Generation(1),
        });
    }

    #[test]
    fn suppress_reason_mapping() {
        assert_eq!(
            SuppressReason::from_degradation(&Degradation::EmptyTree),
            Some(SuppressReason::EmptyTree)
        );
        assert_eq!(
            SuppressReason::from_degradation(&Degradation::UnknownSection { id: "x".into() }),
            Some(SuppressReason::UnknownSection)
        );
        assert_eq!(
            SuppressReason::from_degradation(&Degradation::PathDegenerate),
            None,
            "a degenerate path keeps the trail"
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            phases: Vec<PhaseKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_phase(&mut self, e: &PhaseEvent) {
                self.phases.push(e.phase);
            }
        }

        let mut sink = RecordingSink { phases: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.phase(&sample_phase());
        tracer.phase(&PhaseEvent {
            phase: PhaseKind::Arrival,
            ..sample_phase()
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.phases, &[PhaseKind::Travel, PhaseKind::Arrival]);
    }
}
