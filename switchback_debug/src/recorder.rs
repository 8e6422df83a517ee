// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Item counts in [`RebuildEvent`] are capped at `u32::MAX` when recorded.

use switchback_core::schedule::Generation;
use switchback_core::time::{Duration, HostTime};
use switchback_core::trace::{
    CancelEvent, PhaseEvent, PhaseKind, RebuildEvent, RetargetEvent, SuppressEvent,
    SuppressReason, TraceSink, TravelEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_REBUILD: u8 = 1;
const TAG_SUPPRESS: u8 = 2;
const TAG_RETARGET: u8 = 3;
const TAG_CANCEL: u8 = 4;
const TAG_PHASE: u8 = 5;
const TAG_TRAVEL: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&mut self, n: usize) {
        self.write_u32(u32::try_from(n).unwrap_or(u32::MAX));
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Anticipation => 0,
            PhaseKind::Travel => 1,
            PhaseKind::Arrival => 2,
            PhaseKind::Settled => 3,
        });
    }

    fn write_reason(&mut self, r: SuppressReason) {
        self.write_u8(match r {
            SuppressReason::EmptyTree => 0,
            SuppressReason::NoActiveSection => 1,
            SuppressReason::UnknownSection => 2,
            SuppressReason::NoMeasurableItems => 3,
            SuppressReason::ActiveUnmeasured => 4,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.write_u8(TAG_REBUILD);
        self.write_u64(e.at.ticks());
        self.write_count(e.items);
        self.write_count(e.waypoints);
        self.write_count(e.skipped);
        self.write_f64(e.total_length);
    }

    fn on_suppress(&mut self, e: &SuppressEvent) {
        self.write_u8(TAG_SUPPRESS);
        self.write_u64(e.at.ticks());
        self.write_reason(e.reason);
    }

    fn on_retarget(&mut self, e: &RetargetEvent) {
        self.write_u8(TAG_RETARGET);
        self.write_u64(e.at.ticks());
        self.write_u64(e.generation.get());
        self.write_f64(e.from);
        self.write_f64(e.to);
    }

    fn on_cancel(&mut self, e: &CancelEvent) {
        self.write_u8(TAG_CANCEL);
        self.write_u64(e.at.ticks());
        self.write_u64(e.superseded.get());
    }

    fn on_phase(&mut self, e: &PhaseEvent) {
        self.write_u8(TAG_PHASE);
        self.write_u64(e.at.ticks());
        self.write_u64(e.generation.get());
        self.write_phase(e.phase);
        self.write_f64(e.progress);
        self.write_f64(e.scale);
    }

    fn on_travel(&mut self, e: &TravelEvent) {
        self.write_u8(TAG_TRAVEL);
        self.write_u64(e.at.ticks());
        self.write_u64(e.generation.get());
        self.write_f64(e.from);
        self.write_f64(e.to);
        self.write_u64(e.duration.ticks());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`RebuildEvent`].
    Rebuild(RebuildEvent),
    /// A [`SuppressEvent`].
    Suppress(SuppressEvent),
    /// A [`RetargetEvent`].
    Retarget(RetargetEvent),
    /// A [`CancelEvent`].
    Cancel(CancelEvent),
    /// A [`PhaseEvent`].
    Phase(PhaseEvent),
    /// A [`TravelEvent`].
    Travel(TravelEvent),
}

impl RecordedEvent {
    /// Host time of the event.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Rebuild(e) => e.at,
            Self::Suppress(e) => e.at,
            Self::Retarget(e) => e.at,
            Self::Cancel(e) => e.at,
            Self::Phase(e) => e.at,
            Self::Travel(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_count(&mut self) -> Option<usize> {
        usize::try_from(self.read_u32()?).ok()
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_generation(&mut self) -> Option<Generation> {
        self.read_u64().map(Generation)
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::Anticipation,
            1 => PhaseKind::Travel,
            2 => PhaseKind::Arrival,
            _ => PhaseKind::Settled,
        })
    }

    fn read_reason(&mut self) -> Option<SuppressReason> {
        Some(match self.read_u8()? {
            0 => SuppressReason::EmptyTree,
            1 => SuppressReason::NoActiveSection,
            2 => SuppressReason::UnknownSection,
            3 => SuppressReason::NoMeasurableItems,
            _ => SuppressReason::ActiveUnmeasured,
        })
    }

    fn decode_rebuild(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Rebuild(RebuildEvent {
            at: self.read_time()?,
            items: self.read_count()?,
            waypoints: self.read_count()?,
            skipped: self.read_count()?,
            total_length: self.read_f64()?,
        }))
    }

    fn decode_suppress(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Suppress(SuppressEvent {
            at: self.read_time()?,
            reason: self.read_reason()?,
        }))
    }

    fn decode_retarget(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Retarget(RetargetEvent {
            at: self.read_time()?,
            generation: self.read_generation()?,
            from: self.read_f64()?,
            to: self.read_f64()?,
        }))
    }

    fn decode_cancel(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Cancel(CancelEvent {
            at: self.read_time()?,
            superseded: self.read_generation()?,
        }))
    }

    fn decode_phase(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Phase(PhaseEvent {
            at: self.read_time()?,
            generation: self.read_generation()?,
            phase: self.read_phase()?,
            progress: self.read_f64()?,
            scale: self.read_f64()?,
        }))
    }

    fn decode_travel(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Travel(TravelEvent {
            at: self.read_time()?,
            generation: self.read_generation()?,
            from: self.read_f64()?,
            to: self.read_f64()?,
            duration: Duration(self.read_u64()?),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_REBUILD => self.decode_rebuild(),
            TAG_SUPPRESS => self.decode_suppress(),
            TAG_RETARGET => self.decode_retarget(),
            TAG_CANCEL => self.decode_cancel(),
            TAG_PHASE => self.decode_phase(),
            TAG_TRAVEL => self.decode_travel(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
