// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Travel becomes a complete (`X`) slice spanning its resolved duration,
//! marker progress and scale become counter (`C`) tracks sampled at each
//! phase entry, and everything else is an instant.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use switchback_core::time::HostTime;

use crate::recorder::{RecordedEvent, decode};

/// Track id of widget-level events.
const WIDGET_TID: u32 = 0;
/// Track id of motion events.
const MOTION_TID: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Timestamps are host-time microseconds.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Rebuild(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Rebuild",
                    "cat": "Widget",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": WIDGET_TID,
                    "s": "t",
                    "args": {
                        "items": e.items,
                        "waypoints": e.waypoints,
                        "skipped": e.skipped,
                        "total_length": e.total_length,
                    }
                }));
            }
            RecordedEvent::Suppress(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Hidden",
                    "cat": "Widget",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": WIDGET_TID,
                    "s": "t",
                    "args": {
                        "reason": e.reason.as_str(),
                    }
                }));
            }
            RecordedEvent::Retarget(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Retarget",
                    "cat": "Motion",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": MOTION_TID,
                    "s": "t",
                    "args": {
                        "generation": e.generation.get(),
                        "from": e.from,
                        "to": e.to,
                    }
                }));
            }
            RecordedEvent::Cancel(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Cancel",
                    "cat": "Motion",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": MOTION_TID,
                    "s": "t",
                    "args": {
                        "superseded": e.superseded.get(),
                    }
                }));
            }
            RecordedEvent::Phase(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.phase),
                    "cat": "Motion",
                    "ts": us(e.at),
                    "pid": 0,
                    "tid": MOTION_TID,
                    "s": "t",
                    "args": {
                        "generation": e.generation.get(),
                    }
                }));
                events.push(json!({
                    "ph": "C",
                    "name": "Marker",
                    "cat": "Motion",
                    "ts": us(e.at),
                    "pid": 0,
                    "args": {
                        "progress": e.progress,
                        "scale": e.scale,
                    }
                }));
            }
            RecordedEvent::Travel(e) => {
                events.push(json!({
                    "ph": "X",
                    "name": "Travel",
                    "cat": "Motion",
                    "ts": us(e.at),
                    "dur": e.duration.ticks(),
                    "pid": 0,
                    "tid": MOTION_TID,
                    "args": {
                        "generation": e.generation.get(),
                        "from": e.from,
                        "to": e.to,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn us(t: HostTime) -> u64 {
    t.ticks()
}
