// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated navigation trail for "on this page" tables of contents.
//!
//! `switchback_core` turns a hierarchical list of sections into one continuous
//! 2D route through the on-screen position of every section, parametrizes it
//! by arc length, and drives a marker along it toward the active section with
//! an anticipation / travel / arrival timing model. It is `no_std` compatible
//! (with `alloc`) and does no measuring or drawing itself: a host supplies a
//! [`GeometryProvider`](geometry::GeometryProvider) and a
//! [`FrameScheduler`](schedule::FrameScheduler).
//!
//! # Architecture
//!
//! ```text
//!   SectionNode tree
//!       │  section::flatten
//!       ▼
//!   FlatItem list ──► sampler::sample_waypoints ──► Waypoints
//!                         (GeometryProvider::measure)   │
//!                                                       ▼
//!                                path::synthesize ──► TrailPath
//!                                                       │
//!                                                       ▼
//!          LengthTable::measure (GeometryProvider::path_length) ──► LengthTable
//!                                                       │
//!                                                       ▼
//!   MotionController::retarget ◄── active section's progress fraction
//!       │  (FrameScheduler timers + frames)
//!       ▼
//!   MotionState ──► TrailRenderer::render ──► TrailFrame ──► Presenter::present
//! ```
//!
//! **[`widget`]**: [`TrailWidget`](widget::TrailWidget) wires the stages
//! together, owns invalidation and exposes the public contract (items,
//! active section, item clicks).
//!
//! **[`section`]**, **[`sampler`]**, **[`path`]**, **[`arclen`]**: the
//! geometry pipeline, each stage synchronous and pure apart from the
//! measurement queries it makes.
//!
//! **[`motion`]**: the three-phase state machine; **[`easing`]** and
//! **[`tween`]** are its interpolation primitives.
//!
//! **[`render`]**: builds the dash-reveal and marker placement for a frame.
//!
//! **[`schedule`]**: generation-tagged timer/frame capability.
//!
//! **[`dirty`]**: invalidation channels via `understory_dirty`.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and events for
//! rebuild and motion instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! **[`spy`]**: elects the active section from visibility ratios.
//!
//! **[`backend`]**: what a host must provide, and the
//! [`Presenter`](backend::Presenter) trait.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod arclen;
pub mod backend;
pub mod config;
pub mod dirty;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod path;
pub mod render;
pub mod sampler;
pub mod schedule;
pub mod section;
pub mod spy;
pub mod time;
pub mod trace;
pub mod tween;
pub mod widget;
