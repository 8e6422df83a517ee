// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual-time test harness for Switchback trails.
//!
//! Drives a [`TrailWidget`](switchback_core::widget::TrailWidget) without a
//! browser: a [`VirtualClock`] stands in for `performance.now()`, a
//! [`ManualScheduler`] records timer and frame requests instead of arming
//! them, and [`StubGeometry`] answers measurement queries from fixed boxes.
//! [`Harness`] ties them together and steps the widget one frame at a time,
//! feeding each frame into a [`SmoothnessTracker`].

#![no_std]

extern crate alloc;

mod clock;
mod driver;
mod geometry;
mod scheduler;
mod smooth;

pub use clock::VirtualClock;
pub use driver::Harness;
pub use geometry::StubGeometry;
pub use scheduler::ManualScheduler;
pub use smooth::{SmoothnessReport, SmoothnessTracker};
