// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for Switchback trails.
//!
//! This crate provides the host pieces described in
//! [`switchback_core::backend`] for browsers:
//!
//! - [`now`]: host time from `performance.now()`
//! - [`RafLoop`]: `requestAnimationFrame` loop that stops when idle
//! - [`Timeout`]: one-shot `setTimeout` for the anticipation timer
//! - [`DomGeometry`]: row boxes from the DOM and arc-length queries from the
//!   drawn SVG path
//! - [`SvgPresenter`]: draws frames into an `<svg>` overlay and a list of
//!   row buttons
//! - [`TrailDriver`]: wires all of the above to a
//!   [`TrailWidget`](switchback_core::widget::TrailWidget), with resize and
//!   scroll-spy observers

#![no_std]

extern crate alloc;

mod driver;
mod geometry;
mod presenter;
mod raf;
mod timer;

pub use driver::TrailDriver;
pub use geometry::DomGeometry;
pub use presenter::SvgPresenter;
pub use raf::RafLoop;
pub use switchback_core::backend::Presenter;
pub use timer::Timeout;

use switchback_core::time::HostTime;

/// Returns the current host time from `performance.now()`, in microsecond
/// ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
