// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based interpolation of a scalar.

use crate::easing::Easing;
use crate::time::{Duration, HostTime};

/// Interpolates a scalar from `from` to `to` over `duration` starting at
/// `start`, shaped by `easing`.
///
/// Sampling is a pure function of time, so sampling twice at the same instant
/// yields the same value and frames may be skipped freely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Value at `start`.
    pub from: f64,
    /// Value once the tween has finished.
    pub to: f64,
    /// Host time the tween begins.
    pub start: HostTime,
    /// Length of the tween.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

impl Tween {
    /// Creates a tween.
    #[must_use]
    pub const fn new(from: f64, to: f64, start: HostTime, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Host time at which the tween reaches `to`.
    #[must_use]
    pub const fn end(&self) -> HostTime {
        self.start.saturating_add(self.duration)
    }

    /// Linear completion fraction at `now`, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, now: HostTime) -> f64 {
        if self.duration == Duration::ZERO {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Samples the eased value at `now`.
    ///
    /// Before `start` this is `from`; at or after [`end`](Self::end) it is
    /// exactly `to`.
    #[must_use]
    pub fn sample(&self, now: HostTime) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let eased = self.easing.apply(self.fraction(now));
        self.from + (self.to - self.from) * eased
    }

    /// Returns `true` once `now` has reached the end of the tween.
    #[must_use]
    pub fn is_finished(&self, now: HostTime) -> bool {
        now >= self.end()
    }
}
