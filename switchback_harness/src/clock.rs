// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use switchback_core::time::{Duration, HostTime};

/// A monotonic clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now: HostTime,
}

impl VirtualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn new(start: HostTime) -> Self {
        Self { now: start }
    }

    /// Current reading.
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Moves the clock forward by `by` and returns the new reading.
    pub fn advance(&mut self, by: Duration) -> HostTime {
        self.now = self.now.saturating_add(by);
        self.now
    }

    /// Moves the clock forward by `ms` milliseconds.
    pub fn advance_ms(&mut self, ms: u64) -> HostTime {
        self.advance(Duration::from_millis(ms))
    }

    /// Moves the clock to `to`. Earlier times are ignored, so the clock stays
    /// monotonic.
    pub fn advance_to(&mut self, to: HostTime) -> HostTime {
        self.now = self.now.max(to);
        self.now
    }
}
