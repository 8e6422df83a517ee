// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use switchback_core::schedule::{FrameScheduler, Generation, PendingWork};
use switchback_core::time::HostTime;

/// A [`FrameScheduler`] that records requests and counts them.
///
/// Nothing fires on its own; the driver polls
/// [`take_due_timer`](Self::take_due_timer), [`take_frame`](Self::take_frame)
/// and [`take_update`](Self::take_update). Besides the pending work, it keeps
/// counters so tests can assert on how the trail used the scheduler, most
/// importantly [`overlapping_timers`](Self::overlapping_timers): how often a
/// timer was armed while another one was still pending.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualScheduler {
    pending: PendingWork,
    timers_armed: u64,
    timers_cleared: u64,
    overlapping_timers: u64,
    frames_requested: u64,
    frames_cancelled: u64,
    updates_requested: u64,
}

impl ManualScheduler {
    /// Creates a scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The requests not yet taken.
    #[must_use]
    pub const fn pending(&self) -> &PendingWork {
        &self.pending
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.pending.is_idle()
    }

    /// Deadline and generation of the pending timer.
    #[must_use]
    pub const fn timer(&self) -> Option<(HostTime, Generation)> {
        self.pending.timer()
    }

    /// Takes the timer if its deadline is at or before `now`, returning its
    /// deadline and generation.
    pub fn take_due_timer(&mut self, now: HostTime) -> Option<(HostTime, Generation)> {
        let (deadline, _) = self.pending.timer()?;
        let generation = self.pending.take_due_timer(now)?;
        Some((deadline, generation))
    }

    /// Takes the pending frame request.
    pub fn take_frame(&mut self) -> Option<Generation> {
        self.pending.take_frame()
    }

    /// Takes the pending update request.
    pub fn take_update(&mut self) -> bool {
        self.pending.take_update()
    }

    /// Number of timers armed.
    #[must_use]
    pub const fn timers_armed(&self) -> u64 {
        self.timers_armed
    }

    /// Number of timers cleared while pending.
    #[must_use]
    pub const fn timers_cleared(&self) -> u64 {
        self.timers_cleared
    }

    /// Number of timers armed over a still-pending timer.
    #[must_use]
    pub const fn overlapping_timers(&self) -> u64 {
        self.overlapping_timers
    }

    /// Number of frame requests.
    #[must_use]
    pub const fn frames_requested(&self) -> u64 {
        self.frames_requested
    }

    /// Number of frame requests cancelled while pending.
    #[must_use]
    pub const fn frames_cancelled(&self) -> u64 {
        self.frames_cancelled
    }

    /// Number of update requests.
    #[must_use]
    pub const fn updates_requested(&self) -> u64 {
        self.updates_requested
    }
}

impl FrameScheduler for ManualScheduler {
    fn set_timer(&mut self, deadline: HostTime, generation: Generation) {
        if self.pending.timer().is_some() {
            self.overlapping_timers += 1;
        }
        self.timers_armed += 1;
        self.pending.set_timer(deadline, generation);
    }

    fn clear_timer(&mut self) {
        if self.pending.timer().is_some() {
            self.timers_cleared += 1;
        }
        self.pending.clear_timer();
    }

    fn request_frame(&mut self, generation: Generation) {
        self.frames_requested += 1;
        self.pending.request_frame(generation);
    }

    fn cancel_frame(&mut self) {
        if self.pending.frame().is_some() {
            self.frames_cancelled += 1;
        }
        self.pending.cancel_frame();
    }

    fn request_update(&mut self) {
        self.updates_requested += 1;
        self.pending.request_update();
    }
}
