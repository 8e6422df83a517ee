// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scheduler capability for timers, frames and deferred rebuilds.
//!
//! The trail never touches a global timer or frame loop. Everything that has to
//! happen later is requested through a [`FrameScheduler`] passed in by the
//! host, and every continuation carries the [`Generation`] that armed it. A
//! continuation whose generation is no longer current is dropped by the
//! receiver, so a host that delivers a late callback after a cancel cannot
//! resurrect a superseded sequence.
//!
//! [`PendingWork`] is a recording implementation: it stores the latest request
//! of each kind and lets the host poll what is due.

use core::fmt;

use crate::time::HostTime;

/// Identifies one motion sequence.
///
/// Bumped on every retarget, hide and shutdown.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The generation after this one.
    #[inline]
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

/// Host capability for deferred work.
///
/// There is at most one pending timer and at most one pending frame request;
/// arming either again replaces the previous request.
pub trait FrameScheduler {
    /// Arms the one-shot timer to fire at `deadline`, replacing any pending
    /// timer. The host calls back with `generation` when it fires.
    fn set_timer(&mut self, deadline: HostTime, generation: Generation);

    /// Disarms the pending timer, if any.
    fn clear_timer(&mut self);

    /// Requests a frame callback carrying `generation`.
    fn request_frame(&mut self, generation: Generation);

    /// Cancels the pending frame request, if any.
    fn cancel_frame(&mut self);

    /// Requests a deferred rebuild on the next frame, after layout settles.
    fn request_update(&mut self);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn set_timer(&mut self, deadline: HostTime, generation: Generation) {
        (**self).set_timer(deadline, generation);
    }

    fn clear_timer(&mut self) {
        (**self).clear_timer();
    }

    fn request_frame(&mut self, generation: Generation) {
        (**self).request_frame(generation);
    }

    fn cancel_frame(&mut self) {
        (**self).cancel_frame();
    }

    fn request_update(&mut self) {
        (**self).request_update();
    }
}

/// Records scheduler requests for a host to execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingWork {
    timer: Option<(HostTime, Generation)>,
    frame: Option<Generation>,
    update: bool,
}

impl PendingWork {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timer: None,
            frame: None,
            update: false,
        }
    }

    /// The pending timer deadline and generation.
    #[must_use]
    pub const fn timer(&self) -> Option<(HostTime, Generation)> {
        self.timer
    }

    /// The pending frame request.
    #[must_use]
    pub const fn frame(&self) -> Option<Generation> {
        self.frame
    }

    /// Returns `true` if a deferred rebuild is pending.
    #[must_use]
    pub const fn update_requested(&self) -> bool {
        self.update
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.timer.is_none() && self.frame.is_none() && !self.update
    }

    /// Takes the timer if its deadline is at or before `now`.
    pub fn take_due_timer(&mut self, now: HostTime) -> Option<Generation> {
        match self.timer {
            Some((deadline, generation)) if deadline <= now => {
                self.timer = None;
                Some(generation)
            }
            _ => None,
        }
    }

    /// Takes the pending frame request.
    pub fn take_frame(&mut self) -> Option<Generation> {
        self.frame.take()
    }

    /// Takes the pending rebuild request.
    pub fn take_update(&mut self) -> bool {
        core::mem::take(&mut self.update)
    }
}

impl FrameScheduler for PendingWork {
    fn set_timer(&mut self, deadline: HostTime, generation: Generation) {
        self.timer = Some((deadline, generation));
    }

    fn clear_timer(&mut self) {
        self.timer = None;
    }

    fn request_frame(&mut self, generation: Generation) {
        self.frame = Some(generation);
    }

    fn cancel_frame(&mut self) {
        self.frame = None;
    }

    fn request_update(&mut self) {
        self.update = true;
    }
}
