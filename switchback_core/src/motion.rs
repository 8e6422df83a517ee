// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker motion: anticipation, travel and arrival.
//!
//! [`MotionController`] owns the single [`MotionState`] of the marker and moves
//! its progress toward a target fraction of the path in three phases:
//!
//! 1. **Anticipation**: the scale shrinks toward
//!    [`anticipation_scale`](MotionConfig::anticipation_scale) while a one-shot
//!    timer counts down [`anticipation`](MotionConfig::anticipation).
//! 2. **Travel**: when the timer fires, progress tweens from its live value to
//!    the target over a duration derived from the distance and clamped to
//!    `[min_travel, max_travel]`. The scale recovers to 1.0 over the first
//!    [`recover_fraction`](MotionConfig::recover_fraction) of the travel.
//! 3. **Arrival**: the scale pulses to
//!    [`pulse_scale`](MotionConfig::pulse_scale) and settles back to 1.0 with
//!    an overshooting curve.
//!
//! # Cancellation
//!
//! Every [`retarget`](MotionController::retarget) bumps the [`Generation`],
//! clears the pending timer, cancels the pending frame and starts over from
//! the live progress and scale. Timer and frame callbacks carry the generation
//! that armed them; stale ones are ignored, so at most one sequence is ever in
//! flight.
//!
//! # Sampling
//!
//! All values are pure functions of host time. A late frame jumps straight to
//! the state it would have reached, passing through phase boundaries as
//! needed.

use crate::config::MotionConfig;
use crate::easing::Easing;
use crate::schedule::{FrameScheduler, Generation};
use crate::time::HostTime;
use crate::trace::{CancelEvent, PhaseEvent, PhaseKind, RetargetEvent, Tracer, TravelEvent};
use crate::tween::Tween;

/// Targets closer than this are treated as the same target.
const TARGET_EPSILON: f64 = 1e-9;

/// Where the marker is in its motion sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPhase {
    /// Resting on the target, or never targeted.
    Idle,
    /// Shrinking before travel; travel starts when the timer fires.
    Anticipation {
        /// Deadline of the anticipation timer.
        travel_at: HostTime,
    },
    /// Moving toward the target.
    Travel,
    /// Pulsing on the target.
    Arrival,
    /// The trail is hidden.
    Hidden,
}

impl MotionPhase {
    /// Returns `true` while a sequence is in flight.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Anticipation { .. } | Self::Travel | Self::Arrival)
    }
}

/// Live marker values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Position along the path, in `[0, 1]`.
    pub progress: f64,
    /// Marker scale; 1.0 at rest.
    pub scale: f64,
    /// Target progress of the travel that has not completed yet.
    pub pending_target: Option<f64>,
    /// Whether the trail is shown.
    pub visible: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            scale: 1.0,
            pending_target: None,
            visible: false,
        }
    }
}

/// Drives [`MotionState`] toward the active section's progress.
#[derive(Clone, Debug)]
pub struct MotionController {
    config: MotionConfig,
    state: MotionState,
    phase: MotionPhase,
    generation: Generation,
    target: Option<f64>,
    progress_tween: Option<Tween>,
    scale_tween: Option<Tween>,
    /// Second half of the arrival pulse, started when the rise finishes.
    settle_tween: Option<Tween>,
}

impl MotionController {
    /// Creates a hidden controller at progress 0.
    #[must_use]
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            state: MotionState::default(),
            phase: MotionPhase::Hidden,
            generation: Generation::default(),
            target: None,
            progress_tween: None,
            scale_tween: None,
            settle_tween: None,
        }
    }

    /// Returns the motion configuration.
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect at the next retarget.
    pub fn set_config(&mut self, config: MotionConfig) {
        self.config = config;
    }

    /// Live marker values as of the last callback.
    #[must_use]
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Generation of the current sequence.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Target progress of the current sequence, if visible.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Returns `true` if the next frame would change the state.
    #[must_use]
    pub fn is_animating(&self, now: HostTime) -> bool {
        match self.phase {
            MotionPhase::Travel | MotionPhase::Arrival => true,
            MotionPhase::Anticipation { .. } => {
                self.scale_tween.is_some_and(|t| !t.is_finished(now))
            }
            MotionPhase::Idle | MotionPhase::Hidden => false,
        }
    }

    /// Aims the marker at `target` progress.
    ///
    /// Restarts the full sequence from the live progress and scale. Retargeting
    /// to the target already being pursued (or rested on) changes nothing.
    /// Returns the generation of the sequence now in flight.
    pub fn retarget(
        &mut self,
        target: f64,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) -> Generation {
        let target = if target.is_nan() { 0.0 } else { target.clamp(0.0, 1.0) };
        if self.phase != MotionPhase::Hidden
            && self
                .target
                .is_some_and(|t| (t - target).abs() <= TARGET_EPSILON)
        {
            return self.generation;
        }

        self.advance(now, tracer);
        self.supersede(now, scheduler, tracer);

        tracer.retarget(&RetargetEvent {
            at: now,
            generation: self.generation,
            from: self.state.progress,
            to: target,
        });

        self.target = Some(target);
        self.state.pending_target = Some(target);
        self.state.visible = true;

        if self.config.anticipation.ticks() == 0 {
            self.begin_travel(now, scheduler, tracer);
            return self.generation;
        }

        let travel_at = now.saturating_add(self.config.anticipation);
        self.scale_tween = Some(Tween::new(
            self.state.scale,
            self.config.anticipation_scale,
            now,
            self.config.anticipation,
            Easing::EaseOut,
        ));
        self.phase = MotionPhase::Anticipation { travel_at };
        self.emit_phase(tracer, now, PhaseKind::Anticipation);
        scheduler.set_timer(travel_at, self.generation);
        scheduler.request_frame(self.generation);
        self.generation
    }

    /// Handles the anticipation timer. Returns `false` if the callback was
    /// stale and ignored.
    pub fn on_timer(
        &mut self,
        generation: Generation,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if generation != self.generation
            || !matches!(self.phase, MotionPhase::Anticipation { .. })
        {
            return false;
        }
        self.advance(now, tracer);
        self.begin_travel(now, scheduler, tracer);
        true
    }

    /// Handles a frame callback: advances the state to `now` and requests the
    /// next frame while animating. Returns `false` if the callback was stale.
    pub fn on_frame(
        &mut self,
        generation: Generation,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.advance(now, tracer);
        if self.is_animating(now) {
            scheduler.request_frame(self.generation);
        }
        true
    }

    /// Hides the marker and cancels any sequence in flight.
    ///
    /// Progress is kept, so the next retarget departs from where the marker
    /// was last shown.
    pub fn hide(
        &mut self,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) {
        if self.phase == MotionPhase::Hidden {
            return;
        }
        self.advance(now, tracer);
        self.supersede(now, scheduler, tracer);
        self.phase = MotionPhase::Hidden;
        self.target = None;
        self.state.pending_target = None;
        self.state.visible = false;
        self.state.scale = 1.0;
    }

    /// Releases the timer and frame loop. Callbacks still in the host's
    /// queue are ignored afterward.
    pub fn shutdown(&mut self, scheduler: &mut impl FrameScheduler) {
        scheduler.clear_timer();
        scheduler.cancel_frame();
        self.generation = self.generation.next();
        self.phase = MotionPhase::Hidden;
        self.target = None;
        self.progress_tween = None;
        self.scale_tween = None;
        self.settle_tween = None;
        self.state.pending_target = None;
        self.state.visible = false;
    }

    /// Cancels outstanding work and opens a new generation.
    fn supersede(
        &mut self,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) {
        if self.phase.is_in_flight() {
            tracer.cancel(&CancelEvent {
                at: now,
                superseded: self.generation,
            });
        }
        scheduler.clear_timer();
        scheduler.cancel_frame();
        self.generation = self.generation.next();
        self.progress_tween = None;
        self.scale_tween = None;
        self.settle_tween = None;
    }

    fn begin_travel(
        &mut self,
        now: HostTime,
        scheduler: &mut impl FrameScheduler,
        tracer: &mut Tracer<'_>,
    ) {
        let from = self.state.progress;
        let to = self.state.pending_target.unwrap_or(from);
        let duration = self.config.travel_duration(to - from);
        self.progress_tween = Some(Tween::new(
            from,
            to,
            now,
            duration,
            self.config.travel_easing,
        ));
        self.scale_tween = Some(Tween::new(
            self.state.scale,
            1.0,
            now,
            duration.mul_f64(self.config.recover_fraction),
            Easing::EaseOut,
        ));
        self.phase = MotionPhase::Travel;
        self.emit_phase(tracer, now, PhaseKind::Travel);
        tracer.travel(&TravelEvent {
            at: now,
            generation: self.generation,
            from,
            to,
            duration,
        });
        scheduler.request_frame(self.generation);
    }

    /// Moves the state forward to `now`, crossing phase boundaries that lie
    /// before it.
    fn advance(&mut self, now: HostTime, tracer: &mut Tracer<'_>) {
        loop {
            match self.phase {
                MotionPhase::Anticipation { .. } => {
                    if let Some(t) = self.scale_tween {
                        self.state.scale = t.sample(now);
                    }
                    return;
                }
                MotionPhase::Travel => {
                    let Some(travel) = self.progress_tween else {
                        self.arrive(now, tracer);
                        continue;
                    };
                    if let Some(t) = self.scale_tween {
                        self.state.scale = t.sample(now);
                    }
                    self.state.progress = travel.sample(now);
                    if !travel.is_finished(now) {
                        return;
                    }
                    self.arrive(travel.end(), tracer);
                }
                MotionPhase::Arrival => {
                    let Some(pulse) = self.scale_tween else {
                        self.settle(now, tracer);
                        return;
                    };
                    self.state.scale = pulse.sample(now);
                    if !pulse.is_finished(now) {
                        return;
                    }
                    match self.settle_tween.take() {
                        Some(next) => self.scale_tween = Some(next),
                        None => {
                            self.settle(pulse.end(), tracer);
                            return;
                        }
                    }
                }
                MotionPhase::Idle | MotionPhase::Hidden => return,
            }
        }
    }

    fn arrive(&mut self, at: HostTime, tracer: &mut Tracer<'_>) {
        if let Some(target) = self.state.pending_target.take() {
            self.state.progress = target;
        }
        self.progress_tween = None;
        if !self.config.has_pulse() {
            self.settle(at, tracer);
            return;
        }
        self.scale_tween = Some(Tween::new(
            self.state.scale,
            self.config.pulse_scale,
            at,
            self.config.pulse_rise,
            Easing::EaseOut,
        ));
        self.settle_tween = Some(Tween::new(
            self.config.pulse_scale,
            1.0,
            at.saturating_add(self.config.pulse_rise),
            self.config.pulse_settle,
            self.config.settle_easing,
        ));
        self.phase = MotionPhase::Arrival;
        self.emit_phase(tracer, at, PhaseKind::Arrival);
    }

    fn settle(&mut self, at: HostTime, tracer: &mut Tracer<'_>) {
        self.scale_tween = None;
        self.settle_tween = None;
        self.state.scale = 1.0;
        self.phase = MotionPhase::Idle;
        self.emit_phase(tracer, at, PhaseKind::Settled);
    }

    fn emit_phase(&self, tracer: &mut Tracer<'_>, at: HostTime, phase: PhaseKind) {
        tracer.phase(&PhaseEvent {
            at,
            generation: self.generation,
            phase,
            progress: self.state.progress,
            scale: self.state.scale,
        });
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}
