// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use switchback_core::schedule::Generation;

/// Changes smaller than this do not count as a direction.
const NOISE: f64 = 1e-9;

/// Aggregated report returned by [`SmoothnessTracker::observe`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothnessReport {
    /// Progress change since the previous frame.
    pub delta: f64,
    /// Largest absolute per-frame change seen.
    pub max_step: f64,
    /// Direction changes within a single sequence.
    pub reversals: u64,
    /// Frames whose change exceeded the jump threshold.
    pub jumps: u64,
    /// Total frames observed.
    pub total_frames: u64,
}

/// Rolling tracker of per-frame marker progress.
///
/// A *reversal* is a change of direction while the generation stays the same:
/// a travel that wobbles back. Reversals across a retarget are expected and
/// not counted. A *jump* is a per-frame change larger than the threshold the
/// tracker was created with.
#[derive(Debug)]
pub struct SmoothnessTracker<const N: usize> {
    deltas: [f64; N],
    cursor: usize,
    jump_threshold: f64,
    last: Option<(Generation, f64)>,
    direction: f64,
    max_step: f64,
    reversals: u64,
    jumps: u64,
    total_frames: u64,
}

impl<const N: usize> Default for SmoothnessTracker<N> {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl<const N: usize> SmoothnessTracker<N> {
    /// Creates a tracker counting changes above `jump_threshold` as jumps.
    #[must_use]
    pub const fn new(jump_threshold: f64) -> Self {
        Self {
            deltas: [0.0; N],
            cursor: 0,
            jump_threshold,
            last: None,
            direction: 0.0,
            max_step: 0.0,
            reversals: 0,
            jumps: 0,
            total_frames: 0,
        }
    }

    /// Observes the progress shown in one frame.
    pub fn observe(&mut self, generation: Generation, progress: f64) -> SmoothnessReport {
        self.total_frames = self.total_frames.saturating_add(1);
        let delta = match self.last {
            Some((g, previous)) => {
                let delta = progress - previous;
                if g != generation {
                    self.direction = 0.0;
                }
                if delta.abs() > NOISE {
                    if self.direction != 0.0 && delta.signum() != self.direction {
                        self.reversals += 1;
                    }
                    self.direction = delta.signum();
                }
                delta
            }
            None => 0.0,
        };
        self.last = Some((generation, progress));

        if N > 0 {
            self.deltas[self.cursor % N] = delta;
            self.cursor = (self.cursor + 1) % N;
        }
        self.max_step = self.max_step.max(delta.abs());
        if delta.abs() > self.jump_threshold {
            self.jumps += 1;
        }

        self.report(delta)
    }

    /// Forgets the previous frame, e.g. after the trail was hidden.
    pub fn reset_baseline(&mut self) {
        self.last = None;
        self.direction = 0.0;
    }

    fn report(&self, delta: f64) -> SmoothnessReport {
        SmoothnessReport {
            delta,
            max_step: self.max_step,
            reversals: self.reversals,
            jumps: self.jumps,
            total_frames: self.total_frames,
        }
    }

    /// Returns ring-buffer deltas oldest→newest.
    #[must_use]
    pub fn deltas(&self) -> [f64; N] {
        let mut out = [0.0; N];
        let mut i = 0;
        while i < N {
            out[i] = self.deltas[(self.cursor + i) % N];
            i += 1;
        }
        out
    }

    /// Returns an ASCII sparkline of absolute deltas up to `max_step`.
    #[must_use]
    pub fn sparkline_ascii(&self, max_step: f64) -> String {
        const LEVELS: &[u8] = b" .:-=+*#%@";
        let mut out = String::with_capacity(N);
        for delta in self.deltas() {
            let t = if max_step > 0.0 {
                (delta.abs() / max_step).clamp(0.0, 1.0)
            } else {
                0.0
            };
            #[expect(
                clippy::cast_possible_truncation,
                reason = "index is clamped to ASCII level count"
            )]
            let level = (t * (LEVELS.len() as f64 - 1.0) + 0.5) as usize;
            out.push(LEVELS[level] as char);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_travel_has_no_reversals() {
        let mut t = SmoothnessTracker::<8>::new(0.25);
        for i in 0..10 {
            t.observe(Generation(1), f64::from(i) * 0.1);
        }
        let r = t.observe(Generation(1), 1.0);
        assert_eq!(r.reversals, 0);
        assert_eq!(r.jumps, 0);
        assert!((r.max_step - 0.1).abs() < 1e-9, "max step {}", r.max_step);
    }

    #[test]
    fn wobble_counts_but_retarget_does_not() {
        let mut t = SmoothnessTracker::<4>::new(0.25);
        t.observe(Generation(1), 0.0);
        t.observe(Generation(1), 0.2);
        let r = t.observe(Generation(1), 0.1);
        assert_eq!(r.reversals, 1, "same generation turned back");
        t.observe(Generation(2), 0.3);
        let r = t.observe(Generation(3), 0.2);
        assert_eq!(r.reversals, 1, "new generations may change direction");
    }

    #[test]
    fn large_steps_are_jumps() {
        let mut t = SmoothnessTracker::<4>::default();
        t.observe(Generation(1), 0.0);
        let r = t.observe(Generation(1), 0.9);
        assert_eq!(r.jumps, 1);
        t.reset_baseline();
        let r = t.observe(Generation(1), 0.0);
        assert_eq!(r.jumps, 1, "no delta across a reset");
    }

    #[test]
    fn sparkline_has_one_char_per_slot() {
        let mut t = SmoothnessTracker::<6>::default();
        t.observe(Generation(1), 0.0);
        t.observe(Generation(1), 0.1);
        let line = t.sparkline_ascii(0.1);
        assert_eq!(line.len(), 6);
        assert!(line.ends_with('@'), "largest step is last: {line:?}");
    }
}
