// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing curves.
//!
//! [`CubicBezier`] follows the CSS `cubic-bezier()` definition: the curve runs
//! from `(0, 0)` to `(1, 1)` with two free control points, x is elapsed time
//! and y is output progress. Control-point y values outside `[0, 1]` produce
//! overshoot, which the arrival settle relies on.

/// A CSS-style cubic Bézier timing function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    /// First control point x (must be in `[0, 1]`).
    pub x1: f64,
    /// First control point y.
    pub y1: f64,
    /// Second control point x (must be in `[0, 1]`).
    pub x2: f64,
    /// Second control point y.
    pub y2: f64,
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_EPSILON: f64 = 1e-7;
const BISECTION_ITERATIONS: usize = 40;

impl CubicBezier {
    /// Creates a timing curve from its two control points.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Evaluates the curve's output for an input time `x` in `[0, 1]`.
    ///
    /// Inputs outside the unit interval are clamped.
    #[must_use]
    pub fn solve(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.parameter_for_x(x);
        bezier_coord(self.y1, self.y2, t)
    }

    fn parameter_for_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = bezier_coord(self.x1, self.x2, t) - x;
            if err.abs() < NEWTON_EPSILON {
                return t;
            }
            let slope = bezier_slope(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        // x(t) is monotonic for x1, x2 in [0, 1], so bisection always converges.
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = bezier_coord(self.x1, self.x2, t);
            if (value - x).abs() < NEWTON_EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        t
    }
}

/// One coordinate of a unit cubic Bézier with endpoints 0 and 1.
fn bezier_coord(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * t + b) * t + c) * t
}

fn bezier_slope(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * t + 2.0 * b) * t + c
}

/// A timing curve used by [`Tween`](crate::tween::Tween).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Decelerating curve, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// Arbitrary cubic Bézier curve.
    CubicBezier(CubicBezier),
}

impl Easing {
    /// Fast start with a long, soft landing. Used for positional travel.
    pub const SNAPPY: Self = Self::CubicBezier(CubicBezier::new(0.22, 1.0, 0.36, 1.0));

    /// Overshoots past the end and settles back. Used for the arrival pulse.
    pub const BOUNCY: Self = Self::CubicBezier(CubicBezier::new(0.34, 1.56, 0.64, 1.0));

    const EASE_OUT_CURVE: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);

    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear if t.is_nan() => 0.0,
            Self::Linear => t.clamp(0.0, 1.0),
            Self::EaseOut => Self::EASE_OUT_CURVE.solve(t),
            Self::CubicBezier(curve) => curve.solve(t),
        }
    }
}
