// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement and path-geometry queries supplied by the host.
//!
//! The trail never reads a render tree directly. Everything it needs from the
//! host goes through [`GeometryProvider`]:
//!
//! - [`measure`](GeometryProvider::measure): the current bounding box of a
//!   section's row, relative to the trail's container.
//! - [`path_length`](GeometryProvider::path_length) and
//!   [`point_at_length`](GeometryProvider::point_at_length): arc-length
//!   queries over the path *as drawn*.
//!
//! The path queries default to an analytic `kurbo` computation
//! ([`analytic_length`], [`analytic_point_at_length`]), so test doubles only
//! implement `measure`. Hosts that draw through a surface with its own
//! geometry (an SVG `<path>`) override them so the marker lands exactly on the
//! rendered stroke.

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathEl, Point, Rect};

/// Accuracy passed to `kurbo` arc-length routines. Exact for line segments.
pub const ARCLEN_ACCURACY: f64 = 1e-6;

/// Host-side geometry queries.
pub trait GeometryProvider {
    /// Returns the bounding box of the row for section `id`, in the trail
    /// container's coordinate space, or `None` if it cannot be measured right
    /// now (not mounted, display: none, ...).
    fn measure(&self, id: &str) -> Option<Rect>;

    /// Total length of `path` as drawn.
    fn path_length(&self, path: &BezPath) -> f64 {
        analytic_length(path)
    }

    /// Point at distance `length` along `path` as drawn.
    ///
    /// `length` is clamped to the path. A path without segments yields its
    /// starting point.
    fn point_at_length(&self, path: &BezPath, length: f64) -> Point {
        analytic_point_at_length(path, length)
    }
}

impl<G: GeometryProvider + ?Sized> GeometryProvider for &G {
    fn measure(&self, id: &str) -> Option<Rect> {
        (**self).measure(id)
    }

    fn path_length(&self, path: &BezPath) -> f64 {
        (**self).path_length(path)
    }

    fn point_at_length(&self, path: &BezPath, length: f64) -> Point {
        (**self).point_at_length(path, length)
    }
}

/// Sum of the arc lengths of every segment of `path`.
#[must_use]
pub fn analytic_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(ARCLEN_ACCURACY)).sum()
}

/// Point at distance `length` along `path`, by walking its segments.
#[must_use]
pub fn analytic_point_at_length(path: &BezPath, length: f64) -> Point {
    let mut remaining = if length.is_nan() { 0.0 } else { length.max(0.0) };
    let mut last = start_point(path);
    for seg in path.segments() {
        let seg_len = seg.arclen(ARCLEN_ACCURACY);
        if remaining <= seg_len {
            if seg_len <= 0.0 {
                return seg.start();
            }
            let t = seg.inv_arclen(remaining, ARCLEN_ACCURACY);
            return seg.eval(t);
        }
        remaining -= seg_len;
        last = seg.end();
    }
    last
}

/// The first point of `path`, or the origin for an empty path.
#[must_use]
pub fn start_point(path: &BezPath) -> Point {
    match path.elements().first() {
        Some(PathEl::MoveTo(p)) => *p,
        _ => Point::ORIGIN,
    }
}
