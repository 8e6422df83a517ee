// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arc-length parametrization of the trail.
//!
//! Progress is a fraction of the path's *drawn* length. The total comes from
//! [`GeometryProvider::path_length`], i.e. from whatever surface draws the
//! path. Cumulative lengths at the waypoints are estimated along the
//! synthesized polyline and then scaled by `drawn / estimated`, so both
//! measurements share one axis and the last waypoint lands exactly on the end
//! of the drawn stroke even when the drawing surface rounds or transforms the
//! geometry.
//!
//! For a 45° diagonal (`|Δx| ≤ Δy × diagonal_ratio`) the polyline estimate of a
//! transition is the closed form `(Δy − d) + √2 · d`.

use alloc::vec::Vec;

use kurbo::BezPath;

use crate::geometry::GeometryProvider;
use crate::path::TrailPath;

/// Total length and cumulative length at each waypoint.
///
/// `waypoint_lengths` is non-decreasing, starts at 0 and ends at
/// `total_length`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LengthTable {
    /// Drawn length of the whole path.
    pub total_length: f64,
    /// Cumulative drawn length at each waypoint.
    pub waypoint_lengths: Vec<f64>,
}

impl LengthTable {
    /// Measures `path`, whose drawn form is `drawn`.
    #[must_use]
    pub fn measure(path: &TrailPath, drawn: &BezPath, geometry: &impl GeometryProvider) -> Self {
        let mut waypoint_lengths = Vec::with_capacity(path.waypoint_count());
        let mut estimate = 0.0;
        let mut next_waypoint = path.waypoint_vertices.iter().peekable();
        let mut prev = None;
        for (i, &vertex) in path.vertices.iter().enumerate() {
            if let Some(prev) = prev {
                estimate += vertex.distance(prev);
            }
            while next_waypoint.next_if(|&&w| w == i).is_some() {
                waypoint_lengths.push(estimate);
            }
            prev = Some(vertex);
        }

        let total_length = sanitize(geometry.path_length(drawn));
        let scale = total_length / if estimate > 0.0 { estimate } else { 1.0 };
        for length in &mut waypoint_lengths {
            *length *= scale;
        }
        // Pin the end so rounding in the scale cannot overshoot the path.
        if let Some(last) = waypoint_lengths.last_mut() {
            if estimate > 0.0 {
                *last = total_length;
            }
        }
        Self {
            total_length,
            waypoint_lengths,
        }
    }

    /// Returns `true` if the path has zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.total_length <= 0.0
    }

    /// Progress fraction of waypoint `i`.
    ///
    /// A zero-length path maps every waypoint to 0.
    #[must_use]
    pub fn progress_of(&self, i: usize) -> Option<f64> {
        let length = *self.waypoint_lengths.get(i)?;
        if self.is_degenerate() {
            return Some(0.0);
        }
        Some((length / self.total_length).clamp(0.0, 1.0))
    }

    /// Length along the path for a progress fraction, clamped to the path.
    #[must_use]
    pub fn length_at(&self, progress: f64) -> f64 {
        if progress.is_nan() {
            return 0.0;
        }
        progress.clamp(0.0, 1.0) * self.total_length
    }
}

fn sanitize(length: f64) -> f64 {
    if length.is_finite() && length > 0.0 {
        length
    } else {
        0.0
    }
}
