// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path synthesis through the waypoints.
//!
//! The trail is one polyline visiting every waypoint in flat order. Between
//! two waypoints in different depth columns that are moving down the page, the
//! horizontal step is taken as a diagonal of length
//! `min(|Δx|, Δy × diagonal_ratio)` on the vertical axis, and the rest of the
//! drop is a vertical run:
//!
//! ```text
//!   depth increases            depth decreases
//!
//!   A                                  A
//!    \                                 │
//!     \                                │
//!      │                              /
//!      │                             /
//!      B                            B
//! ```
//!
//! Going deeper, the diagonal comes first; coming back out, it comes last.
//! Vertical runs no longer than [`PathConfig::min_run`] are folded into the
//! diagonal. Moves that are not downward, or whose horizontal offset is within
//! [`PathConfig::epsilon`], are a single straight segment.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use kurbo::{BezPath, Point};

use crate::config::PathConfig;
use crate::sampler::Waypoint;

/// A synthesized trail path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailPath {
    /// Polyline vertices, starting at the first waypoint.
    pub vertices: Vec<Point>,
    /// For each waypoint, the index of its vertex in
    /// [`vertices`](Self::vertices).
    pub waypoint_vertices: Vec<usize>,
}

impl TrailPath {
    /// Builds the path through `waypoints` in order.
    #[must_use]
    pub fn from_waypoints(waypoints: &[Waypoint], config: &PathConfig) -> Self {
        synthesize(waypoints.iter().map(|w| w.position), config)
    }

    /// Returns `true` if the path has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of waypoints the path visits.
    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.waypoint_vertices.len()
    }

    /// Position of waypoint `i`.
    #[must_use]
    pub fn waypoint(&self, i: usize) -> Option<Point> {
        self.waypoint_vertices
            .get(i)
            .and_then(|&v| self.vertices.get(v))
            .copied()
    }

    /// Positions of all waypoints, in order.
    pub fn waypoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.waypoint_vertices.iter().map(|&v| self.vertices[v])
    }

    /// The path as a `kurbo` polyline. A single waypoint yields a lone
    /// `MoveTo`.
    #[must_use]
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.vertices.iter();
        if let Some(&first) = iter.next() {
            path.move_to(first);
            for &p in iter {
                path.line_to(p);
            }
        }
        path
    }

    /// SVG path data (`"M x y L x y …"`). Empty for an empty path.
    #[must_use]
    pub fn svg_path_data(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        _ = self.write_svg(&mut out);
        out
    }

    /// Writes SVG path data to `w`.
    pub fn write_svg(&self, w: &mut impl fmt::Write) -> fmt::Result {
        for (i, p) in self.vertices.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                w.write_char(' ')?;
            }
            write!(w, "{cmd} {} {}", p.x, p.y)?;
        }
        Ok(())
    }
}

/// Builds a path through `points` in order.
#[must_use]
pub fn synthesize(points: impl IntoIterator<Item = Point>, config: &PathConfig) -> TrailPath {
    let mut path = TrailPath::default();
    let mut points = points.into_iter();
    let Some(mut cursor) = points.next() else {
        return path;
    };
    path.vertices.push(cursor);
    path.waypoint_vertices.push(0);

    for target in points {
        let dx = target.x - cursor.x;
        let dy = target.y - cursor.y;
        // Vertical runs too short to draw are folded into the diagonal.
        if let Some(diag) = diagonal_span(dx, dy, config) {
            if dx > 0.0 {
                let corner = Point::new(target.x, cursor.y + diag);
                if target.y > corner.y + config.min_run {
                    path.vertices.push(corner);
                }
            } else {
                let corner = Point::new(cursor.x, target.y - diag);
                if corner.y > cursor.y + config.min_run {
                    path.vertices.push(corner);
                }
            }
        }
        path.vertices.push(target);
        let last = path.vertices.len() - 1;
        path.waypoint_vertices.push(last);
        cursor = target;
    }
    path
}

/// Vertical extent of the diagonal between two consecutive waypoints, or
/// `None` if the move is a single straight segment.
#[must_use]
pub fn diagonal_span(dx: f64, dy: f64, config: &PathConfig) -> Option<f64> {
    if dx.abs() > config.epsilon && dy > 0.0 {
        Some(dx.abs().min(dy * config.diagonal_ratio))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::analytic_length;
    use alloc::vec;

    fn cfg() -> PathConfig {
        PathConfig::standard()
    }

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn empty_and_single() {
        assert!(synthesize(Vec::new(), &cfg()).is_empty());

        let single = synthesize(pts(&[(12.0, 8.0)]), &cfg());
        assert_eq!(single.vertices, pts(&[(12.0, 8.0)]));
        assert_eq!(single.waypoint_vertices, vec![0]);
        assert_eq!(analytic_length(&single.to_bez_path()), 0.0, "a point has no length");
        assert_eq!(single.svg_path_data(), "M 12 8");
    }

    #[test]
    fn deeper_item_gets_a_diagonal() {
        // A > [B, C > [D]]: depth increases from C to D.
        let path = synthesize(
            pts(&[(10.0, 0.0), (10.0, 40.0), (10.0, 80.0), (38.0, 120.0)]),
            &cfg(),
        );
        // diag = min(28, 40 * 0.5) = 20: diagonal to (38, 100), then down.
        assert_eq!(
            path.vertices,
            pts(&[(10.0, 0.0), (10.0, 40.0), (10.0, 80.0), (38.0, 100.0), (38.0, 120.0)])
        );
        assert_eq!(path.waypoint_vertices, vec![0, 1, 2, 4]);
        let c_to_d = (path.vertices[2], path.vertices[3]);
        assert!(
            c_to_d.0.x != c_to_d.1.x && c_to_d.0.y != c_to_d.1.y,
            "segment leaving C must be diagonal, got {c_to_d:?}"
        );
    }

    #[test]
    fn shallower_item_runs_then_diagonals() {
        let path = synthesize(pts(&[(38.0, 0.0), (10.0, 100.0)]), &cfg());
        // diag = min(28, 50) = 28: vertical to y = 72, then diagonal.
        assert_eq!(
            path.vertices,
            pts(&[(38.0, 0.0), (38.0, 72.0), (10.0, 100.0)])
        );
        assert_eq!(path.waypoint_vertices, vec![0, 2]);
    }

    #[test]
    fn short_runs_fold_into_the_diagonal() {
        // dy = 2, diag = 1, remaining run = 1 which is not above min_run.
        let path = synthesize(pts(&[(10.0, 0.0), (38.0, 2.0)]), &cfg());
        assert_eq!(path.vertices, pts(&[(10.0, 0.0), (38.0, 2.0)]));
        assert_eq!(path.waypoint_vertices, vec![0, 1]);

        let back = synthesize(pts(&[(38.0, 0.0), (10.0, 2.0)]), &cfg());
        assert_eq!(back.vertices, pts(&[(38.0, 0.0), (10.0, 2.0)]));
    }

    #[test]
    fn straight_moves() {
        let path = synthesize(
            pts(&[(10.0, 0.0), (10.3, 30.0), (40.0, 30.0), (12.0, 10.0)]),
            &cfg(),
        );
        assert_eq!(path.vertices.len(), 4, "within epsilon, level and upward moves are direct");
    }

    #[test]
    fn svg_data_lists_every_vertex() {
        let path = synthesize(pts(&[(12.0, 12.0), (40.0, 44.5)]), &cfg());
        assert_eq!(path.svg_path_data(), "M 12 12 L 40 28.25 L 40 44.5");
    }

    #[test]
    fn full_diagonals_are_45_degrees() {
        // diag = min(28, 28) = 28 = |dx|.
        let path = synthesize(pts(&[(12.0, 0.0), (40.0, 56.0)]), &cfg());
        assert_eq!(path.vertices, pts(&[(12.0, 0.0), (40.0, 28.0), (40.0, 56.0)]));
        let drawn = analytic_length(&path.to_bez_path());
        let closed_form = (56.0 - 28.0) + core::f64::consts::SQRT_2 * 28.0;
        assert!((drawn - closed_form).abs() < 1e-9);
    }

    #[test]
    fn waypoint_accessors() {
        let path = synthesize(pts(&[(10.0, 0.0), (38.0, 120.0)]), &cfg());
        assert_eq!(path.waypoint_count(), 2);
        assert_eq!(path.waypoint(1), Some(Point::new(38.0, 120.0)));
        assert_eq!(path.waypoint(2), None);
        assert_eq!(path.waypoints().count(), 2);
    }
}
