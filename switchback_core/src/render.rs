// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame building: dash reveal, marker placement and item rows.
//!
//! [`TrailRenderer`] turns the current path, length table and motion state
//! into a [`TrailFrame`], a plain description of what to draw. It does no
//! drawing itself; a [`Presenter`](crate::backend::Presenter) applies frames
//! to a real surface.
//!
//! The stroke is revealed with the dash trick: a single dash as long as the
//! path, offset by the unrevealed length. The marker sits at the point
//! [`GeometryProvider::point_at_length`] reports for the revealed length, so
//! it follows the drawn geometry rather than an interpolation between
//! waypoints.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Vec2};

use crate::arclen::LengthTable;
use crate::config::{LayoutConfig, MarkerConfig};
use crate::geometry::{GeometryProvider, start_point};
use crate::motion::MotionState;
use crate::path::TrailPath;
use crate::section::FlatItem;

/// One rendered label row.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemRow {
    /// Section id, passed to the click handler.
    pub id: String,
    /// Label text.
    pub label: String,
    /// Nesting depth.
    pub depth: usize,
    /// Left padding of the label.
    pub padding_left: f64,
    /// Whether this is the active section.
    pub active: bool,
}

/// Everything a presenter needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailFrame {
    /// Whether the trail and marker are shown. Rows are shown regardless.
    pub visible: bool,
    /// The trail path.
    pub path: BezPath,
    /// SVG path data of [`path`](Self::path).
    pub svg: String,
    /// Drawn length of the path.
    pub total_length: f64,
    /// Stroke dash length: the total length, or 1 for a zero-length path.
    pub dash_array: f64,
    /// Stroke dash offset: the unrevealed part of the dash.
    pub dash_offset: f64,
    /// Length of the path that is revealed.
    pub revealed_length: f64,
    /// Marker centre.
    pub marker: Point,
    /// Marker scale.
    pub marker_scale: f64,
    /// Marker polygon, already scaled and positioned.
    pub marker_outline: [Point; 6],
    /// Label rows in flat order.
    pub rows: Vec<ItemRow>,
}

impl TrailFrame {
    /// A frame with rows only.
    #[must_use]
    pub fn hidden(rows: Vec<ItemRow>) -> Self {
        Self {
            visible: false,
            path: BezPath::new(),
            svg: String::new(),
            total_length: 0.0,
            dash_array: 1.0,
            dash_offset: 1.0,
            revealed_length: 0.0,
            marker: Point::ORIGIN,
            marker_scale: 1.0,
            marker_outline: [Point::ORIGIN; 6],
            rows,
        }
    }

    /// The marker outline as an SVG `points` attribute.
    #[must_use]
    pub fn marker_points(&self) -> String {
        use core::fmt::Write as _;
        let mut out = String::new();
        for (i, p) in self.marker_outline.iter().enumerate() {
            let sep = if i == 0 { "" } else { " " };
            // Writing to a String cannot fail.
            _ = write!(out, "{sep}{},{}", p.x, p.y);
        }
        out
    }
}

/// Inputs of one frame.
#[derive(Clone, Copy, Debug)]
pub struct TrailScene<'a> {
    /// Flat items, in order.
    pub items: &'a [FlatItem],
    /// Flat index of the active item.
    pub active: Option<usize>,
    /// Synthesized path.
    pub path: &'a TrailPath,
    /// Drawn form of [`path`](Self::path).
    pub drawn: &'a BezPath,
    /// Lengths of [`drawn`](Self::drawn).
    pub lengths: &'a LengthTable,
    /// Live marker state.
    pub motion: MotionState,
}

/// Builds [`TrailFrame`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrailRenderer {
    layout: LayoutConfig,
    marker: MarkerConfig,
}

impl TrailRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new(layout: LayoutConfig, marker: MarkerConfig) -> Self {
        Self { layout, marker }
    }

    /// Label rows for `items`.
    #[must_use]
    pub fn rows(&self, items: &[FlatItem], active: Option<usize>) -> Vec<ItemRow> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| ItemRow {
                id: item.id.clone(),
                label: item.label.clone(),
                depth: item.depth,
                padding_left: self.layout.label_padding(item.depth),
                active: active == Some(i),
            })
            .collect()
    }

    /// Builds the frame for `scene`.
    #[must_use]
    pub fn render(&self, scene: &TrailScene<'_>, geometry: &impl GeometryProvider) -> TrailFrame {
        let rows = self.rows(scene.items, scene.active);
        if !scene.motion.visible || scene.path.is_empty() {
            return TrailFrame::hidden(rows);
        }

        let total_length = scene.lengths.total_length;
        let (dash_array, revealed_length, marker) = if scene.lengths.is_degenerate() {
            (1.0, 0.0, start_point(scene.drawn))
        } else {
            let revealed = scene.lengths.length_at(scene.motion.progress);
            (
                total_length,
                revealed,
                geometry.point_at_length(scene.drawn, revealed),
            )
        };
        let marker_scale = scene.motion.scale;

        TrailFrame {
            visible: true,
            path: scene.drawn.clone(),
            svg: scene.path.svg_path_data(),
            total_length,
            dash_array,
            dash_offset: dash_array - revealed_length,
            revealed_length,
            marker,
            marker_scale,
            marker_outline: marker_outline(marker, self.marker.radius, marker_scale),
            rows,
        }
    }
}

/// Pointy-top hexagon around `center` with circumradius `radius × scale`,
/// clockwise from the top vertex in y-down coordinates.
#[must_use]
pub fn marker_outline(center: Point, radius: f64, scale: f64) -> [Point; 6] {
    const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;
    const UNIT: [(f64, f64); 6] = [
        (0.0, -1.0),
        (HALF_SQRT_3, -0.5),
        (HALF_SQRT_3, 0.5),
        (0.0, 1.0),
        (-HALF_SQRT_3, 0.5),
        (-HALF_SQRT_3, -0.5),
    ];
    let r = radius * scale;
    UNIT.map(|(x, y)| center + Vec2::new(x, y) * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathConfig;
    use crate::path::synthesize;
    use kurbo::Rect;

    struct Analytic;

    impl GeometryProvider for Analytic {
        fn measure(&self, _: &str) -> Option<Rect> {
            None
        }
    }

    fn items() -> Vec<FlatItem> {
        ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(depth, id)| FlatItem {
                id: (*id).into(),
                label: id.to_uppercase(),
                depth,
            })
            .collect()
    }

    fn visible(progress: f64) -> MotionState {
        MotionState {
            progress,
            scale: 1.0,
            pending_target: None,
            visible: true,
        }
    }

    #[test]
    fn reveal_follows_progress() {
        let path = synthesize(
            [Point::new(12.0, 0.0), Point::new(12.0, 100.0)],
            &PathConfig::standard(),
        );
        let drawn = path.to_bez_path();
        let lengths = LengthTable::measure(&path, &drawn, &Analytic);
        let items = items();
        let scene = TrailScene {
            items: &items[..2],
            active: Some(1),
            path: &path,
            drawn: &drawn,
            lengths: &lengths,
            motion: visible(0.25),
        };
        let frame = TrailRenderer::default().render(&scene, &Analytic);
        assert!(frame.visible);
        assert_eq!(frame.dash_array, 100.0);
        assert!((frame.revealed_length - 25.0).abs() < 1e-9);
        assert!((frame.dash_offset - 75.0).abs() < 1e-9);
        assert!(frame.marker.distance(Point::new(12.0, 25.0)) < 1e-6, "{:?}", frame.marker);
        assert_eq!(frame.svg, "M 12 0 L 12 100");
        assert!(frame.rows[1].active && !frame.rows[0].active);
    }

    #[test]
    fn degenerate_path_reveals_nothing() {
        let path = synthesize([Point::new(12.0, 12.0)], &PathConfig::standard());
        let drawn = path.to_bez_path();
        let lengths = LengthTable::measure(&path, &drawn, &Analytic);
        let items = items();
        let scene = TrailScene {
            items: &items[..1],
            active: Some(0),
            path: &path,
            drawn: &drawn,
            lengths: &lengths,
            motion: visible(1.0),
        };
        let frame = TrailRenderer::default().render(&scene, &Analytic);
        assert!(frame.visible);
        assert_eq!(frame.dash_array, 1.0, "no zero-length dash");
        assert_eq!(frame.revealed_length, 0.0);
        assert_eq!(frame.dash_offset, 1.0);
        assert_eq!(frame.marker, Point::new(12.0, 12.0), "marker sits on the point");
        assert!(frame.marker_outline.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn hidden_frames_keep_rows() {
        let items = items();
        let path = TrailPath::default();
        let drawn = BezPath::new();
        let lengths = LengthTable::default();
        let scene = TrailScene {
            items: &items,
            active: None,
            path: &path,
            drawn: &drawn,
            lengths: &lengths,
            motion: MotionState::default(),
        };
        let frame = TrailRenderer::default().render(&scene, &Analytic);
        assert!(!frame.visible);
        assert_eq!(frame.rows.len(), 3);
        let padding: Vec<f64> = frame.rows.iter().map(|r| r.padding_left).collect();
        assert_eq!(padding, [24.0, 52.0, 80.0]);
    }

    #[test]
    fn hexagon_is_scaled_around_centre() {
        let outline = marker_outline(Point::new(10.0, 10.0), 5.0, 1.0);
        assert_eq!(outline[0], Point::new(10.0, 5.0), "top vertex");
        assert_eq!(outline[3], Point::new(10.0, 15.0), "bottom vertex");
        let big = marker_outline(Point::new(10.0, 10.0), 5.0, 1.25);
        assert!((big[0].y - 3.75).abs() < 1e-12);
    }

    #[test]
    fn marker_points_attribute() {
        let mut frame = TrailFrame::hidden(Vec::new());
        frame.marker_outline = marker_outline(Point::ORIGIN, 2.0, 1.0);
        assert!(frame.marker_points().starts_with("0,-2 "));
        assert_eq!(frame.marker_points().split(' ').count(), 6);
    }
}
