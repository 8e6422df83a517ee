// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypoint sampling.
//!
//! Turns flat items into on-screen anchors. The vertical anchor is the centre
//! of the measured row; the horizontal anchor is the item's depth column from
//! [`LayoutConfig`], so the trail follows indentation rather than label
//! widths. Items that cannot be measured are skipped for this cycle.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::config::LayoutConfig;
use crate::error::Degradation;
use crate::geometry::GeometryProvider;
use crate::section::FlatItem;

/// The on-screen anchor of one flat item at path-build time.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    /// Section id.
    pub id: String,
    /// Index of the item in the flat list it was sampled from.
    pub index: usize,
    /// Nesting depth of the item.
    pub depth: usize,
    /// Anchor position in container coordinates.
    pub position: Point,
}

impl Waypoint {
    /// Creates a waypoint.
    #[must_use]
    pub fn new(id: impl Into<String>, index: usize, depth: usize, position: Point) -> Self {
        Self {
            id: id.into(),
            index,
            depth,
            position,
        }
    }
}

/// Result of one sampling pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampledWaypoints {
    /// Waypoints of the measurable items, in flat order.
    pub waypoints: Vec<Waypoint>,
    /// Ids of the items that could not be measured.
    pub skipped: Vec<String>,
}

impl SampledWaypoints {
    /// Per-item degradations for the skipped items.
    pub fn degradations(&self) -> impl Iterator<Item = Degradation> + '_ {
        self.skipped
            .iter()
            .map(|id| Degradation::MeasurementUnavailable { id: id.clone() })
    }

    /// Index into [`waypoints`](Self::waypoints) that best represents the
    /// flat item at `flat_index`: the item itself if it was measured,
    /// otherwise the nearest measured item before it.
    #[must_use]
    pub fn resolve(&self, flat_index: usize) -> Option<usize> {
        // Waypoints are sorted by flat index.
        match self
            .waypoints
            .binary_search_by_key(&flat_index, |w| w.index)
        {
            Ok(i) => Some(i),
            Err(0) => None,
            Err(i) => Some(i - 1),
        }
    }
}

/// Measures every item and builds its waypoint.
#[must_use]
pub fn sample_waypoints(
    items: &[FlatItem],
    layout: &LayoutConfig,
    geometry: &impl GeometryProvider,
) -> SampledWaypoints {
    let mut out = SampledWaypoints::default();
    for (index, item) in items.iter().enumerate() {
        match geometry.measure(&item.id) {
            Some(rect) => out.waypoints.push(Waypoint {
                id: item.id.clone(),
                index,
                depth: item.depth,
                position: Point::new(layout.column_x(item.depth), rect.center().y),
            }),
            None => out.skipped.push(item.id.clone()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{SectionNode, flatten};
    use alloc::vec;
    use kurbo::Rect;

    struct Rows {
        missing: &'static [&'static str],
    }

    impl GeometryProvider for Rows {
        fn measure(&self, id: &str) -> Option<Rect> {
            if self.missing.contains(&id) {
                return None;
            }
            let row = match id {
                "a" => 0.0,
                "b" => 1.0,
                "c" => 2.0,
                "d" => 3.0,
                _ => return None,
            };
            Some(Rect::new(0.0, row * 32.0, 200.0, row * 32.0 + 24.0))
        }
    }

    fn items() -> Vec<FlatItem> {
        flatten(&[
            SectionNode::new("a", "A"),
            SectionNode::new("b", "B").with_children([SectionNode::new("c", "C")]),
            SectionNode::new("d", "D"),
        ])
    }

    #[test]
    fn anchors_use_depth_column_and_row_centre() {
        let sampled = sample_waypoints(&items(), &LayoutConfig::standard(), &Rows { missing: &[] });
        let positions: Vec<Point> = sampled.waypoints.iter().map(|w| w.position).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(12.0, 12.0),
                Point::new(12.0, 44.0),
                Point::new(40.0, 76.0),
                Point::new(12.0, 108.0),
            ]
        );
        assert!(sampled.skipped.is_empty());
    }

    #[test]
    fn unmeasurable_items_are_skipped() {
        let sampled = sample_waypoints(
            &items(),
            &LayoutConfig::standard(),
            &Rows { missing: &["b", "c"] },
        );
        let ids: Vec<&str> = sampled.waypoints.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(sampled.skipped, vec![String::from("b"), String::from("c")]);
        assert_eq!(sampled.waypoints[1].index, 3, "flat index survives skipping");
        assert_eq!(sampled.degradations().count(), 2);
    }

    #[test]
    fn resolve_falls_back_to_previous_measured_item() {
        let sampled = sample_waypoints(
            &items(),
            &LayoutConfig::standard(),
            &Rows { missing: &["a", "c"] },
        );
        assert_eq!(sampled.resolve(1), Some(0), "b measured");
        assert_eq!(sampled.resolve(2), Some(0), "c falls back to b");
        assert_eq!(sampled.resolve(3), Some(1));
        assert_eq!(sampled.resolve(0), None, "nothing precedes a");
    }
}
