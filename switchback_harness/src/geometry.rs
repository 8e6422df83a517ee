// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Vec2};
use switchback_core::geometry::{GeometryProvider, analytic_length, analytic_point_at_length};

/// Geometry from a table of fixed row boxes.
///
/// Ids without a box are unmeasurable. A `length_scale` other than 1.0 makes
/// the drawn path report lengths off by that factor, the way an SVG path
/// inside a scaled viewBox does.
#[derive(Clone, Debug)]
pub struct StubGeometry {
    rows: BTreeMap<String, Rect>,
    length_scale: f64,
}

impl Default for StubGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl StubGeometry {
    /// Creates geometry with no rows.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            length_scale: 1.0,
        }
    }

    /// Stacks rows for `ids` top to bottom, `height` tall with `gap` between
    /// them, starting at y = 0.
    #[must_use]
    pub fn stacked_rows<'a>(ids: impl IntoIterator<Item = &'a str>, height: f64, gap: f64) -> Self {
        let mut geometry = Self::new();
        let mut top = 0.0;
        for id in ids {
            geometry.set(id, Rect::new(0.0, top, 240.0, top + height));
            top += height + gap;
        }
        geometry
    }

    /// Sets the factor applied to drawn path lengths.
    #[must_use]
    pub fn with_length_scale(mut self, scale: f64) -> Self {
        self.length_scale = scale;
        self
    }

    /// Sets the box for `id`.
    pub fn set(&mut self, id: &str, rect: Rect) {
        self.rows.insert(id.into(), rect);
    }

    /// Makes `id` unmeasurable. Returns its box, if it had one.
    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        self.rows.remove(id)
    }

    /// Moves every row by `offset`, like a reflow above the list.
    pub fn shift(&mut self, offset: Vec2) {
        for rect in self.rows.values_mut() {
            *rect = *rect + offset;
        }
    }

    /// Returns the box for `id`.
    #[must_use]
    pub fn row(&self, id: &str) -> Option<Rect> {
        self.rows.get(id).copied()
    }
}

impl GeometryProvider for StubGeometry {
    fn measure(&self, id: &str) -> Option<Rect> {
        self.row(id)
    }

    fn path_length(&self, path: &BezPath) -> f64 {
        analytic_length(path) * self.length_scale
    }

    fn point_at_length(&self, path: &BezPath, length: f64) -> Point {
        if self.length_scale > 0.0 {
            analytic_point_at_length(path, length / self.length_scale)
        } else {
            analytic_point_at_length(path, 0.0)
        }
    }
}
