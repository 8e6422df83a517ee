// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-backed geometry.
//!
//! Row boxes come from `getBoundingClientRect()` of the element carrying
//! `data-toc-id`, translated into the container's space. Path queries go
//! through an SVG `<path>` so the marker lands on the stroke the browser
//! actually draws.

use alloc::string::String;
use core::cell::RefCell;
use core::fmt::Write as _;

use kurbo::{BezPath, PathEl, Point, Rect};
use switchback_core::geometry::{GeometryProvider, analytic_length, analytic_point_at_length};
use web_sys::{Element, SvgPathElement};

/// Attribute that ties a row element to its section id.
pub(crate) const ID_ATTR: &str = "data-toc-id";

/// Reads row boxes and drawn path geometry from the DOM.
pub struct DomGeometry {
    container: Element,
    probe: SvgPathElement,
    /// Path data last written to `probe`.
    probe_d: RefCell<String>,
}

impl core::fmt::Debug for DomGeometry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomGeometry")
            .field("container", &"Element")
            .field("probe_d", &self.probe_d)
            .finish_non_exhaustive()
    }
}

impl DomGeometry {
    /// Measures rows below `container` and queries lengths through `probe`.
    ///
    /// `probe` must be a `<path>` inside a rendered `<svg>` that nothing else
    /// writes to, such as [`SvgPresenter::probe`](crate::SvgPresenter::probe).
    /// Its `d` attribute is overwritten by queries.
    #[must_use]
    pub fn new(container: Element, probe: SvgPathElement) -> Self {
        Self {
            container,
            probe,
            probe_d: RefCell::new(String::new()),
        }
    }

    /// Returns the container rows are measured against.
    #[must_use]
    pub fn container(&self) -> &Element {
        &self.container
    }

    fn row(&self, id: &str) -> Option<Element> {
        self.container.query_selector(&selector(id)).ok().flatten()
    }

    /// Points the probe at `path`. Returns `false` for paths without
    /// segments, which the browser cannot measure.
    fn load(&self, path: &BezPath) -> bool {
        if path.segments().next().is_none() {
            return false;
        }
        let mut d = String::new();
        write_path_data(path, &mut d);
        let mut cached = self.probe_d.borrow_mut();
        if *cached != d {
            if self.probe.set_attribute("d", &d).is_err() {
                return false;
            }
            *cached = d;
        }
        true
    }
}

impl GeometryProvider for DomGeometry {
    fn measure(&self, id: &str) -> Option<Rect> {
        let row = self.row(id)?;
        let r = row.get_bounding_client_rect();
        if r.width() <= 0.0 && r.height() <= 0.0 {
            // Not laid out (display: none or detached).
            return None;
        }
        let origin = self.container.get_bounding_client_rect();
        let x0 = r.x() - origin.x();
        let y0 = r.y() - origin.y();
        Some(Rect::new(x0, y0, x0 + r.width(), y0 + r.height()))
    }

    fn path_length(&self, path: &BezPath) -> f64 {
        if !self.load(path) {
            return analytic_length(path);
        }
        f64::from(self.probe.get_total_length())
    }

    fn point_at_length(&self, path: &BezPath, length: f64) -> Point {
        if !self.load(path) {
            return analytic_point_at_length(path, length);
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "SVG geometry is single precision"
        )]
        let distance = length.max(0.0) as f32;
        match self.probe.get_point_at_length(distance) {
            Ok(p) => Point::new(f64::from(p.x()), f64::from(p.y())),
            Err(_) => analytic_point_at_length(path, length),
        }
    }
}

/// CSS selector matching the row of section `id`.
pub(crate) fn selector(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 16);
    out.push('[');
    out.push_str(ID_ATTR);
    out.push_str("=\"");
    for c in id.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("\"]");
    out
}

/// Appends SVG path data for `path` to `out`.
pub(crate) fn write_path_data(path: &BezPath, out: &mut String) {
    for (i, el) in path.elements().iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing to a String cannot fail.
        _ = match *el {
            PathEl::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
            PathEl::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
            PathEl::QuadTo(c, p) => write!(out, "Q{},{} {},{}", c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => write!(
                out,
                "C{},{} {},{} {},{}",
                c1.x, c1.y, c2.x, c2.y, p.x, p.y
            ),
            PathEl::ClosePath => write!(out, "Z"),
        };
    }
}
