// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM presentation of trail frames.
//!
//! [`SvgPresenter`] owns three children of a container element: an `<svg>`
//! overlay holding the trail `<path>` and marker `<polygon>`, and a list of
//! `<button>` rows. Rows are rebuilt only when the flat items change; every
//! other frame only touches attributes.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use switchback_core::backend::Presenter;
use switchback_core::render::{ItemRow, TrailFrame};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlElement, SvgElement, SvgPathElement};

use crate::geometry::ID_ATTR;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Draws [`TrailFrame`]s into the DOM.
pub struct SvgPresenter {
    container: HtmlElement,
    svg: SvgElement,
    trail: SvgPathElement,
    probe: SvgPathElement,
    marker: Element,
    list: HtmlElement,
    buttons: Vec<HtmlElement>,
    /// `(id, label, depth)` of the rows currently in `list`.
    keys: Vec<(String, String, usize)>,
}

impl core::fmt::Debug for SvgPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SvgPresenter")
            .field("container", &"HtmlElement")
            .field("rows", &self.keys.len())
            .finish_non_exhaustive()
    }
}

impl SvgPresenter {
    /// Builds the overlay and row list inside `container`.
    ///
    /// The container becomes the positioning context of the overlay, so row
    /// boxes measured against it share the overlay's coordinate space.
    pub fn new(container: HtmlElement) -> Result<Self, JsValue> {
        let doc = document(&container)?;

        let _ = container.style().set_property("position", "relative");

        let svg: SvgElement = doc.create_element_ns(Some(SVG_NS), "svg")?.unchecked_into();
        svg.set_attribute("aria-hidden", "true")?;
        let s = svg.style();
        let _ = s.set_property("position", "absolute");
        let _ = s.set_property("left", "0");
        let _ = s.set_property("top", "0");
        let _ = s.set_property("width", "100%");
        let _ = s.set_property("height", "100%");
        let _ = s.set_property("overflow", "visible");
        let _ = s.set_property("pointer-events", "none");

        let trail: SvgPathElement = doc.create_element_ns(Some(SVG_NS), "path")?.unchecked_into();
        trail.set_attribute("fill", "none")?;
        trail.set_attribute("stroke", "currentColor")?;
        trail.set_attribute("stroke-width", "2")?;
        trail.set_attribute("stroke-linecap", "round")?;
        trail.set_attribute("stroke-linejoin", "round")?;

        let probe: SvgPathElement = doc.create_element_ns(Some(SVG_NS), "path")?.unchecked_into();
        probe.set_attribute("fill", "none")?;
        probe.set_attribute("visibility", "hidden")?;

        let marker = doc.create_element_ns(Some(SVG_NS), "polygon")?;
        marker.set_attribute("fill", "currentColor")?;

        svg.append_child(&probe)?;
        svg.append_child(&trail)?;
        svg.append_child(&marker)?;

        let list: HtmlElement = doc.create_element("div")?.unchecked_into();
        list.set_attribute("role", "list")?;

        container.append_child(&list)?;
        container.append_child(&svg)?;

        Ok(Self {
            container,
            svg,
            trail,
            probe,
            marker,
            list,
            buttons: Vec::new(),
            keys: Vec::new(),
        })
    }

    /// Returns the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Returns the visible trail `<path>`.
    #[must_use]
    pub fn trail(&self) -> &SvgPathElement {
        &self.trail
    }

    /// Returns an invisible `<path>` in the overlay for
    /// [`DomGeometry`](crate::DomGeometry) to measure with.
    #[must_use]
    pub fn probe(&self) -> &SvgPathElement {
        &self.probe
    }

    /// Brings the row list in line with `rows`.
    ///
    /// Rows must exist before they can be measured, so hosts call this as
    /// soon as the items change instead of waiting for the next frame.
    pub fn present_rows(&mut self, rows: &[ItemRow]) {
        let same = self.keys.len() == rows.len()
            && self
                .keys
                .iter()
                .zip(rows)
                .all(|((id, label, depth), r)| *id == r.id && *label == r.label && *depth == r.depth);
        if !same {
            self.rebuild_rows(rows);
        }

        for (button, row) in self.buttons.iter().zip(rows) {
            let s = button.style();
            let _ = s.set_property("padding-left", &format!("{}px", row.padding_left));
            if row.active {
                let _ = button.set_attribute("aria-current", "location");
            } else {
                let _ = button.remove_attribute("aria-current");
            }
        }
    }

    fn rebuild_rows(&mut self, rows: &[ItemRow]) {
        for button in self.buttons.drain(..) {
            button.remove();
        }
        self.keys.clear();

        let Ok(doc) = document(&self.container) else {
            return;
        };
        for row in rows {
            let Ok(el) = doc.create_element("button") else {
                continue;
            };
            let button: HtmlElement = el.unchecked_into();
            let _ = button.set_attribute("type", "button");
            let _ = button.set_attribute("role", "listitem");
            let _ = button.set_attribute(ID_ATTR, &row.id);
            let _ = button.set_attribute("data-depth", &row.depth.to_string());
            button.set_text_content(Some(&row.label));
            let s = button.style();
            let _ = s.set_property("display", "block");
            let _ = s.set_property("text-align", "left");
            let _ = self.list.append_child(&button);
            self.buttons.push(button);
            self.keys.push((row.id.clone(), row.label.clone(), row.depth));
        }
    }
}

impl Presenter for SvgPresenter {
    fn present(&mut self, frame: &TrailFrame) {
        self.present_rows(&frame.rows);

        // Hidden rather than undisplayed: the probe path must stay rendered
        // for length queries.
        let s = self.svg.style();
        if !frame.visible {
            let _ = s.set_property("visibility", "hidden");
            return;
        }
        let _ = s.remove_property("visibility");

        let _ = self.trail.set_attribute("d", &frame.svg);
        let _ = self
            .trail
            .set_attribute("stroke-dasharray", &format!("{}", frame.dash_array));
        let _ = self
            .trail
            .set_attribute("stroke-dashoffset", &format!("{}", frame.dash_offset));
        let _ = self.marker.set_attribute("points", &frame.marker_points());
    }
}

fn document(el: &HtmlElement) -> Result<Document, JsValue> {
    el.owner_document()
        .ok_or_else(|| JsValue::from_str("element has no owner document"))
}
