// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section tree and its flattened, depth-annotated form.
//!
//! A table of contents is a forest of [`SectionNode`]s. The trail visits
//! sections in document order, so the pipeline works on the pre-order
//! [`flatten`]ing of that forest: every parent precedes its children, and each
//! [`FlatItem`] remembers how deeply it was nested.

use alloc::string::String;
use alloc::vec::Vec;

/// One section of a page, with optional subsections.
///
/// Ids are expected to be unique within a tree. When they are not, lookups
/// resolve to the first occurrence in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SectionNode {
    /// Anchor identifier of the section.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Subsections, in document order.
    pub children: Vec<SectionNode>,
}

impl SectionNode {
    /// Creates a section without children.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Replaces the subsections of this section.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children = children.into_iter().collect();
        self
    }
}

/// A section at its position in document order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlatItem {
    /// Anchor identifier of the section.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Nesting depth; top-level sections are 0.
    pub depth: usize,
}

/// Flattens a section forest in pre-order, annotating each item with its
/// depth.
///
/// An empty forest yields an empty list.
#[must_use]
pub fn flatten(tree: &[SectionNode]) -> Vec<FlatItem> {
    let mut out = Vec::new();
    for node in tree {
        collect(node, 0, &mut out);
    }
    out
}

fn collect(node: &SectionNode, depth: usize, out: &mut Vec<FlatItem>) {
    out.push(FlatItem {
        id: node.id.clone(),
        label: node.label.clone(),
        depth,
    });
    for child in &node.children {
        collect(child, depth + 1, out);
    }
}

/// Returns the flat index of the first item with the given id.
#[must_use]
pub fn position_of(items: &[FlatItem], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}
