// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ways the trail degrades instead of failing.
//!
//! The trail is decorative, so none of these reach the end user as errors.
//! They surface as [`TrailStatus::Hidden`](crate::widget::TrailStatus::Hidden)
//! when the trail cannot be shown, through
//! [`TrailWidget::degradations`](crate::widget::TrailWidget::degradations)
//! when it can, and as trace events. The next rebuild tries again.

use alloc::string::String;
use core::fmt;

/// Why (part of) the trail could not be shown this cycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Degradation {
    /// An item's position could not be read (e.g. not mounted yet). The item
    /// is left out of the current path.
    MeasurementUnavailable {
        /// Section whose measurement failed.
        id: String,
    },
    /// The section tree has no items.
    EmptyTree,
    /// No section is active.
    NoActiveSection,
    /// The active section id does not occur in the tree.
    UnknownSection {
        /// The unknown id.
        id: String,
    },
    /// Items exist but none of them could be measured.
    NoMeasurableItems,
    /// The path has zero length; progress maps to its single point.
    PathDegenerate,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeasurementUnavailable { id } => {
                write!(f, "section `{id}` could not be measured")
            }
            Self::EmptyTree => f.write_str("section tree is empty"),
            Self::NoActiveSection => f.write_str("no active section"),
            Self::UnknownSection { id } => write!(f, "active section `{id}` is not in the tree"),
            Self::NoMeasurableItems => f.write_str("no section could be measured"),
            Self::PathDegenerate => f.write_str("trail path has zero length"),
        }
    }
}

impl core::error::Error for Degradation {}
