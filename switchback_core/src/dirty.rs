// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The widget uses multi-channel dirty tracking (via [`understory_dirty`]),
//! keyed by flat item index, to coalesce invalidation between updates. Each
//! channel represents an independent category of change. Mutating calls on
//! [`TrailWidget`](crate::widget::TrailWidget) only mark; the deferred
//! [`update`](crate::widget::TrailWidget::update) drains every channel and
//! rebuilds at most once.
//!
//! # Channels
//!
//! - **Structural**: [`TOPOLOGY`] is marked when the section tree is
//!   replaced. The flat list is rebuilt and every item is re-measured.
//!
//! - **Geometric**: [`LAYOUT`] is marked per item when its position may have
//!   changed (container resize, reflow, an item mounting late). Any drained
//!   key forces a re-measure and a new path.
//!
//! - **Targeting**: [`ACTIVE`] is marked on the old and new active items when
//!   the active section changes. It retargets motion without rebuilding the
//!   path.

use understory_dirty::Channel;

/// Section tree replaced. Requires re-flattening and a full rebuild.
pub const TOPOLOGY: Channel = Channel::new(0);

/// Item position invalidated. Requires re-measuring and a new path.
pub const LAYOUT: Channel = Channel::new(1);

/// Active section changed. Requires retargeting only.
pub const ACTIVE: Channel = Channel::new(2);
