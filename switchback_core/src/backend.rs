// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for platform integrations.
//!
//! The trail splits platform-specific work into *host* crates. Each host
//! provides the following pieces:
//!
//! - **Time**: a `now() -> HostTime` free function reading the platform's
//!   monotonic clock in microseconds.
//!
//! - **Scheduling**: an implementation of
//!   [`FrameScheduler`](crate::schedule::FrameScheduler) backed by the
//!   platform's one-shot timer and frame callback (e.g. `setTimeout` and
//!   `requestAnimationFrame`). Callbacks report back through
//!   [`TrailWidget::on_timer`](crate::widget::TrailWidget::on_timer),
//!   [`on_frame`](crate::widget::TrailWidget::on_frame) and
//!   [`update`](crate::widget::TrailWidget::update).
//!
//! - **Geometry**: an implementation of
//!   [`GeometryProvider`](crate::geometry::GeometryProvider) reading row boxes
//!   and drawn path geometry.
//!
//! - **Presenter**: implements the [`Presenter`] trait to apply frames to a
//!   platform-native surface (e.g. an SVG element and a list of buttons).
//!
//! # Crate boundaries
//!
//! `switchback_core` owns the data model, synthesis, motion and this contract
//! module. Host crates depend on `switchback_core` and provide platform glue.
//! Application code depends on both and wires them together.

use crate::render::TrailFrame;

/// Applies built frames to a platform-native drawing surface.
///
/// Both DOM-based presenters and test doubles implement this trait.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_animation_frame(now: HostTime) {
///     if scheduler.take_update() {
///         widget.update(now, &geometry, &mut scheduler, &mut tracer);
///     }
///     if let Some(generation) = scheduler.take_frame() {
///         widget.on_frame(generation, now, &mut scheduler, &mut tracer);
///     }
///     presenter.present(&widget.frame(&geometry));
/// }
/// ```
pub trait Presenter {
    /// Draws `frame`, replacing whatever was drawn before.
    fn present(&mut self, frame: &TrailFrame);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, frame: &TrailFrame) {
        (**self).present(frame);
    }
}
