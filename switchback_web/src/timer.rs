// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` wrapper.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// A re-armable one-shot timer.
///
/// At most one timeout is pending: [`arm`](Self::arm) clears the previous one
/// first.
pub struct Timeout {
    closure: Closure<dyn FnMut()>,
    pending: Rc<Cell<Option<i32>>>,
}

impl Timeout {
    /// Creates an unarmed timer that calls `callback` when it fires.
    pub fn new(mut callback: impl FnMut() + 'static) -> Self {
        let pending = Rc::new(Cell::new(None));
        let fired = Rc::clone(&pending);
        let closure = Closure::wrap(Box::new(move || {
            fired.set(None);
            callback();
        }) as Box<dyn FnMut()>);
        Self { closure, pending }
    }

    /// Fires the callback after `delay_ms`, replacing any pending timeout.
    pub fn arm(&self, delay_ms: f64) {
        self.clear();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "delay is clamped to the i32 range setTimeout accepts"
        )]
        // Rounded up so the callback never runs before the deadline.
        let delay = libm::ceil(delay_ms.clamp(0.0, f64::from(i32::MAX))) as i32;
        let id = set_timeout(self.closure.as_ref().unchecked_ref(), delay);
        self.pending.set(Some(id));
    }

    /// Cancels the pending timeout, if any.
    pub fn clear(&self) {
        if let Some(id) = self.pending.take() {
            clear_timeout(id);
        }
    }

    /// Returns `true` if a timeout is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.clear();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}
