// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser event loop for a [`TrailWidget`].
//!
//! [`TrailDriver`] owns the widget together with its geometry, presenter and
//! pending host work, and runs the loop sketched in
//! [`switchback_core::backend`]:
//!
//! - mutating calls mark the widget and start the frame loop,
//! - each animation frame runs the deferred update, advances motion and
//!   presents the frame,
//! - the anticipation deadline is mirrored into a single `setTimeout`,
//! - the frame loop parks itself once nothing is pending.
//!
//! Browser callbacks hold only weak references to the driver's state, so
//! dropping the driver releases everything.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use switchback_core::backend::Presenter;
use switchback_core::config::TrailConfig;
use switchback_core::error::Degradation;
use switchback_core::schedule::{Generation, PendingWork};
use switchback_core::section::SectionNode;
use switchback_core::spy::{ScrollSpy, SpyConfig};
use switchback_core::time::HostTime;
use switchback_core::trace::{TraceSink, Tracer};
use switchback_core::widget::{TrailStatus, TrailWidget};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{
    Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ResizeObserver,
};

use crate::geometry::{DomGeometry, ID_ATTR};
use crate::presenter::SvgPresenter;
use crate::raf::RafLoop;
use crate::timer::Timeout;

/// Drives a trail inside a DOM container.
///
/// ```rust,ignore
/// let driver = TrailDriver::new(container, TrailConfig::default())?;
/// driver.set_items(vec![
///     SectionNode::new("installation", "Installation"),
///     SectionNode::new("usage", "Usage"),
/// ]);
/// driver.set_on_item_click(|id| scroll_to(id));
/// driver.enable_scroll_spy(SpyConfig::default())?;
/// ```
pub struct TrailDriver {
    shared: Rc<Shared>,
}

impl core::fmt::Debug for TrailDriver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrailDriver")
            .field("raf", &self.shared.raf)
            .field("timeout", &self.shared.timeout)
            .field("armed", &self.shared.armed.get())
            .finish_non_exhaustive()
    }
}

struct Shared {
    state: RefCell<State>,
    raf: RafLoop,
    timeout: Timeout,
    /// Deadline and generation the timeout is currently armed for.
    armed: Cell<Option<(HostTime, Generation)>>,
    on_click: RefCell<Option<Box<dyn FnMut(&str)>>>,
    /// Clicks accepted by the widget, delivered once its state is released.
    clicked: Rc<RefCell<Vec<String>>>,
    observers: RefCell<Observers>,
}

struct State {
    widget: TrailWidget,
    pending: PendingWork,
    geometry: DomGeometry,
    presenter: SvgPresenter,
    spy: ScrollSpy,
    sink: Option<Box<dyn TraceSink>>,
}

#[derive(Default)]
struct Observers {
    click: Option<Closure<dyn FnMut(Event)>>,
    resize: Option<(ResizeObserver, Closure<dyn FnMut()>)>,
    spy: Option<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array)>)>,
}

impl TrailDriver {
    /// Builds the presenter inside `container` and wires click and resize
    /// handling. Nothing is drawn until items are set.
    pub fn new(container: HtmlElement, config: TrailConfig) -> Result<Self, JsValue> {
        let presenter = SvgPresenter::new(container.clone())?;
        let geometry = DomGeometry::new(container.clone().into(), presenter.probe().clone());
        let clicked: Rc<RefCell<Vec<String>>> = Rc::default();

        let mut widget = TrailWidget::new(config);
        let queue = Rc::clone(&clicked);
        widget.set_on_item_click(move |id| queue.borrow_mut().push(id.into()));

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let on_frame = weak.clone();
            let on_timeout = weak.clone();
            Shared {
                state: RefCell::new(State {
                    widget,
                    pending: PendingWork::new(),
                    geometry,
                    presenter,
                    spy: ScrollSpy::default(),
                    sink: None,
                }),
                raf: RafLoop::new(move |now| {
                    on_frame
                        .upgrade()
                        .is_some_and(|shared| shared.on_animation_frame(now))
                }),
                timeout: Timeout::new(move || {
                    if let Some(shared) = on_timeout.upgrade() {
                        shared.on_timeout();
                    }
                }),
                armed: Cell::new(None),
                on_click: RefCell::new(None),
                clicked,
                observers: RefCell::new(Observers::default()),
            }
        });

        Shared::listen_clicks(&shared, &container)?;
        Shared::observe_resize(&shared, &container)?;

        Ok(Self { shared })
    }

    /// Replaces the section tree.
    ///
    /// Rows are written to the DOM immediately so the next frame can measure
    /// them.
    pub fn set_items(&self, tree: Vec<SectionNode>) {
        {
            let mut guard = self.shared.state.borrow_mut();
            let st = &mut *guard;
            st.widget.set_items(tree, &mut st.pending);
            let rows = st.widget.frame(&st.geometry).rows;
            st.presenter.present_rows(&rows);
            st.spy.clear();
        }
        self.shared.observe_sections();
        self.shared.kick();
    }

    /// Sets the active section.
    pub fn set_active(&self, id: Option<&str>) {
        self.shared.set_active(id);
    }

    /// Re-measures rows on the next frame, e.g. after fonts load.
    pub fn invalidate_layout(&self) {
        {
            let mut guard = self.shared.state.borrow_mut();
            let st = &mut *guard;
            st.widget.invalidate_layout(&mut st.pending);
        }
        self.shared.kick();
    }

    /// Installs the handler called with the section id of a clicked row.
    pub fn set_on_item_click(&self, handler: impl FnMut(&str) + 'static) {
        *self.shared.on_click.borrow_mut() = Some(Box::new(handler));
    }

    /// Routes trace events to `sink`, or stops tracing with `None`.
    pub fn set_trace_sink(&self, sink: Option<Box<dyn TraceSink>>) {
        self.shared.state.borrow_mut().sink = sink;
    }

    /// Elects the active section from an `IntersectionObserver` watching
    /// the document elements whose `id` matches a section id.
    ///
    /// Sections are re-observed whenever items change.
    pub fn enable_scroll_spy(&self, config: SpyConfig) -> Result<(), JsValue> {
        self.shared.state.borrow_mut().spy = ScrollSpy::new(config);

        let weak = Rc::downgrade(&self.shared);
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            if let Some(shared) = weak.upgrade() {
                shared.on_intersections(&entries);
            }
        }) as Box<dyn FnMut(js_sys::Array)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.threshold));
        init.set_root_margin(config.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        if let Some((old, _)) = self.shared.observers.borrow_mut().spy.replace((observer, callback)) {
            old.disconnect();
        }
        self.shared.observe_sections();
        Ok(())
    }

    /// Returns the status of the last update.
    #[must_use]
    pub fn status(&self) -> TrailStatus {
        self.shared.state.borrow().widget.status().clone()
    }

    /// Returns the partial failures of the last rebuild, such as rows that
    /// could not be measured.
    #[must_use]
    pub fn degradations(&self) -> Vec<Degradation> {
        self.shared.state.borrow().widget.degradations()
    }

    /// Stops animation, cancels the timer and detaches every listener.
    pub fn shutdown(&self) {
        self.shared.shutdown();
    }
}

impl Drop for TrailDriver {
    fn drop(&mut self) {
        self.shared.shutdown();
    }
}

impl Shared {
    fn tracer(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
        match sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        }
    }

    fn on_animation_frame(&self, now: HostTime) -> bool {
        let more = {
            let mut guard = self.state.borrow_mut();
            let st = &mut *guard;
            let mut tracer = Self::tracer(&mut st.sink);

            if st.pending.take_update() {
                st.widget
                    .update(now, &st.geometry, &mut st.pending, &mut tracer);
            }
            if let Some(generation) = st.pending.take_frame() {
                st.widget
                    .on_frame(generation, now, &mut st.pending, &mut tracer);
            }
            let frame = st.widget.frame(&st.geometry);
            st.presenter.present(&frame);

            st.pending.frame().is_some() || st.pending.update_requested()
        };
        self.sync_timer(now);
        self.deliver_clicks();
        more
    }

    fn on_timeout(&self) {
        self.armed.set(None);
        let now = crate::now();
        {
            let mut guard = self.state.borrow_mut();
            let st = &mut *guard;
            if let Some((deadline, _)) = st.pending.timer() {
                // Timers never fire early, even if the clocks disagree.
                let at = now.max(deadline);
                if let Some(generation) = st.pending.take_due_timer(at) {
                    let mut tracer = Self::tracer(&mut st.sink);
                    st.widget
                        .on_timer(generation, at, &mut st.pending, &mut tracer);
                }
            }
        }
        self.kick();
    }

    fn set_active(&self, id: Option<&str>) {
        {
            let mut guard = self.state.borrow_mut();
            let st = &mut *guard;
            st.widget.set_active(id, &mut st.pending);
        }
        self.kick();
    }

    /// Starts the frame loop if work is pending and mirrors the timer.
    fn kick(&self) {
        let busy = {
            let st = self.state.borrow();
            st.pending.frame().is_some() || st.pending.update_requested()
        };
        if busy {
            self.raf.start();
        }
        self.sync_timer(crate::now());
    }

    fn sync_timer(&self, now: HostTime) {
        let wanted = self.state.borrow().pending.timer();
        if wanted == self.armed.get() {
            return;
        }
        match wanted {
            Some((deadline, _)) => {
                let delay = deadline.saturating_duration_since(now);
                self.timeout.arm(delay.as_millis_f64());
            }
            None => self.timeout.clear(),
        }
        self.armed.set(wanted);
    }

    fn deliver_clicks(&self) {
        let ids: Vec<String> = self.clicked.borrow_mut().drain(..).collect();
        if ids.is_empty() {
            return;
        }
        // Taken out so the handler may call back into the driver.
        let Some(mut handler) = self.on_click.borrow_mut().take() else {
            return;
        };
        for id in &ids {
            handler(id);
        }
        let mut slot = self.on_click.borrow_mut();
        if slot.is_none() {
            *slot = Some(handler);
        }
    }

    fn on_click(&self, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(row)) = target.closest(&alloc::format!("[{ID_ATTR}]")) else {
            return;
        };
        let Some(id) = row.get_attribute(ID_ATTR) else {
            return;
        };
        let accepted = self.state.borrow_mut().widget.click(&id);
        if accepted {
            self.deliver_clicks();
        }
    }

    fn on_intersections(&self, entries: &js_sys::Array) {
        let mut elected: Option<String> = None;
        {
            let mut st = self.state.borrow_mut();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let id = entry.target().id();
                if let Some(active) =
                    st.spy
                        .observe(&id, entry.intersection_ratio(), entry.is_intersecting())
                {
                    elected = Some(active.into());
                }
            }
        }
        if let Some(id) = elected {
            self.set_active(Some(&id));
        }
    }

    /// Points the scroll spy at the current sections.
    fn observe_sections(&self) {
        let observers = self.observers.borrow();
        let Some((observer, _)) = &observers.spy else {
            return;
        };
        observer.disconnect();

        let st = self.state.borrow();
        let Some(doc) = st.presenter.container().owner_document() else {
            return;
        };
        for item in st.widget.items() {
            if let Some(section) = doc.get_element_by_id(&item.id) {
                observer.observe(&section);
            }
        }
    }

    fn listen_clicks(this: &Rc<Self>, container: &HtmlElement) -> Result<(), JsValue> {
        let weak = Rc::downgrade(this);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_click(&event);
            }
        }) as Box<dyn FnMut(Event)>);
        container.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        this.observers.borrow_mut().click = Some(callback);
        Ok(())
    }

    fn observe_resize(this: &Rc<Self>, container: &HtmlElement) -> Result<(), JsValue> {
        let weak = Rc::downgrade(this);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                {
                    let mut guard = shared.state.borrow_mut();
                    let st = &mut *guard;
                    st.widget.invalidate_layout(&mut st.pending);
                }
                shared.kick();
            }
        }) as Box<dyn FnMut()>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(container);
        this.observers.borrow_mut().resize = Some((observer, callback));
        Ok(())
    }

    fn shutdown(&self) {
        {
            let mut guard = self.state.borrow_mut();
            let st = &mut *guard;
            st.widget.shutdown(&mut st.pending);
        }
        self.raf.stop();
        self.timeout.clear();
        self.armed.set(None);

        let mut observers = self.observers.borrow_mut();
        if let Some(callback) = observers.click.take() {
            let st = self.state.borrow();
            let _ = st
                .presenter
                .container()
                .remove_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        }
        if let Some((observer, _)) = observers.resize.take() {
            observer.disconnect();
        }
        if let Some((observer, _)) = observers.spy.take() {
            observer.disconnect();
        }
        self.on_click.borrow_mut().take();
        self.clicked.borrow_mut().clear();
    }
}
