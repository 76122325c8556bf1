//! Event listener and observer registration that can be undone.
//!
//! Every handler is owned by a [`Listener`] or [`ResizeWatch`]; dropping it
//! (or calling `detach`) removes the DOM registration and frees the closure.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl Listener {
    /// Register `handler` for `kind` on `target`. Events that are not `E`
    /// are skipped.
    pub fn new<E>(
        target: &web::EventTarget,
        kind: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Self
    where
        E: JsCast + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            log::warn!("[events] add {} listener failed: {:?}", kind, e);
        }
        Self {
            target: target.clone(),
            kind,
            closure: Some(closure),
        }
    }

    /// Remove the registration. Safe to call more than once.
    pub fn detach(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.kind, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Listeners owned by one mount.
#[derive(Default)]
pub struct Listeners {
    items: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<E>(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(E) + 'static,
    ) where
        E: JsCast + 'static,
    {
        self.items.push(Listener::new(target, kind, handler));
    }

    pub fn clear(&mut self) {
        for l in &mut self.items {
            l.detach();
        }
        self.items.clear();
    }
}

/// A `ResizeObserver` on one element, for size changes the window never sees.
pub struct ResizeWatch {
    observer: web::ResizeObserver,
    closure: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

impl ResizeWatch {
    pub fn observe(target: &web::Element, mut on_resize: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            on_resize();
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = web::ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("ResizeObserver unavailable: {:?}", e))?;
        observer.observe(target);
        Ok(Self {
            observer,
            closure: Some(closure),
        })
    }

    /// Disconnect the observer. Safe to call more than once.
    pub fn detach(&mut self) {
        if self.closure.take().is_some() {
            self.observer.disconnect();
        }
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.detach();
    }
}
