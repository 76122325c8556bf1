use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A requestAnimationFrame loop that can be cancelled.
///
/// The callback re-schedules itself each frame. [`AnimationLoop::stop`]
/// cancels the pending frame and drops the closure, which also breaks the
/// closure's reference cycle on itself.
pub struct AnimationLoop {
    tick: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
    label: &'static str,
}

impl AnimationLoop {
    pub fn start(label: &'static str, mut frame: impl FnMut(Instant) + 'static) -> Self {
        let tick: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let tick_clone = tick.clone();
        let handle_clone = handle.clone();
        let running_clone = running.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_clone.set(None);
            if !running_clone.get() {
                return;
            }
            frame(Instant::now());
            if running_clone.get() {
                handle_clone.set(request_frame(&tick_clone));
            }
        }) as Box<dyn FnMut()>));

        handle.set(request_frame(&tick));
        log::info!("[frame] {} loop started", label);
        Self {
            tick,
            handle,
            running,
            label,
        }
    }

    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn stop(&mut self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // the closure holds a clone of `tick`; dropping it breaks the cycle
        _ = self.tick.borrow_mut().take();
        log::info!("[frame] {} loop stopped", self.label);
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &FrameCallback) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}
