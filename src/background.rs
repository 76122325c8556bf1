//! Browser mount for the shader background.

use crate::constants::BACKGROUND_CANVAS_CLASS;
use crate::dom;
use crate::events::{Listeners, ResizeWatch};
use crate::frame::AnimationLoop;
use crate::input;
use crate::render::Renderer;
use instant::Instant;
use reel_core::{BackgroundConfig, BackgroundState, FrameClock, ParamPatch};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct BackgroundContext {
    state: BackgroundState,
    clock: FrameClock,
    canvas: web::HtmlCanvasElement,
    renderer: Option<Renderer>,
    needs_resize: bool,
}

impl BackgroundContext {
    fn frame(&mut self, now: Instant) {
        if self.needs_resize {
            self.sync_size();
        }
        let tick = self.clock.tick(now);
        let uniforms = self.state.tick(tick.delta);
        if let Some(r) = &mut self.renderer {
            r.render(&uniforms);
        }
    }

    /// Match the canvas to its CSS box so aspect is right on the next frame.
    fn sync_size(&mut self) {
        self.needs_resize = false;
        let (w, h) = dom::canvas_backing_size(&self.canvas);
        let (w, h) = match &self.renderer {
            Some(r) => r.surface_size(w, h),
            None => (w, h),
        };
        let (w, h) = dom::apply_canvas_size(&self.canvas, w, h);
        self.state.resize(w, h);
        if let Some(r) = &mut self.renderer {
            r.resize_if_needed(w, h);
        }
    }
}

pub struct BackgroundMount {
    ctx: Rc<RefCell<BackgroundContext>>,
    listeners: Listeners,
    resize_watch: Option<ResizeWatch>,
    animation: Rc<RefCell<Option<AnimationLoop>>>,
    destroyed: Rc<Cell<bool>>,
}

impl BackgroundMount {
    pub fn mount(container: &web::HtmlElement, config: BackgroundConfig) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let canvas = dom::create_canvas(&document)?;
        canvas.set_class_name(BACKGROUND_CANVAS_CLASS);
        dom::set_styles(
            &canvas,
            &[("width", "100%"), ("height", "100%"), ("display", "block")],
        );
        container
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("append canvas failed: {:?}", e))?;

        let state = BackgroundState::new(&config);
        let transparent = state.is_transparent();
        let ctx = Rc::new(RefCell::new(BackgroundContext {
            state,
            clock: FrameClock::new(),
            canvas: canvas.clone(),
            renderer: None,
            needs_resize: true,
        }));
        ctx.borrow_mut().sync_size();

        // the container can change size without the window resizing
        let watch_ctx = ctx.clone();
        let resize_watch = match ResizeWatch::observe(container, move || {
            watch_ctx.borrow_mut().needs_resize = true;
        }) {
            Ok(watch) => Some(watch),
            Err(e) => {
                log::warn!("[background] {}; watching window resize only", e);
                None
            }
        };

        let mut listeners = Listeners::new();
        let win_target: &web::EventTarget = &window;
        {
            let ctx = ctx.clone();
            listeners.add(win_target, "resize", move |_: web::Event| {
                ctx.borrow_mut().needs_resize = true;
            });
        }
        {
            let ctx = ctx.clone();
            let window = window.clone();
            listeners.add(win_target, "pointermove", move |ev: web::PointerEvent| {
                let ndc = input::pointer_window_ndc(&ev, &window);
                ctx.borrow_mut().state.set_pointer_target(ndc);
            });
        }

        let animation = Rc::new(RefCell::new(None));
        let destroyed = Rc::new(Cell::new(false));
        spawn_local(start_rendering(
            ctx.clone(),
            canvas,
            transparent,
            animation.clone(),
            destroyed.clone(),
        ));

        Ok(Self {
            ctx,
            listeners,
            resize_watch,
            animation,
            destroyed,
        })
    }

    pub fn set_params(&self, patch: &ParamPatch) {
        if self.destroyed.get() {
            return;
        }
        self.ctx.borrow_mut().state.set_params(patch);
    }

    pub fn destroy(&mut self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(mut anim) = self.animation.borrow_mut().take() {
            anim.stop();
        }
        self.listeners.clear();
        if let Some(mut watch) = self.resize_watch.take() {
            watch.detach();
        }
        let mut ctx = self.ctx.borrow_mut();
        ctx.renderer = None;
        ctx.canvas.remove();
        log::info!("[background] destroyed");
    }
}

impl Drop for BackgroundMount {
    fn drop(&mut self) {
        self.destroy();
    }
}

async fn start_rendering(
    ctx: Rc<RefCell<BackgroundContext>>,
    canvas: web::HtmlCanvasElement,
    transparent: bool,
    animation: Rc<RefCell<Option<AnimationLoop>>>,
    destroyed: Rc<Cell<bool>>,
) {
    let created = Renderer::create(&canvas, transparent).await;
    if destroyed.get() {
        // the fallback may have swapped in a canvas destroy() never saw
        if let Ok((_, c)) = &created {
            c.remove();
        }
        return;
    }
    let (renderer, canvas) = match created {
        Ok(r) => r,
        Err(e) => {
            log::error!("[background] no renderer: {:?}", e);
            return;
        }
    };
    log::info!("[background] renderer ready gpu={}", renderer.is_gpu());
    {
        let mut c = ctx.borrow_mut();
        c.canvas = canvas;
        c.renderer = Some(renderer);
        c.needs_resize = true;
    }
    let frame_ctx = ctx.clone();
    *animation.borrow_mut() = Some(AnimationLoop::start("background", move |now| {
        frame_ctx.borrow_mut().frame(now);
    }));
}
