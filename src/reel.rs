//! Browser mount for the film reel: builds the tripled track, fuses wheel and
//! drag input into [`CarouselPhysics`] and writes the wrapped translation.
//! Tiles with a preview clip play it on hover, except during a drag.

use crate::constants::{
    REEL_INDEX_ATTR, REEL_INFO_CLASS, REEL_ITEM_CLASS, REEL_ITEM_PLACEHOLDER_BG,
    REEL_SCOPE_SELECTOR,
};
use crate::dom;
use crate::events::Listeners;
use crate::frame::AnimationLoop;
use crate::input;
use crate::preview::HoverPreview;
use instant::Instant;
use reel_core::{CarouselPhysics, Reel, ReelGeometry, WheelGate};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct ReelContext {
    physics: CarouselPhysics,
    reel: Reel,
    viewport: web::HtmlElement,
    track: web::HtmlElement,
}

impl ReelContext {
    fn geometry(&self) -> ReelGeometry {
        let tiles = self.track.children();
        let tile = |i: usize| {
            tiles
                .item(i as u32)
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        };
        let (Some(first), Some(second_start)) = (
            tile(0),
            self.reel.second_copy_start().and_then(tile),
        ) else {
            return ReelGeometry::default();
        };
        ReelGeometry {
            set_width: second_start.offset_left() as f64,
            viewport_width: self.viewport.client_width() as f64,
            item_width: first.offset_width() as f64,
        }
    }

    fn measure(&mut self) -> bool {
        let geom = self.geometry();
        self.physics.measure_loop_width(geom)
    }

    fn frame(&mut self) {
        if let Some(x) = self.physics.tick() {
            _ = self
                .track
                .style()
                .set_property("transform", &format!("translate3d({x}px, 0, 0)"));
        }
    }
}

pub struct ReelMount {
    ctx: Rc<RefCell<ReelContext>>,
    listeners: Listeners,
    previews: Vec<Rc<RefCell<HoverPreview>>>,
    animation: Option<AnimationLoop>,
}

impl ReelMount {
    pub fn mount(
        viewport: web::HtmlElement,
        track: web::HtmlElement,
        reel: Reel,
        on_open: js_sys::Function,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;

        let previews = build_track(&document, &track, &reel)?;
        log::info!(
            "[reel] mounted items={} tiles={}",
            reel.len(),
            reel.slot_count()
        );

        let ctx = Rc::new(RefCell::new(ReelContext {
            physics: CarouselPhysics::new(),
            reel,
            viewport: viewport.clone(),
            track: track.clone(),
        }));
        ctx.borrow_mut().measure();

        let mut listeners = Listeners::new();
        let win_target: &web::EventTarget = &window;

        for kind in ["load", "resize"] {
            let ctx = ctx.clone();
            listeners.add(win_target, kind, move |_: web::Event| {
                ctx.borrow_mut().measure();
            });
        }

        {
            let ctx = ctx.clone();
            let window = window.clone();
            let viewport_el = viewport.clone();
            listeners.add(win_target, "wheel", move |ev: web::WheelEvent| {
                let gate = WheelGate {
                    over_reel: is_over_reel(&viewport_el, &ev),
                    viewport_width: input::window_inner_width(&window),
                };
                ctx.borrow_mut()
                    .physics
                    .wheel(ev.delta_x(), ev.delta_y(), gate);
            });
        }

        {
            let ctx = ctx.clone();
            let viewport_el = viewport.clone();
            listeners.add(&viewport, "pointerdown", move |ev: web::PointerEvent| {
                ctx.borrow_mut().physics.pointer_down(ev.client_x() as f64);
                dom::set_styles(&viewport_el, &[("cursor", "grabbing")]);
                ev.prevent_default();
            });
        }

        {
            let ctx = ctx.clone();
            listeners.add(win_target, "pointermove", move |ev: web::PointerEvent| {
                ctx.borrow_mut().physics.pointer_move(ev.client_x() as f64);
            });
        }

        for kind in ["pointerup", "pointercancel"] {
            let ctx = ctx.clone();
            let viewport_el = viewport.clone();
            listeners.add(win_target, kind, move |_: web::PointerEvent| {
                let mut c = ctx.borrow_mut();
                if !c.physics.is_pointer_down() {
                    return;
                }
                c.physics.pointer_up(Instant::now());
                dom::set_styles(&viewport_el, &[("cursor", "grab")]);
            });
        }

        {
            let ctx = ctx.clone();
            listeners.add(&track, "click", move |ev: web::MouseEvent| {
                let Some(position) = clicked_position(&ev) else {
                    return;
                };
                let accepted = ctx.borrow_mut().physics.accept_click(Instant::now());
                if !accepted {
                    ev.prevent_default();
                    ev.stop_propagation();
                    return;
                }
                // release the borrow before calling out; the callback may destroy us
                let payload = {
                    let c = ctx.borrow();
                    c.reel.item_at(position).map(|(index, item)| {
                        let json = serde_json::to_string(item).unwrap_or_else(|_| "{}".into());
                        (index, dom::parse_json(&json))
                    })
                };
                if let Some((index, item)) = payload {
                    log::info!("[reel] open item {}", index);
                    if let Err(e) = on_open.call2(&JsValue::NULL, &item, &JsValue::from(index as u32)) {
                        log::error!("[reel] onOpen threw: {:?}", e);
                    }
                }
            });
        }

        for preview in &previews {
            let tile = preview.borrow().tile().clone();
            {
                let ctx = ctx.clone();
                let preview = preview.clone();
                listeners.add(&tile, "mouseenter", move |_: web::MouseEvent| {
                    if ctx.borrow().physics.is_dragging(Instant::now()) {
                        return;
                    }
                    HoverPreview::enter(&preview);
                });
            }
            {
                let preview = preview.clone();
                listeners.add(&tile, "mouseleave", move |_: web::MouseEvent| {
                    HoverPreview::leave(&preview);
                });
            }
        }

        let frame_ctx = ctx.clone();
        let animation = AnimationLoop::start("reel", move |_| {
            frame_ctx.borrow_mut().frame();
        });

        Ok(Self {
            ctx,
            listeners,
            previews,
            animation: Some(animation),
        })
    }

    /// Re-read the layout, e.g. after images load or fonts swap.
    pub fn measure(&self) -> bool {
        self.ctx.borrow_mut().measure()
    }

    pub fn destroy(&mut self) {
        let Some(mut anim) = self.animation.take() else {
            return;
        };
        anim.stop();
        self.listeners.clear();
        for preview in self.previews.drain(..) {
            preview.borrow_mut().clear();
        }
        let c = self.ctx.borrow();
        c.track.set_inner_html("");
        _ = c.track.style().remove_property("transform");
        _ = c.viewport.style().remove_property("cursor");
        log::info!("[reel] destroyed");
    }
}

impl Drop for ReelMount {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Fill `track` with one tile per slot. Returns the hover state of each tile.
fn build_track(
    document: &web::Document,
    track: &web::HtmlElement,
    reel: &Reel,
) -> anyhow::Result<Vec<Rc<RefCell<HoverPreview>>>> {
    track.set_inner_html("");
    let mut previews = Vec::with_capacity(reel.slot_count());
    for (position, slot) in reel.slots().enumerate() {
        let Some(item) = reel.items().get(slot.index) else {
            continue;
        };
        let tile = dom::create_html_element(document, "div")?;
        tile.set_class_name(REEL_ITEM_CLASS);
        _ = tile.set_attribute(REEL_INDEX_ATTR, &position.to_string());
        let bg = format!("url(\"{}\")", item.image);
        dom::set_styles(
            &tile,
            &[
                ("background-image", bg.as_str()),
                ("background-size", "cover"),
                ("background-position", "center"),
                ("background-color", REEL_ITEM_PLACEHOLDER_BG),
            ],
        );

        let info = dom::create_html_element(document, "div")?;
        info.set_class_name(REEL_INFO_CLASS);
        let title = dom::create_html_element(document, "div")?;
        title.set_class_name("reel-title");
        title.set_inner_text(&item.title);
        let work = dom::create_html_element(document, "div")?;
        work.set_class_name("reel-work");
        work.set_inner_text(&item.work);

        append(&info, &title)?;
        append(&info, &work)?;
        append(&tile, &info)?;
        append(track, &tile)?;

        let src = item.preview_src().map(str::to_owned);
        previews.push(HoverPreview::new(tile, info, src));
    }
    Ok(previews)
}

fn append(parent: &web::HtmlElement, child: &web::HtmlElement) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append_child failed: {:?}", e))
}

/// Wheel events count when they land inside the viewport or any `.reel` scope.
fn is_over_reel(viewport: &web::HtmlElement, ev: &web::WheelEvent) -> bool {
    let Some(node) = ev.target().and_then(|t| t.dyn_into::<web::Node>().ok()) else {
        return false;
    };
    if viewport.contains(Some(&node)) {
        return true;
    }
    node.dyn_ref::<web::Element>()
        .and_then(|el| el.closest(REEL_SCOPE_SELECTOR).ok().flatten())
        .is_some()
}

/// Track position of the tile under a delegated click, if any.
fn clicked_position(ev: &web::MouseEvent) -> Option<usize> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    let tile = target
        .closest(&format!(".{}", REEL_ITEM_CLASS))
        .ok()
        .flatten()?;
    tile.get_attribute(REEL_INDEX_ATTR)?.parse().ok()
}
