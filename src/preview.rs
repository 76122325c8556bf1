//! Hover clip for one reel tile: a muted looping video that fades in over
//! the thumbnail and is removed once it has faded out.

use crate::constants::{
    INFO_HIDDEN_TRANSFORM, PREVIEW_FADE_MS, PREVIEW_FADE_TRANSITION, PREVIEW_VIDEO_CLASS,
};
use crate::dom;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct HoverPreview {
    tile: web::HtmlElement,
    info: web::HtmlElement,
    src: Option<String>,
    video: Option<web::HtmlVideoElement>,
    pending_removal: Option<i32>,
    hovered: bool,
}

impl HoverPreview {
    pub fn new(tile: web::HtmlElement, info: web::HtmlElement, src: Option<String>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            tile,
            info,
            src,
            video: None,
            pending_removal: None,
            hovered: false,
        }))
    }

    pub fn tile(&self) -> &web::HtmlElement {
        &self.tile
    }

    /// Reveal the caption and start the clip. Re-entering during the fade
    /// out keeps the existing video.
    pub fn enter(this: &Rc<RefCell<Self>>) {
        let mut p = this.borrow_mut();
        p.hovered = true;
        dom::set_styles(&p.info, &[("opacity", "1"), ("transform", "translateY(0)")]);
        p.cancel_removal();

        if p.video.is_none() {
            let Some(src) = p.src.clone() else {
                return;
            };
            match p.create_video(&src) {
                Ok(video) => p.video = Some(video),
                Err(e) => {
                    log::warn!("[reel] preview {}: {:#}", src, e);
                    return;
                }
            }
        }
        if let Some(video) = p.video.clone() {
            play_then_show(Rc::downgrade(this), video);
        }
    }

    /// Hide the caption, fade the clip and drop it after the fade.
    pub fn leave(this: &Rc<RefCell<Self>>) {
        let mut p = this.borrow_mut();
        p.hovered = false;
        dom::set_styles(&p.info, &[("opacity", "0"), ("transform", INFO_HIDDEN_TRANSFORM)]);
        let Some(video) = &p.video else {
            return;
        };
        dom::set_styles(video, &[("opacity", "0")]);
        p.cancel_removal();

        let weak = Rc::downgrade(this);
        let callback = Closure::once_into_js(move || {
            if let Some(this) = weak.upgrade() {
                let mut p = this.borrow_mut();
                p.pending_removal = None;
                p.remove_video();
            }
        });
        p.pending_removal = web::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                PREVIEW_FADE_MS,
            )
            .ok()
        });
    }

    /// Cancel any pending removal and drop the clip now.
    pub fn clear(&mut self) {
        self.hovered = false;
        self.cancel_removal();
        self.remove_video();
    }

    fn create_video(&self, src: &str) -> anyhow::Result<web::HtmlVideoElement> {
        let document = self
            .tile
            .owner_document()
            .ok_or_else(|| anyhow::anyhow!("tile has no document"))?;
        let video = dom::create_html_element(&document, "video")?
            .dyn_into::<web::HtmlVideoElement>()
            .map_err(|e| anyhow::anyhow!("not a video element: {:?}", e))?;
        video.set_src(src);
        video.set_loop(true);
        video.set_muted(true);
        _ = video.set_attribute("playsinline", "");
        video.set_class_name(PREVIEW_VIDEO_CLASS);
        dom::set_styles(
            &video,
            &[
                ("position", "absolute"),
                ("inset", "0"),
                ("width", "100%"),
                ("height", "100%"),
                ("object-fit", "cover"),
                ("opacity", "0"),
                ("transition", PREVIEW_FADE_TRANSITION),
            ],
        );
        self.tile
            .insert_before(&video, Some(&self.info))
            .map_err(|e| anyhow::anyhow!("insert video failed: {:?}", e))?;
        Ok(video)
    }

    fn cancel_removal(&mut self) {
        if let Some(id) = self.pending_removal.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
        }
    }

    fn remove_video(&mut self) {
        if let Some(video) = self.video.take() {
            _ = video.pause();
            video.remove();
        }
    }
}

/// Start playback and fade in once it is running, unless the pointer has
/// already left.
fn play_then_show(preview: Weak<RefCell<HoverPreview>>, video: web::HtmlVideoElement) {
    let promise = match video.play() {
        Ok(p) => p,
        Err(e) => {
            log::info!("[reel] autoplay blocked: {:?}", e);
            return;
        }
    };
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::info!("[reel] autoplay blocked: {:?}", e);
            return;
        }
        let Some(preview) = preview.upgrade() else {
            return;
        };
        let still_hovered = preview.borrow().hovered;
        if still_hovered {
            dom::set_styles(&video, &[("opacity", "1")]);
        }
    });
}
