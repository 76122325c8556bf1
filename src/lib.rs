#![cfg(target_arch = "wasm32")]
use reel_core::{BackgroundConfig, EdgeBlurConfig, ParamPatch, Reel};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod background;
mod blur;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod preview;
mod reel;
mod render;

fn to_js_error(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("reel-web starting");
    Ok(())
}

// ===================== Background =====================

/// Handle returned by `initBackground`.
#[wasm_bindgen]
pub struct BackgroundHandle {
    mount: Option<background::BackgroundMount>,
}

#[wasm_bindgen]
impl BackgroundHandle {
    /// Ease toward any subset of the shader parameters.
    #[wasm_bindgen(js_name = setParams)]
    pub fn set_params(&self, partial: JsValue) {
        let Some(mount) = &self.mount else {
            return;
        };
        let Some(json) = dom::to_json(&partial) else {
            return;
        };
        match ParamPatch::from_json(&json) {
            Ok(patch) => mount.set_params(&patch),
            Err(e) => log::warn!("[background] ignoring setParams: {}", e),
        }
    }

    pub fn destroy(&mut self) {
        if let Some(mut m) = self.mount.take() {
            m.destroy();
        }
    }
}

/// Mount the shader background into `container`. Unknown or malformed
/// config falls back to defaults.
#[wasm_bindgen(js_name = initBackground)]
pub fn init_background(container: web::HtmlElement, config: JsValue) -> Result<BackgroundHandle, JsValue> {
    let config = match dom::to_json(&config) {
        Some(json) => BackgroundConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("[background] {}; using defaults", e);
            BackgroundConfig::default()
        }),
        None => BackgroundConfig::default(),
    };
    let mount = background::BackgroundMount::mount(&container, config).map_err(to_js_error)?;
    Ok(BackgroundHandle { mount: Some(mount) })
}

// ===================== Reel =====================

#[wasm_bindgen]
pub struct ReelHandle {
    mount: Option<reel::ReelMount>,
}

#[wasm_bindgen]
impl ReelHandle {
    /// Re-read the track layout. Returns false while it has no width yet.
    pub fn measure(&self) -> bool {
        self.mount.as_ref().is_some_and(|m| m.measure())
    }

    pub fn destroy(&mut self) {
        if let Some(mut m) = self.mount.take() {
            m.destroy();
        }
    }
}

/// Build the tripled track inside `track` and drive it from wheel and drag
/// input on `viewport`. `onOpen(item, index)` fires for accepted clicks.
#[wasm_bindgen(js_name = initReel)]
pub fn init_reel(
    viewport: web::HtmlElement,
    track: web::HtmlElement,
    items: JsValue,
    on_open: js_sys::Function,
) -> Result<ReelHandle, JsValue> {
    let json = dom::to_json(&items).unwrap_or_else(|| "[]".into());
    let reel = Reel::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if reel.is_empty() {
        log::warn!("[reel] no items; track stays empty");
    }
    let mount = reel::ReelMount::mount(viewport, track, reel, on_open).map_err(to_js_error)?;
    Ok(ReelHandle { mount: Some(mount) })
}

// ===================== Edge blur =====================

#[wasm_bindgen]
pub struct EdgeBlurHandle {
    mount: Option<blur::EdgeBlurMount>,
}

#[wasm_bindgen]
impl EdgeBlurHandle {
    pub fn destroy(&mut self) {
        if let Some(mut m) = self.mount.take() {
            m.destroy();
        }
    }
}

#[wasm_bindgen(js_name = initEdgeBlur)]
pub fn init_edge_blur(target: web::HtmlElement, config: JsValue) -> Result<EdgeBlurHandle, JsValue> {
    let config = match dom::to_json(&config) {
        Some(json) => EdgeBlurConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("[blur] {}; using defaults", e);
            EdgeBlurConfig::default()
        }),
        None => EdgeBlurConfig::default(),
    };
    let mount = blur::EdgeBlurMount::mount(&target, &config).map_err(to_js_error)?;
    Ok(EdgeBlurHandle { mount: Some(mount) })
}
