use crate::input;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Create an element and cast it to `HtmlElement`.
pub fn create_html_element(document: &web::Document, tag: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create_element({tag}) failed: {:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{tag} is not an HtmlElement: {:?}", e))
}

pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create_element(canvas) failed: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Apply `(property, value)` pairs; failures are ignored like any CSS typo.
pub fn set_styles(el: &web::HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in props {
        _ = style.set_property(name, value);
    }
}

/// Target backing size for `canvas` from its CSS box and the capped DPR.
pub fn canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    input::backing_size(rect.width(), rect.height(), dpr)
}

/// Resize the backing store if it differs. Returns the current size.
pub fn apply_canvas_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) -> (u32, u32) {
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
    (canvas.width(), canvas.height())
}

/// Serialize a JS value through `JSON.stringify`. `undefined`, `null` and
/// non-serializable values read as `None`.
pub fn to_json(value: &JsValue) -> Option<String> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(value).ok().map(String::from)
}

pub fn parse_json(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap_or(JsValue::NULL)
}
