use reel_core::field::render_rgba8;
use reel_core::BackgroundUniforms;
use wasm_bindgen::{Clamped, JsCast};
use web_sys as web;

/// Software renderer: evaluates the field on the CPU at low resolution and
/// blits it with `putImageData`. CSS stretches the canvas to its box.
pub struct CpuRenderer {
    ctx: web::CanvasRenderingContext2d,
    buffer: Vec<u8>,
    width: u32,
    height: u32,
}

impl CpuRenderer {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context(2d) failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        // size to the fallback budget now, not the full DPR backing store
        let (width, height) = crate::input::fallback_size(canvas.width(), canvas.height());
        let (width, height) = crate::dom::apply_canvas_size(canvas, width, height);
        let (width, height) = (width.max(1), height.max(1));
        log::info!("[cpu] fallback renderer {}x{}", width, height);
        Ok(Self {
            ctx,
            buffer: vec![0; (width * height * 4) as usize],
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.buffer.resize((width * height * 4) as usize, 0);
        }
    }

    pub fn render(&mut self, uniforms: &BackgroundUniforms) -> Result<(), wasm_bindgen::JsValue> {
        render_rgba8(uniforms, self.width, self.height, &mut self.buffer);
        let image = web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&self.buffer[..]),
            self.width,
            self.height,
        )?;
        self.ctx.put_image_data(&image, 0.0, 0.0)
    }
}

/// Swap `old` for a new canvas with the same class and inline style.
pub fn replace_canvas(old: &web::HtmlCanvasElement) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = old
        .owner_document()
        .ok_or_else(|| anyhow::anyhow!("canvas has no document"))?;
    let fresh = crate::dom::create_canvas(&document)?;
    fresh.set_class_name(&old.class_name());
    if let Some(style) = old.get_attribute("style") {
        _ = fresh.set_attribute("style", &style);
    }
    fresh.set_width(old.width());
    fresh.set_height(old.height());
    if old.parent_node().is_some() {
        old.replace_with_with_node_1(&fresh)
            .map_err(|e| anyhow::anyhow!("replace canvas failed: {:?}", e))?;
    }
    Ok(fresh)
}
