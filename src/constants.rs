// Browser-side tuning constants. Physics and shader constants live in
// `reel_core::constants`; these cover canvas sizing and DOM building.

// Device pixel ratio is capped so 3x phones do not quadruple fragment cost
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// CPU fallback renders at a fraction of the backing size, the browser upscales
pub const FALLBACK_RENDER_SCALE: f64 = 0.25;
pub const FALLBACK_MAX_PIXELS: u32 = 160 * 120;

// Reel DOM
pub const REEL_ITEM_CLASS: &str = "reel-item";
pub const REEL_SCOPE_SELECTOR: &str = ".reel";
pub const REEL_ITEM_PLACEHOLDER_BG: &str = "#e0e0e0";
pub const REEL_INDEX_ATTR: &str = "data-reel-index";
pub const REEL_INFO_CLASS: &str = "reel-info";

// Hover preview
pub const PREVIEW_VIDEO_CLASS: &str = "reel-video";
pub const PREVIEW_FADE_TRANSITION: &str = "opacity 0.4s ease";
pub const PREVIEW_FADE_MS: i32 = 400; // matches the CSS fade before removal
pub const INFO_HIDDEN_TRANSFORM: &str = "translateY(10px)";

// Edge blur DOM
pub const EDGE_BLUR_CLASS: &str = "edge-blur";
pub const EDGE_BLUR_LAYER_BG: &str = "rgba(255,255,255,0.001)"; // non-empty paint so backdrop-filter applies

// Background canvas
pub const BACKGROUND_CANVAS_CLASS: &str = "reel-background";
