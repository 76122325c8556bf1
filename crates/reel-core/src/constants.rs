// Shared shader/physics tuning constants used by the core and the web frontend.

// Palette
pub const MAX_COLORS: usize = 8; // uniform array length in the shader

// Frame pacing
pub const MAX_FRAME_DELTA_SEC: f32 = 0.05; // clamp after tab backgrounding

// Pointer
pub const POINTER_SMOOTHING_PER_SEC: f32 = 8.0; // exponential low-pass rate

// Field synthesis
pub const SCALE_EPSILON: f32 = 1e-4; // floor for the scale divisor
pub const LENS_DISTORTION: f32 = 0.12; // barrel distortion strength
pub const ABERRATION_BASE: f32 = 0.002;
pub const ABERRATION_RADIAL: f32 = 0.010; // grows with squared radius
pub const TONE_GAIN: f32 = 0.85;
pub const TONE_GAMMA: f32 = 1.08; // slightly deeper mids
pub const VIGNETTE_INNER: f32 = 0.2;
pub const VIGNETTE_OUTER: f32 = 1.15;
pub const NOISE_MIN: f32 = 1e-4; // grain below this is skipped

// Parameter transitions
pub const DEFAULT_TRANSITION_SEC: f32 = 0.8;

// Carousel
pub const REEL_COPIES: usize = 3; // middle copy is the one rendered at rest
pub const DRAG_THRESHOLD_PX: f64 = 5.0;
pub const DRAG_GAIN: f64 = 1.5;
pub const FLING_GAIN: f64 = 15.0; // single impulse on release
pub const SCROLL_EASE: f64 = 0.08; // per-frame approach factor
pub const CLICK_SUPPRESS_MS: u64 = 50;
pub const WHEEL_GAIN: f64 = 1.0; // trackpad and wheel share one gain
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
