pub mod background;
pub mod blur;
pub mod carousel;
pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod easing;
pub mod field;
pub mod params;
pub mod pointer;
pub mod reel;
pub mod transition;
pub mod uniforms;

pub static BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");

pub use background::*;
pub use blur::*;
pub use carousel::*;
pub use clock::*;
pub use color::*;
pub use config::*;
pub use params::*;
pub use pointer::*;
pub use reel::*;
pub use transition::*;
pub use uniforms::*;
