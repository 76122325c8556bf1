use crate::color::Palette;
use crate::constants::MAX_COLORS;
use crate::params::ShaderParams;
use glam::Vec2;

/// Uniform block consumed by `background.wgsl` and by the CPU field.
/// NOTE: layout must match the WGSL struct (208 bytes, colours 16-aligned).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackgroundUniforms {
    pub canvas: [f32; 2],      // offset 0
    pub time: f32,             // offset 8
    pub speed: f32,            // offset 12
    pub rot: [f32; 2],         // offset 16 (cos, sin)
    pub pointer: [f32; 2],     // offset 24
    pub scale: f32,            // offset 32
    pub frequency: f32,        // offset 36
    pub warp_strength: f32,    // offset 40
    pub mouse_influence: f32,  // offset 44
    pub parallax: f32,         // offset 48
    pub noise: f32,            // offset 52
    pub vignette: f32,         // offset 56
    pub aberration: f32,       // offset 60
    pub color_count: u32,      // offset 64
    pub transparent: u32,      // offset 68
    pub _pad: [f32; 2],        // offset 72
    pub colors: [[f32; 4]; MAX_COLORS], // offset 80
}

impl BackgroundUniforms {
    pub fn pack(
        canvas: Vec2,
        time: f32,
        rotation: f32,
        pointer: Vec2,
        params: &ShaderParams,
        palette: &Palette,
        transparent: bool,
    ) -> Self {
        let mut colors = [[0.0; 4]; MAX_COLORS];
        for (slot, c) in colors.iter_mut().zip(palette.colors()) {
            *slot = [c.x, c.y, c.z, 1.0];
        }
        Self {
            canvas: [canvas.x.max(1.0), canvas.y.max(1.0)],
            time,
            speed: params.speed,
            rot: [rotation.cos(), rotation.sin()],
            pointer: pointer.to_array(),
            scale: params.scale,
            frequency: params.frequency,
            warp_strength: params.warp_strength,
            mouse_influence: params.mouse_influence,
            parallax: params.parallax,
            noise: params.noise,
            vignette: params.vignette,
            aberration: params.aberration,
            color_count: palette.len().min(MAX_COLORS) as u32,
            transparent: transparent as u32,
            _pad: [0.0; 2],
            colors,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn size_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<BackgroundUniforms>(), 208);
        assert_eq!(std::mem::size_of::<BackgroundUniforms>() % 16, 0);
    }

    #[test]
    fn pack_fills_palette_and_zeroes_the_rest() {
        let mut palette = Palette::new();
        palette.push(Vec3::new(1.0, 0.5, 0.25));
        let u = BackgroundUniforms::pack(
            Vec2::new(800.0, 600.0),
            1.0,
            0.0,
            Vec2::ZERO,
            &ShaderParams::default(),
            &palette,
            true,
        );
        assert_eq!(u.color_count, 1);
        assert_eq!(u.colors[0], [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(u.colors[1], [0.0; 4]);
        assert_eq!(u.rot, [1.0, 0.0]);
        assert!(u.is_transparent());
    }

    #[test]
    fn degenerate_canvas_is_floored() {
        let u = BackgroundUniforms::pack(
            Vec2::ZERO,
            0.0,
            0.0,
            Vec2::ZERO,
            &ShaderParams::default(),
            &Palette::new(),
            false,
        );
        assert_eq!(u.canvas, [1.0, 1.0]);
    }
}
