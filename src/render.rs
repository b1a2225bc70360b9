use image::{ImageBuffer, Rgb, RgbImage};

use crate::color::Tint;
use crate::fluid::Fluid;

/// Paints a fluid into an image, one `scale`×`scale` block per cell.
pub struct Renderer {
    scale: u32,
    background: Tint,
}

impl Renderer {
    pub fn new(scale: u32, background: Tint) -> Self {
        Self {
            scale: scale.max(1),
            background,
        }
    }

    fn canvas(&self, fluid: &Fluid) -> RgbImage {
        let side = u32::try_from(fluid.size())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.scale);
        ImageBuffer::new(side, side)
    }

    /// Dye tint composited over the background with per-cell alpha.
    pub fn render_density(&self, fluid: &Fluid) -> RgbImage {
        let mut img = self.canvas(fluid);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let cell = fluid.color_at((x / self.scale) as i32, (y / self.scale) as i32);
            *pixel = Rgb(cell.over(self.background));
        }

        img
    }

    /// Red for |vx|, green for |vy|, saturating at `full_scale`.
    pub fn render_velocity(&self, fluid: &Fluid, full_scale: f32) -> RgbImage {
        let mut img = self.canvas(fluid);
        let gain = 255.0 / full_scale.max(f32::EPSILON);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let v = fluid.velocity_at((x / self.scale) as i32, (y / self.scale) as i32);
            let r = (v.x.abs() * gain).min(255.0) as u8;
            let g = (v.y.abs() * gain).min(255.0) as u8;
            *pixel = Rgb([r, g, 128]);
        }

        img
    }
}
