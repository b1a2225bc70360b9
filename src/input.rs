use glam::Vec2;
use rand::Rng;

use crate::config::{AUTO_VELOCITY_LIMIT, InteractionConfig};
use crate::fluid::Fluid;

/// What the user is doing during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position in canvas pixels while the primary button is held.
    pub brush: Option<Vec2>,
    /// Velocity added to every cell per second.
    pub wind: Vec2,
    /// Drop dye with a random kick at the centre of the grid.
    pub auto_density: bool,
    /// Dye added per brush or auto-density stamp.
    pub amount: f32,
}

/// Turns per-frame user input into solver impulses.
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Canvas pixels per grid cell.
    scale: f32,
    /// Half-width of the random auto-density kick on each axis.
    kick: f32,
    last_brush: Vec2,
}

impl Interaction {
    pub fn new(scale: f32, kick: f32) -> Self {
        Self {
            scale: scale.max(1.0),
            kick: if kick.is_finite() {
                kick.abs().min(AUTO_VELOCITY_LIMIT)
            } else {
                0.0
            },
            last_brush: Vec2::ZERO,
        }
    }

    pub fn from_config(scale: u32, config: &InteractionConfig) -> Self {
        Self::new(scale as f32, config.auto_velocity_range)
    }

    /// Map a canvas pixel position onto a grid cell.
    pub fn cell_of(&self, pixel: Vec2) -> (i32, i32) {
        ((pixel.x / self.scale) as i32, (pixel.y / self.scale) as i32)
    }

    /// Inject this frame's dye and velocity; call before `Fluid::update`.
    pub fn apply<R: Rng + ?Sized>(&mut self, fluid: &mut Fluid, input: &FrameInput, dt: f32, rng: &mut R) {
        if let Some(pixel) = input.brush {
            let (x, y) = self.cell_of(pixel);
            fluid.add_density(x, y, input.amount);

            let drag = pixel - self.last_brush;
            fluid.add_velocity(x, y, drag.x, drag.y);
            self.last_brush = pixel;
        }

        if input.wind != Vec2::ZERO {
            let push = input.wind * dt;
            let n = fluid.size() as i32;
            for j in 0..n {
                for i in 0..n {
                    fluid.add_velocity(i, j, push.x, push.y);
                }
            }
        }

        if input.auto_density {
            let centre = fluid.size() as i32 / 2;
            fluid.add_density(centre, centre, input.amount);
            if self.kick > 0.0 {
                let dx = rng.gen_range(-self.kick..=self.kick);
                let dy = rng.gen_range(-self.kick..=self.kick);
                fluid.add_velocity(centre, centre, dx, dy);
            }
        }
    }
}
