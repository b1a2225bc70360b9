use serde::{Deserialize, Serialize};

pub const MIN_SPEED: i32 = 0;
pub const MAX_SPEED: i32 = 20;
pub const DEFAULT_SPEED: i32 = 7;

/// Physical constants of the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Thickness of the fluid; drives velocity diffusion.
    pub viscosity: f32,
    /// How fast dye spreads on its own.
    pub diffusion: f32,
    /// Relaxation sweeps per linear solve, shared by diffusion and pressure.
    pub iterations: usize,
    /// Centre multiplier of the diffusion stencil (see `solver::diffuse`).
    pub diffusion_weight: f32,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            viscosity: 0.000_000_1,
            diffusion: 0.000_001,
            iterations: 32,
            diffusion_weight: 5.0,
        }
    }
}

/// Clamp a requested motion speed to the supported range.
pub fn clamp_speed(speed: i32) -> i32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}
