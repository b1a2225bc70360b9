use glam::Vec2;

use crate::color::{Rgba, Tint};
use crate::grid::{self, Boundary, DEFAULT_SIZE};
use crate::params::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, SolverParams, clamp_speed};
use crate::solver;

/// Square stable-fluids simulation with a dye layer.
///
/// All fields are `size * size` long and allocated once in [`Fluid::new`].
/// `prev_velocity_x`/`prev_velocity_y` and `density_source` are scratch
/// buffers between the stages of [`Fluid::update`]; only `density` and the
/// velocity pair carry state from one frame to the next.
#[derive(Debug, Clone)]
pub struct Fluid {
    size: usize,
    density: Vec<f32>,
    density_source: Vec<f32>,
    velocity_x: Vec<f32>,
    velocity_y: Vec<f32>,
    prev_velocity_x: Vec<f32>,
    prev_velocity_y: Vec<f32>,
    params: SolverParams,
    speed: i32,
    motion_speed: f32,
    color: Tint,
}

impl Default for Fluid {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl Fluid {
    /// Create an empty fluid with default parameters.
    ///
    /// # Panics
    ///
    /// Panics if `size < 3`; the grid needs at least one interior cell.
    pub fn new(size: usize) -> Self {
        Self::with_params(size, SolverParams::default())
    }

    pub fn with_params(size: usize, params: SolverParams) -> Self {
        assert!(size >= 3, "fluid grid needs at least 3x3 cells, got {size}");

        let cells = size * size;
        log::debug!("allocating {size}x{size} fluid grid ({cells} cells)");

        Self {
            size,
            density: vec![0.0; cells],
            density_source: vec![0.0; cells],
            velocity_x: vec![0.0; cells],
            velocity_y: vec![0.0; cells],
            prev_velocity_x: vec![0.0; cells],
            prev_velocity_y: vec![0.0; cells],
            params,
            speed: DEFAULT_SPEED,
            motion_speed: 0.0,
            color: Tint::CYAN,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn index(&self, x: i32, y: i32) -> usize {
        grid::index(self.size, x, y)
    }

    pub fn add_density(&mut self, x: i32, y: i32, amount: f32) {
        let idx = self.index(x, y);
        self.density[idx] += amount;
    }

    pub fn add_velocity(&mut self, x: i32, y: i32, dx: f32, dy: f32) {
        let idx = self.index(x, y);
        self.velocity_x[idx] += dx;
        self.velocity_y[idx] += dy;
    }

    /// Advance the simulation by `dt` seconds of wall-clock time.
    pub fn update(&mut self, dt: f32) {
        let n = self.size;
        let iterations = self.params.iterations;
        let weight = self.params.diffusion_weight;
        self.motion_speed = self.speed as f32 * dt;
        let dt = self.motion_speed;

        // Velocity diffuses out of the current pair into the scratch pair.
        solver::diffuse(
            n,
            Boundary::VelocityX,
            &mut self.prev_velocity_x,
            &self.velocity_x,
            self.params.viscosity,
            dt,
            weight,
            iterations,
        );
        solver::diffuse(
            n,
            Boundary::VelocityY,
            &mut self.prev_velocity_y,
            &self.velocity_y,
            self.params.viscosity,
            dt,
            weight,
            iterations,
        );

        // The current pair is free now: pressure and divergence scratch.
        solver::project(
            n,
            &mut self.prev_velocity_x,
            &mut self.prev_velocity_y,
            &mut self.velocity_x,
            &mut self.velocity_y,
            iterations,
        );

        // Self-advection back into the current pair.
        solver::advect(
            n,
            Boundary::VelocityX,
            &mut self.velocity_x,
            &self.prev_velocity_x,
            &self.prev_velocity_x,
            &self.prev_velocity_y,
            dt,
        );
        solver::advect(
            n,
            Boundary::VelocityY,
            &mut self.velocity_y,
            &self.prev_velocity_y,
            &self.prev_velocity_x,
            &self.prev_velocity_y,
            dt,
        );

        solver::project(
            n,
            &mut self.velocity_x,
            &mut self.velocity_y,
            &mut self.prev_velocity_x,
            &mut self.prev_velocity_y,
            iterations,
        );

        // Dye: diffuse into the source buffer, then carry it back along the flow.
        solver::diffuse(
            n,
            Boundary::Scalar,
            &mut self.density_source,
            &self.density,
            self.params.diffusion,
            dt,
            weight,
            iterations,
        );
        solver::advect(
            n,
            Boundary::Scalar,
            &mut self.density,
            &self.density_source,
            &self.velocity_x,
            &self.velocity_y,
            dt,
        );
    }

    /// Zero every field, keeping parameters and colour.
    pub fn reset(&mut self) {
        for field in [
            &mut self.density,
            &mut self.density_source,
            &mut self.velocity_x,
            &mut self.velocity_y,
            &mut self.prev_velocity_x,
            &mut self.prev_velocity_y,
        ] {
            field.fill(0.0);
        }
        log::info!("fluid reset");
    }

    /// Render colour of a cell: the tint, with the clamped dye amount as alpha.
    pub fn color_at(&self, x: i32, y: i32) -> Rgba {
        let density = self.density_at(x, y).max(0.0).min(255.0);
        self.color.with_alpha(density as u8)
    }

    pub fn density_at(&self, x: i32, y: i32) -> f32 {
        self.density[self.index(x, y)]
    }

    pub fn velocity_at(&self, x: i32, y: i32) -> Vec2 {
        let idx = self.index(x, y);
        Vec2::new(self.velocity_x[idx], self.velocity_y[idx])
    }

    pub fn density(&self) -> &[f32] {
        &self.density
    }

    pub fn velocity_x(&self) -> &[f32] {
        &self.velocity_x
    }

    pub fn velocity_y(&self) -> &[f32] {
        &self.velocity_y
    }

    pub fn color(&self) -> Tint {
        self.color
    }

    pub fn set_color(&mut self, color: Tint) {
        self.color = color;
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Set the motion speed multiplier, clamped to `[MIN_SPEED, MAX_SPEED]`.
    pub fn set_speed(&mut self, speed: i32) {
        let clamped = clamp_speed(speed);
        if clamped != speed {
            log::warn!("speed {speed} out of range {MIN_SPEED}..={MAX_SPEED}, using {clamped}");
        }
        self.speed = clamped;
    }

    /// `speed * dt` of the most recent update.
    pub fn motion_speed(&self) -> f32 {
        self.motion_speed
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SolverParams) {
        log::debug!("solver params changed: {params:?}");
        self.params = params;
    }
}
