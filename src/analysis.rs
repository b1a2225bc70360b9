use rayon::prelude::*;
use serde::Serialize;

use crate::fluid::Fluid;
use crate::solver::divergence_at;

#[derive(Debug, Clone, Serialize)]
pub struct FluidMetrics {
    pub frame: usize,
    pub total_mass: f32,
    pub max_density: f32,
    pub kinetic_energy: f32,
    pub max_velocity: f32,
    /// Mean |divergence| over the interior, same operator as the projection.
    pub mean_divergence: f32,
}

impl FluidMetrics {
    pub fn analyze(fluid: &Fluid, frame: usize) -> Self {
        let density = fluid.density();
        let vx = fluid.velocity_x();
        let vy = fluid.velocity_y();

        let (total_mass, max_density) = density
            .par_iter()
            .map(|&d| (d, d))
            .reduce(|| (0.0, f32::MIN), |(s1, m1), (s2, m2)| (s1 + s2, m1.max(m2)));

        let (kinetic_energy, max_velocity) = vx
            .par_iter()
            .zip(vy.par_iter())
            .map(|(&x, &y)| {
                let speed_sq = x * x + y * y;
                (0.5 * speed_sq, speed_sq.sqrt())
            })
            .reduce(|| (0.0, 0.0), |(e1, m1), (e2, m2)| (e1 + e2, m1.max(m2)));

        let n = fluid.size();
        let interior = (n - 2) as i32;
        let divergence_sum: f32 = (1..=interior)
            .into_par_iter()
            .map(|j| {
                (1..=interior)
                    .map(|i| divergence_at(n, vx, vy, i, j).abs())
                    .sum::<f32>()
            })
            .sum();
        let mean_divergence = divergence_sum / (interior * interior) as f32;

        Self {
            frame,
            total_mass,
            max_density,
            kinetic_energy,
            max_velocity,
            mean_divergence,
        }
    }

    pub fn log_summary(&self) {
        log::info!(
            "frame {}: mass {:.3}, max density {:.3}, energy {:.5}, max velocity {:.5}, divergence {:.3e}",
            self.frame,
            self.total_mass,
            self.max_density,
            self.kinetic_energy,
            self.max_velocity,
            self.mean_divergence
        );
    }
}

#[derive(Debug, Default, Serialize)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, fluid: &Fluid, frame: usize) -> &FluidMetrics {
        self.metrics_history.push(FluidMetrics::analyze(fluid, frame));
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    /// Relative change of total mass between the first and last record, in percent.
    pub fn mass_change_percent(&self) -> Option<f32> {
        let first = self.metrics_history.first()?;
        let last = self.metrics_history.last()?;
        if first.total_mass.abs() < f32::EPSILON {
            return None;
        }
        Some((last.total_mass - first.total_mass) / first.total_mass * 100.0)
    }

    pub fn log_trends(&self) {
        if self.metrics_history.len() < 2 {
            return;
        }
        let first = &self.metrics_history[0];
        let last = &self.metrics_history[self.metrics_history.len() - 1];

        log::info!(
            "mass {:.3} -> {:.3} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            self.mass_change_percent().unwrap_or(0.0)
        );
        log::info!(
            "kinetic energy {:.5} -> {:.5}, max velocity {:.5} -> {:.5}",
            first.kinetic_energy,
            last.kinetic_energy,
            first.max_velocity,
            last.max_velocity
        );
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
