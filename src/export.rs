use std::path::{Path, PathBuf};

use crate::analysis::AnalysisRecorder;
use crate::error::ExportError;
use crate::fluid::Fluid;
use crate::render::Renderer;

/// Writes rendered frames and metrics reports into a directory.
pub struct ImageExporter {
    renderer: Renderer,
    output_dir: PathBuf,
}

impl ImageExporter {
    pub fn new(renderer: Renderer, output_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            renderer,
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export_density_png(&self, fluid: &Fluid, frame: usize) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join(format!("density_{frame:04}.png"));
        self.renderer.render_density(fluid).save(&path)?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn export_velocity_png(&self, fluid: &Fluid, frame: usize) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join(format!("velocity_{frame:04}.png"));
        self.renderer.render_velocity(fluid, 1.0).save(&path)?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }

    pub fn export_metrics(&self, recorder: &AnalysisRecorder) -> Result<PathBuf, ExportError> {
        let path = self.output_dir.join("metrics.json");
        std::fs::write(&path, recorder.to_json()?)?;
        log::info!("wrote {} metric records to {}", recorder.metrics_history.len(), path.display());
        Ok(path)
    }
}
