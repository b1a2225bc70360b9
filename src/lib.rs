//! Real-time 2D stable-fluids simulation with a paintable dye layer.

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod fluid;
pub mod grid;
pub mod input;
pub mod params;
pub mod render;
pub mod solver;

pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use app::FluidApp;
pub use color::{Rgba, Tint};
pub use config::Config;
pub use error::{ConfigError, ExportError};
pub use export::ImageExporter;
pub use fluid::Fluid;
pub use grid::{Boundary, DEFAULT_SIZE, index};
pub use input::{FrameInput, Interaction};
pub use params::SolverParams;
pub use render::Renderer;
