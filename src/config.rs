use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Tint;
use crate::error::ConfigError;
use crate::grid::DEFAULT_SIZE;
use crate::params::{DEFAULT_SPEED, SolverParams};

pub const DEFAULT_CONFIG_PATH: &str = "stablefluid.json";

/// Wind slider units to cells per second.
pub const WIND_STEP: f32 = 0.05;
pub const WIND_LIMIT: i32 = 100;
pub const DYE_AMOUNT_MIN: f32 = 500.0;
pub const DYE_AMOUNT_MAX: f32 = 3000.0;
/// Largest auto-density kick accepted, in cells per second.
pub const AUTO_VELOCITY_LIMIT: f32 = 1000.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverConfig,
    pub display: DisplayConfig,
    pub interaction: InteractionConfig,
    pub headless: HeadlessConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub grid_size: usize,
    #[serde(flatten)]
    pub params: SolverParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Canvas pixels per grid cell.
    pub scale: u32,
    pub target_fps: u32,
    pub background: Tint,
    pub fluid_color: Tint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub speed: i32,
    pub dye_amount: f32,
    pub auto_density: bool,
    pub auto_velocity_range: f32,
    /// Slider units; multiplied by `WIND_STEP`.
    pub wind_x: i32,
    pub wind_y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    pub frames: usize,
    pub dt: f32,
    pub output_dir: PathBuf,
    /// Export a PNG every this many frames.
    pub export_stride: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_SIZE,
            params: SolverParams::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: 5,
            target_fps: 60,
            background: Tint::BLACK,
            fluid_color: Tint::CYAN,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            dye_amount: 1000.0,
            auto_density: true,
            auto_velocity_range: 3.0,
            wind_x: 0,
            wind_y: 0,
        }
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            dt: 1.0 / 60.0,
            output_dir: PathBuf::from("frames"),
            export_stride: 10,
        }
    }
}

impl DisplayConfig {
    /// Time between repaints at `target_fps`.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.target_fps.max(1) as f32)
    }
}

impl InteractionConfig {
    pub fn wind(&self) -> glam::Vec2 {
        glam::Vec2::new(self.wind_x as f32, self.wind_y as f32) * WIND_STEP
    }
}

impl Config {
    /// Side of the rendered canvas in pixels, `None` if it overflows.
    pub fn canvas_side(&self) -> Option<u32> {
        u32::try_from(self.solver.grid_size)
            .ok()?
            .checked_mul(self.display.scale)
    }

    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    /// Load `path`, falling back to defaults when it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solver.grid_size < 3 {
            return Err(ConfigError::Invalid(format!(
                "solver.grid_size must be at least 3, got {}",
                self.solver.grid_size
            )));
        }
        if self.solver.params.iterations == 0 {
            return Err(ConfigError::Invalid(
                "solver.iterations must be positive".to_string(),
            ));
        }
        if self.display.scale == 0 {
            return Err(ConfigError::Invalid("display.scale must be positive".to_string()));
        }
        if self.canvas_side().is_none() {
            return Err(ConfigError::Invalid(format!(
                "canvas of {} cells at scale {} is too large",
                self.solver.grid_size, self.display.scale
            )));
        }
        if self.display.target_fps == 0 {
            return Err(ConfigError::Invalid("display.target_fps must be positive".to_string()));
        }
        let amount = self.interaction.dye_amount;
        if !(DYE_AMOUNT_MIN..=DYE_AMOUNT_MAX).contains(&amount) {
            return Err(ConfigError::Invalid(format!(
                "interaction.dye_amount must be in {DYE_AMOUNT_MIN}..={DYE_AMOUNT_MAX}, got {amount}"
            )));
        }
        let range = self.interaction.auto_velocity_range;
        if !(range.is_finite() && range.abs() <= AUTO_VELOCITY_LIMIT) {
            return Err(ConfigError::Invalid(format!(
                "interaction.auto_velocity_range must be within ±{AUTO_VELOCITY_LIMIT}, got {range}"
            )));
        }
        if self.headless.export_stride == 0 {
            return Err(ConfigError::Invalid(
                "headless.export_stride must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.solver.grid_size, 120);
        assert_eq!(cfg.solver.params.iterations, 32);
        assert_eq!(cfg.solver.params.diffusion_weight, 5.0);
        assert_eq!(cfg.display.scale, 5);
        assert_eq!(cfg.display.fluid_color, Tint::CYAN);
        assert_eq!(cfg.display.background, Tint::BLACK);
        assert_eq!(cfg.interaction.speed, 7);
        assert_eq!(cfg.interaction.dye_amount, 1000.0);
        assert!(cfg.interaction.auto_density);
        assert_eq!(cfg.headless.export_stride, 10);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "solver": { "grid_size": 64, "iterations": 8 }, "interaction": { "speed": 3 } }"#;
        let cfg = Config::from_json(Path::new("test.json"), json).unwrap();
        assert_eq!(cfg.solver.grid_size, 64);
        assert_eq!(cfg.solver.params.iterations, 8);
        assert_eq!(cfg.solver.params.diffusion_weight, 5.0); // default
        assert_eq!(cfg.interaction.speed, 3);
        assert_eq!(cfg.interaction.dye_amount, 1000.0); // default
        assert_eq!(cfg.display.scale, 5); // default
    }

    #[test]
    fn test_colors_and_wind() {
        let json = r#"{
            "display": { "fluid_color": { "r": 255, "g": 0, "b": 128 } },
            "interaction": { "wind_x": 20, "wind_y": -40 }
        }"#;
        let cfg = Config::from_json(Path::new("test.json"), json).unwrap();
        assert_eq!(cfg.display.fluid_color, Tint::new(255, 0, 128));
        let wind = cfg.interaction.wind();
        assert!((wind.x - 1.0).abs() < 1e-6);
        assert!((wind.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let json = r#"{ "solver": { "grid_size": 2 } }"#;
        let err = Config::from_json(Path::new("test.json"), json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_huge_auto_velocity_range() {
        let json = r#"{ "interaction": { "auto_velocity_range": 3.0e38 } }"#;
        let err = Config::from_json(Path::new("test.json"), json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let json = r#"{ "interaction": { "auto_velocity_range": -12.5 } }"#;
        assert!(Config::from_json(Path::new("test.json"), json).is_ok());
    }

    #[test]
    fn test_dye_amount_range() {
        for amount in ["499.0", "3000.5", "-1000.0"] {
            let json = format!(r#"{{ "interaction": {{ "dye_amount": {amount} }} }}"#);
            let err = Config::from_json(Path::new("test.json"), &json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{amount} accepted");
        }
        for amount in ["500.0", "3000.0"] {
            let json = format!(r#"{{ "interaction": {{ "dye_amount": {amount} }} }}"#);
            assert!(Config::from_json(Path::new("test.json"), &json).is_ok(), "{amount} rejected");
        }
    }

    #[test]
    fn test_target_fps() {
        let cfg = Config::default();
        let interval = cfg.display.frame_interval().as_secs_f32();
        assert!((interval - 1.0 / 60.0).abs() < 1e-6);

        let json = r#"{ "display": { "target_fps": 0 } }"#;
        let err = Config::from_json(Path::new("test.json"), json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_overflowing_canvas() {
        assert_eq!(Config::default().canvas_side(), Some(600));

        let json = r#"{ "solver": { "grid_size": 100000 }, "display": { "scale": 50000 } }"#;
        let err = Config::from_json(Path::new("test.json"), json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Config::from_json(Path::new("test.json"), "{ solver: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let cfg = Config::load_or_default(Path::new("definitely-not-here.json"));
        assert_eq!(cfg, Config::default());
    }
}
