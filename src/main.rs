use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use stablefluid::config::{DEFAULT_CONFIG_PATH, DYE_AMOUNT_MAX, DYE_AMOUNT_MIN};
use stablefluid::{
    AnalysisRecorder, Config, FluidApp, FrameInput, ImageExporter, Interaction, Renderer,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let headless = args.get(1).is_some_and(|a| a == "headless");
    let config_arg = if headless { args.get(2) } else { args.get(1) };
    let config_path = config_arg.map_or(Path::new(DEFAULT_CONFIG_PATH), |p| Path::new(p));

    let config = Config::load_or_default(config_path);

    if headless {
        run_headless(&config)?;
    } else {
        run_gui(config)?;
    }

    Ok(())
}

fn run_headless(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let headless = &config.headless;
    log::info!(
        "headless run: {} frames at dt {:.4} on a {}x{} grid",
        headless.frames,
        headless.dt,
        config.solver.grid_size,
        config.solver.grid_size
    );

    let mut fluid = stablefluid::Fluid::with_params(config.solver.grid_size, config.solver.params);
    fluid.set_color(config.display.fluid_color);
    fluid.set_speed(config.interaction.speed);

    let renderer = Renderer::new(config.display.scale, config.display.background);
    let exporter = ImageExporter::new(renderer, &headless.output_dir)?;
    let mut interaction = Interaction::from_config(config.display.scale, &config.interaction);
    let mut recorder = AnalysisRecorder::new();
    let mut rng = StdRng::seed_from_u64(0);

    let input = FrameInput {
        brush: None,
        wind: config.interaction.wind(),
        auto_density: config.interaction.auto_density,
        amount: config
            .interaction
            .dye_amount
            .clamp(DYE_AMOUNT_MIN, DYE_AMOUNT_MAX),
    };

    recorder.record_frame(&fluid, 0);
    for frame in 1..=headless.frames {
        interaction.apply(&mut fluid, &input, headless.dt, &mut rng);
        fluid.update(headless.dt);

        let metrics = recorder.record_frame(&fluid, frame);
        if frame % headless.export_stride == 0 {
            metrics.log_summary();
            exporter.export_density_png(&fluid, frame)?;
            exporter.export_velocity_png(&fluid, frame)?;
        }
    }

    recorder.log_trends();
    exporter.export_metrics(&recorder)?;
    log::info!("frames written to {}", exporter.output_dir().display());
    Ok(())
}

fn run_gui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(FluidApp::window_size(&config))
            .with_resizable(false)
            .with_title("Fluid Simulation"),
        ..Default::default()
    };

    eframe::run_native(
        "stablefluid",
        options,
        Box::new(move |_cc| Box::new(FluidApp::new(&config))),
    )?;
    Ok(())
}
