use stablefluid::{AnalysisRecorder, Fluid, FluidMetrics, ImageExporter, Renderer, Tint};

#[test]
fn test_density_render_composites_over_background() {
    let mut fluid = Fluid::new(8);
    fluid.set_color(Tint::new(0, 255, 255));
    fluid.add_density(2, 3, 300.0);

    let renderer = Renderer::new(4, Tint::new(20, 20, 20));
    let img = renderer.render_density(&fluid);
    assert_eq!(img.dimensions(), (32, 32));

    // Saturated cell covers its 4x4 block with the pure tint.
    assert_eq!(img.get_pixel(8, 12).0, [0, 255, 255]);
    assert_eq!(img.get_pixel(11, 15).0, [0, 255, 255]);
    // Empty cells show the background.
    assert_eq!(img.get_pixel(0, 0).0, [20, 20, 20]);
}

#[test]
fn test_half_density_blends() {
    let mut fluid = Fluid::new(4);
    fluid.set_color(Tint::new(200, 100, 0));
    fluid.add_density(1, 1, 127.5);

    let img = Renderer::new(1, Tint::BLACK).render_density(&fluid);
    let [r, g, b] = img.get_pixel(1, 1).0;
    assert!((99..=100).contains(&r), "r = {r}");
    assert!((49..=50).contains(&g), "g = {g}");
    assert_eq!(b, 0);
}

#[test]
fn test_velocity_render_channels() {
    let mut fluid = Fluid::new(4);
    fluid.add_velocity(1, 2, -0.5, 2.0);

    let img = Renderer::new(1, Tint::BLACK).render_velocity(&fluid, 1.0);
    let [r, g, b] = img.get_pixel(1, 2).0;
    assert_eq!(r, 127);
    assert_eq!(g, 255);
    assert_eq!(b, 128);
}

#[test]
fn test_metrics_track_mass_and_divergence() {
    let mut fluid = Fluid::new(32);
    fluid.add_density(16, 16, 100.0);
    fluid.add_density(10, 10, 20.0);
    fluid.add_velocity(16, 16, 1.0, 0.0);

    let metrics = FluidMetrics::analyze(&fluid, 3);
    assert_eq!(metrics.frame, 3);
    assert!((metrics.total_mass - 120.0).abs() < 1e-4);
    assert_eq!(metrics.max_density, 100.0);
    assert_eq!(metrics.max_velocity, 1.0);
    assert!((metrics.kinetic_energy - 0.5).abs() < 1e-6);
    assert!(metrics.mean_divergence > 0.0);

    fluid.update(0.016);
    let after = FluidMetrics::analyze(&fluid, 4);
    assert!(after.mean_divergence < metrics.mean_divergence);
}

#[test]
fn test_recorder_trends_and_json() {
    let mut fluid = Fluid::new(16);
    fluid.add_density(8, 8, 50.0);

    let mut recorder = AnalysisRecorder::new();
    assert!(recorder.mass_change_percent().is_none());

    recorder.record_frame(&fluid, 0);
    fluid.add_density(8, 8, 50.0);
    recorder.record_frame(&fluid, 1);

    let change = recorder.mass_change_percent().unwrap();
    assert!((change - 100.0).abs() < 1e-3);

    let json = recorder.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let history = parsed["metrics_history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["frame"], 1);
}

#[test]
fn test_exporter_writes_files() {
    let dir = std::env::temp_dir().join(format!("stablefluid-export-{}", std::process::id()));
    let exporter = ImageExporter::new(Renderer::new(2, Tint::BLACK), &dir).unwrap();

    let mut fluid = Fluid::new(8);
    fluid.add_density(4, 4, 200.0);
    let mut recorder = AnalysisRecorder::new();
    recorder.record_frame(&fluid, 0);

    let density = exporter.export_density_png(&fluid, 0).unwrap();
    let velocity = exporter.export_velocity_png(&fluid, 0).unwrap();
    let metrics = exporter.export_metrics(&recorder).unwrap();

    assert!(density.ends_with("density_0000.png"));
    assert!(velocity.exists());
    assert!(metrics.exists());

    let img = image::open(&density).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (16, 16));

    std::fs::remove_dir_all(&dir).unwrap();
}
