use std::time::Duration;

use eframe::egui;
use glam::Vec2;

use crate::color::Tint;
use crate::config::{Config, DYE_AMOUNT_MAX, DYE_AMOUNT_MIN, DisplayConfig, InteractionConfig, WIND_LIMIT, WIND_STEP};
use crate::fluid::Fluid;
use crate::input::{FrameInput, Interaction};
use crate::params::{MAX_SPEED, MIN_SPEED};

pub const PANEL_WIDTH: f32 = 200.0;

pub struct FluidApp {
    fluid: Fluid,
    interaction: Interaction,
    scale: f32,
    background: Tint,
    speed: i32,
    dye_amount: f32,
    wind_x: i32,
    wind_y: i32,
    auto_density: bool,
    paused: bool,
    frame_count: usize,
    frame_interval: Duration,
}

impl FluidApp {
    pub fn new(config: &Config) -> Self {
        let mut fluid = Fluid::with_params(config.solver.grid_size, config.solver.params);
        fluid.set_color(config.display.fluid_color);
        fluid.set_speed(config.interaction.speed);

        Self {
            fluid,
            interaction: Interaction::from_config(config.display.scale, &config.interaction),
            scale: config.display.scale as f32,
            background: config.display.background,
            speed: config.interaction.speed,
            dye_amount: config.interaction.dye_amount,
            wind_x: config.interaction.wind_x,
            wind_y: config.interaction.wind_y,
            auto_density: config.interaction.auto_density,
            paused: false,
            frame_count: 0,
            frame_interval: config.display.frame_interval(),
        }
    }

    /// Inner window size fitting the canvas plus the control panel.
    pub fn window_size(config: &Config) -> [f32; 2] {
        let canvas = config.canvas_side().unwrap_or(u32::MAX) as f32;
        [canvas + PANEL_WIDTH, canvas]
    }

    fn restore_defaults(&mut self) {
        let display = DisplayConfig::default();
        let interaction = InteractionConfig::default();

        self.background = display.background;
        self.fluid.set_color(display.fluid_color);
        self.speed = interaction.speed;
        self.fluid.set_speed(self.speed);
        self.wind_x = 0;
        self.wind_y = 0;
        self.dye_amount = interaction.dye_amount;
        self.auto_density = false;
        log::info!("controls reset to defaults");
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Background Color:");
        let mut bg = [self.background.r, self.background.g, self.background.b];
        if ui.color_edit_button_srgb(&mut bg).changed() {
            self.background = Tint::new(bg[0], bg[1], bg[2]);
        }

        ui.label("Fluid Color:");
        let tint = self.fluid.color();
        let mut fg = [tint.r, tint.g, tint.b];
        if ui.color_edit_button_srgb(&mut fg).changed() {
            self.fluid.set_color(Tint::new(fg[0], fg[1], fg[2]));
        }

        ui.label("Motion Speed:");
        if ui.add(egui::Slider::new(&mut self.speed, MIN_SPEED..=MAX_SPEED)).changed() {
            self.fluid.set_speed(self.speed);
        }

        ui.label("Velocity X:");
        ui.add(egui::Slider::new(&mut self.wind_x, -WIND_LIMIT..=WIND_LIMIT));
        ui.label("Velocity Y:");
        ui.add(egui::Slider::new(&mut self.wind_y, -WIND_LIMIT..=WIND_LIMIT));

        ui.label("Density (dye amount):");
        ui.add(egui::Slider::new(&mut self.dye_amount, DYE_AMOUNT_MIN..=DYE_AMOUNT_MAX));

        ui.checkbox(&mut self.auto_density, "Automatic Density");

        ui.separator();

        if ui.button("Reset to defaults").clicked() {
            self.restore_defaults();
        }
        if ui.button("Clear").clicked() {
            self.fluid.reset();
        }
        if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
            self.paused = !self.paused;
        }

        ui.separator();
        ui.label(format!("Frame: {}", self.frame_count));
        ui.label(format!("Grid: {0}x{0}", self.fluid.size()));
    }

    fn canvas(&mut self, ui: &mut egui::Ui, dt: f32) {
        let side = self.fluid.size() as f32 * self.scale;
        let (rect, response) =
            ui.allocate_exact_size(egui::Vec2::splat(side), egui::Sense::click_and_drag());

        let brush = if response.is_pointer_button_down_on() {
            response
                .interact_pointer_pos()
                .map(|pos| Vec2::new(pos.x - rect.left(), pos.y - rect.top()))
        } else {
            None
        };

        if !self.paused {
            let input = FrameInput {
                brush,
                wind: Vec2::new(self.wind_x as f32, self.wind_y as f32) * WIND_STEP,
                auto_density: self.auto_density,
                amount: self.dye_amount,
            };
            self.interaction
                .apply(&mut self.fluid, &input, dt, &mut rand::thread_rng());
            self.fluid.update(dt);
            self.frame_count += 1;
        }

        let painter = ui.painter_at(rect);
        let bg = self.background;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(bg.r, bg.g, bg.b));

        let n = self.fluid.size() as i32;
        for j in 0..n {
            for i in 0..n {
                let cell = self.fluid.color_at(i, j);
                if cell.a == 0 {
                    continue;
                }
                let min = egui::Pos2::new(
                    rect.left() + i as f32 * self.scale,
                    rect.top() + j as f32 * self.scale,
                );
                painter.rect_filled(
                    egui::Rect::from_min_size(min, egui::Vec2::splat(self.scale)),
                    0.0,
                    egui::Color32::from_rgba_unmultiplied(cell.r, cell.g, cell.b, cell.a),
                );
            }
        }
    }
}

impl eframe::App for FluidApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);

        egui::SidePanel::right("controls")
            .exact_width(PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas(ui, dt));

        ctx.request_repaint_after(self.frame_interval);
    }
}
