//! egui renderer for the application UI.

mod chrome;
mod form;
mod result_panel;
pub mod style;

use crate::egui_app::controller::TrafficController;
use crate::egui_app::state::ThemePreference;
use eframe::egui;

/// Smallest window that keeps the form and result panels usable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(560.0, 520.0);

/// Renders the egui UI using the shared controller state.
pub struct TastecastApp {
    controller: TrafficController,
    applied_theme: Option<ThemePreference>,
}

impl TastecastApp {
    /// Create the app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let mut controller = TrafficController::with_default_store();
        controller
            .load_configuration()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller,
            applied_theme: None,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        let theme = self.controller.ui.theme;
        if self.applied_theme == Some(theme) {
            return;
        }
        let mut visuals = match theme {
            ThemePreference::Dark => egui::Visuals::dark(),
            ThemePreference::Light => egui::Visuals::light(),
        };
        style::apply_visuals(theme, &mut visuals);
        ctx.set_visuals(visuals);
        self.applied_theme = Some(theme);
    }

    fn prepare_frame(&mut self, ctx: &egui::Context) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        if self.controller.is_prediction_in_progress()
            || self.controller.is_health_check_in_progress()
        {
            // Keep frames coming while a worker is busy so its result lands
            // without waiting for user input.
            ctx.request_repaint();
        }
    }

    fn render_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_form(ui);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(12.0);
                self.render_result_panel(ui);
            });
        });
    }
}

impl eframe::App for TastecastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.prepare_frame(ctx);
        self.render_top_bar(ctx);
        self.render_status(ctx);
        self.render_central(ctx);
    }
}
