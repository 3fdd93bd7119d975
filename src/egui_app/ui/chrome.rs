use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

use super::style;
use super::TastecastApp;
use crate::egui_app::state::ServiceHealthState;

const APP_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

impl TastecastApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let theme = self.controller.ui.theme;
        let palette = style::palette(theme);
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke(theme))
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Tastecast")
                            .color(palette.text_primary)
                            .strong(),
                    );
                    ui.add_space(8.0);
                    ui.separator();
                    ui.label(
                        RichText::new(self.controller.service_base_url().to_string())
                            .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Close").color(palette.text_primary))
                            .clicked()
                        {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                        if ui.button(theme.toggle_label()).clicked() {
                            self.controller.toggle_theme();
                        }
                    });
                });
            });
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let theme = self.controller.ui.theme;
        let palette = style::palette(theme);
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke(theme))
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::section_stroke(theme),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                    ui.allocate_ui_with_layout(
                        ui.available_size(),
                        egui::Layout::right_to_left(egui::Align::Center),
                        |ui| {
                            ui.label(RichText::new(APP_VERSION).color(palette.text_muted));
                            ui.separator();
                            self.render_health_summary(ui, &palette);
                        },
                    );
                });
            });
    }

    fn render_health_summary(&mut self, ui: &mut egui::Ui, palette: &style::Palette) {
        match &self.controller.ui.health {
            ServiceHealthState::Unknown => {
                if ui.button("Check service").clicked() {
                    self.controller.check_service_health();
                }
            }
            ServiceHealthState::Checking => {
                ui.label(RichText::new("Checking service…").color(palette.text_muted));
            }
            ServiceHealthState::Reachable => {
                ui.label(
                    RichText::new("Service online")
                        .color(style::status_badge_color(style::StatusTone::Info)),
                );
            }
            ServiceHealthState::Unreachable(_) => {
                if ui
                    .button(
                        RichText::new("Service offline, retry")
                            .color(style::status_badge_color(style::StatusTone::Warning)),
                    )
                    .clicked()
                {
                    self.controller.check_service_health();
                }
            }
        }
    }
}
