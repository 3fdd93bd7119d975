use eframe::egui::{self, Align2, Frame, Margin, RichText, Sense, Stroke, TextStyle};

use super::style;
use super::TastecastApp;
use crate::egui_app::state::SubmissionState;
use crate::egui_app::view_model;

impl TastecastApp {
    pub(super) fn render_result_panel(&mut self, ui: &mut egui::Ui) {
        let theme = self.controller.ui.theme;
        let palette = style::palette(theme);
        match self.controller.ui.submission.clone() {
            SubmissionState::Idle => {
                ui.label(
                    RichText::new("Submit a recipe to see its predicted traffic.")
                        .color(palette.text_muted),
                );
            }
            SubmissionState::Submitting => {
                ui.label(
                    RichText::new("Contacting the prediction service…")
                        .color(palette.text_muted),
                );
            }
            SubmissionState::Failed(message) => {
                let color = style::status_badge_color(style::StatusTone::Error);
                Frame::new()
                    .fill(style::with_alpha(color, 24))
                    .stroke(Stroke::new(1.0, color))
                    .inner_margin(Margin::symmetric(8, 6))
                    .show(ui, |ui| {
                        ui.label(RichText::new(message).color(color));
                    });
            }
            SubmissionState::Succeeded => {
                let Some(prediction) = self.controller.ui.result.prediction.clone() else {
                    return;
                };
                ui.heading(RichText::new(&prediction.prediction).color(palette.text_primary));
                ui.add_space(4.0);
                let confidence = view_model::confidence_label(prediction.traffic_probability);
                ui.label(
                    RichText::new(format!("Confidence: {confidence}"))
                        .color(palette.text_muted),
                );
                ui.add_space(12.0);
                let slices = view_model::chart_slices(Some(prediction.traffic_probability));
                paint_confidence_ring(ui, &palette, slices, &confidence);
            }
        }
    }
}

fn paint_confidence_ring(
    ui: &mut egui::Ui,
    palette: &style::Palette,
    slices: [f32; 2],
    label: &str,
) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(180.0, 180.0), Sense::hover());
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.5 - 4.0;
    let share = slices[0] / (slices[0] + slices[1]).max(f32::EPSILON);
    let painter = ui.painter();
    paint_ring_sector(painter, center, radius, 0.0, share, palette.chart_fill);
    paint_ring_sector(painter, center, radius, share, 1.0, palette.chart_rest);
    painter.circle_filled(center, radius * 0.62, palette.bg_secondary);
    painter.circle_stroke(center, radius, Stroke::new(1.0, palette.panel_outline));
    let font = TextStyle::Heading.resolve(ui.style());
    painter.text(center, Align2::CENTER_CENTER, label, font, palette.text_primary);
}

/// Fill one slice of the ring. Turns are clockwise fractions of a full
/// revolution starting at twelve o'clock; spans over a quarter turn are
/// painted as several fans so each polygon stays convex.
fn paint_ring_sector(
    painter: &egui::Painter,
    center: egui::Pos2,
    radius: f32,
    start_turn: f32,
    end_turn: f32,
    color: egui::Color32,
) {
    const MIN_SPAN: f32 = 0.0005;
    if end_turn - start_turn <= MIN_SPAN {
        return;
    }
    let mut chunk_start = start_turn;
    while chunk_start < end_turn - MIN_SPAN {
        let chunk_end = (chunk_start + 0.25).min(end_turn);
        let steps = ((chunk_end - chunk_start) * 64.0).ceil().max(2.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for step in 0..=steps {
            let turn = chunk_start + (chunk_end - chunk_start) * (step as f32 / steps as f32);
            let angle = std::f32::consts::TAU * turn - std::f32::consts::FRAC_PI_2;
            points.push(center + radius * egui::vec2(angle.cos(), angle.sin()));
        }
        painter.add(egui::Shape::convex_polygon(points, color, Stroke::NONE));
        chunk_start = chunk_end;
    }
}
