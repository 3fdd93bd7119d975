use eframe::egui::{self, Frame, Margin, RichText, Stroke};

use super::style;
use super::TastecastApp;
use crate::recipe::{FormField, ALL_CATEGORIES};

const FIELD_WIDTH: f32 = 200.0;

impl TastecastApp {
    pub(super) fn render_form(&mut self, ui: &mut egui::Ui) {
        let theme = self.controller.ui.theme;
        let palette = style::palette(theme);
        let submitting = self.controller.ui.submission.is_submitting();

        ui.label(
            RichText::new("Recipe details")
                .color(palette.text_primary)
                .strong(),
        );
        ui.add_space(8.0);

        {
            let fields = &mut self.controller.ui.form.fields;
            ui.columns(2, |columns| {
                numeric_field(
                    &mut columns[0],
                    &palette,
                    !submitting,
                    FormField::Calories,
                    &mut fields.calories,
                    "e.g. 280.5",
                );
                numeric_field(
                    &mut columns[1],
                    &palette,
                    !submitting,
                    FormField::Carbohydrate,
                    &mut fields.carbohydrate,
                    "grams",
                );
                numeric_field(
                    &mut columns[0],
                    &palette,
                    !submitting,
                    FormField::Sugar,
                    &mut fields.sugar,
                    "grams",
                );
                numeric_field(
                    &mut columns[1],
                    &palette,
                    !submitting,
                    FormField::Protein,
                    &mut fields.protein,
                    "grams",
                );

                let column = &mut columns[0];
                column.label(
                    RichText::new(FormField::Category.label()).color(palette.text_primary),
                );
                let selected_label = fields
                    .category
                    .map(|category| category.label())
                    .unwrap_or("Select a category");
                column.add_enabled_ui(!submitting, |ui| {
                    egui::ComboBox::from_id_salt("recipe_category_combo")
                        .width(FIELD_WIDTH)
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for category in ALL_CATEGORIES {
                                let selected = fields.category == Some(category);
                                if ui.selectable_label(selected, category.label()).clicked() {
                                    fields.category = Some(category);
                                }
                            }
                        });
                });
                column.add_space(8.0);

                numeric_field(
                    &mut columns[1],
                    &palette,
                    !submitting,
                    FormField::Servings,
                    &mut fields.servings,
                    "whole number",
                );
            });
        }

        if let Some(message) = self.controller.ui.form.validation_message.clone() {
            ui.add_space(4.0);
            let color = style::status_badge_color(style::StatusTone::Warning);
            Frame::new()
                .fill(style::with_alpha(color, 24))
                .stroke(Stroke::new(1.0, color))
                .inner_margin(Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.label(RichText::new(message).color(color));
                });
            ui.add_space(4.0);
        }

        ui.add_space(6.0);
        let mut submit_clicked = false;
        let mut reset_clicked = false;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!submitting, egui::Button::new("Predict traffic"))
                .clicked()
            {
                submit_clicked = true;
            }
            ui.add_space(8.0);
            if ui
                .add_enabled(!submitting, egui::Button::new("Reset"))
                .clicked()
            {
                reset_clicked = true;
            }
            if submitting {
                ui.add_space(8.0);
                ui.label(RichText::new("Submitting…").color(palette.text_muted));
            }
        });
        if submit_clicked {
            self.controller.submit_prediction();
        }
        if reset_clicked {
            self.controller.reset_form();
        }
    }
}

fn numeric_field(
    ui: &mut egui::Ui,
    palette: &style::Palette,
    enabled: bool,
    field: FormField,
    value: &mut String,
    hint: &str,
) {
    ui.label(RichText::new(field.label()).color(palette.text_primary));
    ui.add_enabled(
        enabled,
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(FIELD_WIDTH),
    );
    ui.add_space(8.0);
}
