use eframe::egui::{
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
    Color32, Stroke, Visuals,
};

use crate::egui_app::state::ThemePreference;

/// Color roles shared by every panel, resolved per theme.
#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    /// Fill for the probability slice of the confidence ring.
    pub chart_fill: Color32,
    /// Fill for the remainder slice of the confidence ring.
    pub chart_rest: Color32,
}

pub fn palette(theme: ThemePreference) -> Palette {
    match theme {
        ThemePreference::Dark => Palette {
            bg_primary: Color32::from_rgb(10, 10, 12),
            bg_secondary: Color32::from_rgb(26, 28, 30),
            bg_tertiary: Color32::from_rgb(42, 44, 48),
            panel_outline: Color32::from_rgb(38, 42, 48),
            text_primary: Color32::from_rgb(185, 192, 200),
            text_muted: Color32::from_rgb(140, 146, 155),
            accent: Color32::from_rgb(167, 217, 255),
            chart_fill: Color32::from_rgb(195, 165, 122),
            chart_rest: Color32::from_rgb(30, 32, 36),
        },
        ThemePreference::Light => Palette {
            bg_primary: Color32::from_rgb(244, 242, 238),
            bg_secondary: Color32::from_rgb(232, 229, 223),
            bg_tertiary: Color32::from_rgb(218, 214, 206),
            panel_outline: Color32::from_rgb(196, 190, 180),
            text_primary: Color32::from_rgb(48, 46, 42),
            text_muted: Color32::from_rgb(110, 106, 98),
            accent: Color32::from_rgb(46, 98, 150),
            chart_fill: Color32::from_rgb(176, 120, 54),
            chart_rest: Color32::from_rgb(210, 206, 198),
        },
    }
}

pub fn apply_visuals(theme: ThemePreference, visuals: &mut Visuals) {
    let palette = palette(theme);
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = status_badge_color(StatusTone::Error);
    visuals.warn_fg_color = status_badge_color(StatusTone::Warning);
    visuals.selection.bg_fill = palette.bg_tertiary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rectilinear(&mut visuals.widgets.inactive, palette);
    set_rectilinear(&mut visuals.widgets.hovered, palette);
    set_rectilinear(&mut visuals.widgets.active, palette);
    set_rectilinear(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_secondary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn section_stroke(theme: ThemePreference) -> Stroke {
    Stroke::new(1.0, palette(theme).panel_outline)
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Severity bucket behind the footer badge and inline notices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
