//! Shared state types for the egui UI.

use crate::egui_app::ui::style;
use crate::prediction::TrafficPrediction;
use crate::recipe::RecipeForm;
use egui::Color32;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub form: FormPanelState,
    pub result: ResultPanelState,
    /// Lifecycle of the most recent submission attempt.
    pub submission: SubmissionState,
    /// Session-only theme choice; every launch starts dark.
    pub theme: ThemePreference,
    /// Outcome of the optional startup probe against the prediction service.
    pub health: ServiceHealthState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            form: FormPanelState::default(),
            result: ResultPanelState::default(),
            submission: SubmissionState::default(),
            theme: ThemePreference::default(),
            health: ServiceHealthState::default(),
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Fill in the recipe and press Predict".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
        }
    }
}

/// Editable recipe fields plus the banner raised when submit rejects them.
#[derive(Clone, Debug, Default)]
pub struct FormPanelState {
    pub fields: RecipeForm,
    /// First validation failure from the last submit attempt, shown until
    /// the next submit or reset.
    pub validation_message: Option<String>,
}

/// Last accepted prediction, kept until the next submission replaces it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultPanelState {
    pub prediction: Option<TrafficPrediction>,
}

/// One submission attempt: idle until the first submit, then submitting,
/// then succeeded or failed. A later submit re-enters `Submitting`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// User-facing failure message for the inline banner.
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Light/dark toggle held only in view state, never written to disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Label for the theme the toggle button would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Light mode",
            Self::Light => "Dark mode",
        }
    }
}

/// Reachability of the prediction service as last observed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ServiceHealthState {
    #[default]
    Unknown,
    Checking,
    Reachable,
    Unreachable(String),
}
