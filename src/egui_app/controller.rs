mod jobs;

use crate::config::{self, AppConfig};
use crate::draft_store::{self, FileKvStore, KvStore, MemoryKvStore};
use crate::egui_app::state::{ServiceHealthState, SubmissionState, UiState};
use crate::egui_app::ui::style::{self, StatusTone};
use crate::egui_app::view_model;
use egui::Color32;

use jobs::{ControllerJobs, HealthCheckJob, JobMessage, PredictionJob};

/// Banner text for any failed request; the log carries the real cause.
const SUBMIT_FAILED_MESSAGE: &str =
    "Prediction failed. Check that the service is running and try again.";

/// Maintains app state and bridges the prediction workflow to the egui UI.
pub struct TrafficController {
    pub ui: UiState,
    config: AppConfig,
    draft_store: Box<dyn KvStore>,
    jobs: ControllerJobs,
}

impl TrafficController {
    /// Build a controller around an injected draft store.
    pub fn new(draft_store: Box<dyn KvStore>) -> Self {
        Self {
            ui: UiState::default(),
            config: AppConfig::default(),
            draft_store,
            jobs: ControllerJobs::new(),
        }
    }

    /// Build a controller backed by the on-disk draft store, falling back to
    /// an in-memory one when the app directory is unavailable.
    pub fn with_default_store() -> Self {
        let store: Box<dyn KvStore> = match FileKvStore::open_default() {
            Ok(store) => Box::new(store),
            Err(err) => {
                tracing::warn!("Draft store unavailable, drafts will not survive restarts: {err}");
                Box::new(MemoryKvStore::default())
            }
        };
        Self::new(store)
    }

    /// Load persisted config and populate initial UI state.
    pub fn load_configuration(&mut self) -> Result<(), config::ConfigError> {
        self.config = config::load_or_default()?;
        if self.config.feature_flags.remember_last_recipe {
            if let Some(form) = draft_store::load_last_recipe(self.draft_store.as_ref()) {
                self.ui.form.fields = form;
            }
        }
        if self.config.service.check_health_on_startup {
            self.check_service_health();
        }
        Ok(())
    }

    /// Validate the form and, when it passes, send it to the prediction
    /// service on a worker thread.
    ///
    /// A rejected form raises the validation banner and issues no request;
    /// the submission lifecycle only advances on accepted input. Submits
    /// while a request is in flight are ignored.
    pub fn submit_prediction(&mut self) {
        if self.jobs.prediction_in_progress() {
            return;
        }
        let payload = match self.ui.form.fields.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.ui.form.validation_message = Some(err.to_string());
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        self.ui.form.validation_message = None;
        self.persist_last_recipe();
        self.ui.submission = SubmissionState::Submitting;
        self.set_status("Predicting recipe traffic…", StatusTone::Busy);
        self.jobs.begin_prediction(PredictionJob {
            base_url: self.config.service.base_url.clone(),
            payload,
        });
    }

    /// Apply results from finished worker threads. Called once per frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::PredictionFinished(outcome) => {
                    self.jobs.clear_prediction();
                    match outcome.result {
                        Ok(prediction) => {
                            self.set_status(
                                format!(
                                    "{} ({} confidence)",
                                    prediction.prediction,
                                    view_model::confidence_label(prediction.traffic_probability)
                                ),
                                StatusTone::Info,
                            );
                            self.ui.result.prediction = Some(prediction);
                            self.ui.submission = SubmissionState::Succeeded;
                        }
                        Err(err) => {
                            tracing::warn!("Prediction request failed: {err}");
                            self.ui.submission =
                                SubmissionState::Failed(SUBMIT_FAILED_MESSAGE.to_string());
                            self.set_status("Prediction request failed", StatusTone::Error);
                        }
                    }
                }
                JobMessage::HealthChecked(outcome) => {
                    self.jobs.clear_health_check();
                    match outcome.result {
                        Ok(status) => {
                            self.ui.health = ServiceHealthState::Reachable;
                            self.set_status(status, StatusTone::Info);
                        }
                        Err(err) => {
                            tracing::warn!("Health check failed: {err}");
                            self.ui.health = ServiceHealthState::Unreachable(err.to_string());
                            self.set_status(
                                "Prediction service is unreachable",
                                StatusTone::Warning,
                            );
                        }
                    }
                }
            }
        }
    }

    /// Clear the form, the displayed prediction, and any banner.
    pub fn reset_form(&mut self) {
        self.ui.form.fields.clear();
        self.ui.form.validation_message = None;
        self.ui.result.prediction = None;
        self.ui.submission = SubmissionState::Idle;
        self.set_status("Form cleared", StatusTone::Idle);
    }

    /// Flip between dark and light for the rest of the session.
    pub fn toggle_theme(&mut self) {
        self.ui.theme = self.ui.theme.toggled();
    }

    /// Probe the service's health endpoint on a worker thread.
    pub fn check_service_health(&mut self) {
        if self.jobs.health_check_in_progress() {
            return;
        }
        self.ui.health = ServiceHealthState::Checking;
        self.jobs.begin_health_check(HealthCheckJob {
            base_url: self.config.service.base_url.clone(),
        });
    }

    pub fn is_prediction_in_progress(&self) -> bool {
        self.jobs.prediction_in_progress()
    }

    pub fn is_health_check_in_progress(&self) -> bool {
        self.jobs.health_check_in_progress()
    }

    /// Base URL of the prediction service from config.
    pub fn service_base_url(&self) -> &str {
        &self.config.service.base_url
    }

    fn persist_last_recipe(&mut self) {
        if !self.config.feature_flags.remember_last_recipe {
            return;
        }
        if let Err(err) =
            draft_store::save_last_recipe(self.draft_store.as_mut(), &self.ui.form.fields)
        {
            tracing::warn!("Failed to store the submitted recipe: {err}");
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}

fn status_badge(tone: StatusTone) -> (String, Color32) {
    let label = match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Predicting",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    };
    (label.to_string(), style::status_badge_color(tone))
}
