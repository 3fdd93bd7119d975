use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::prediction::{self, PredictError, RecipePayload, TrafficPrediction};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PredictionFinished(PredictionOutcome),
    HealthChecked(HealthCheckOutcome),
}

#[derive(Debug)]
pub(crate) struct PredictionJob {
    pub(crate) base_url: String,
    pub(crate) payload: RecipePayload,
}

#[derive(Debug)]
pub(crate) struct PredictionOutcome {
    pub(crate) result: Result<TrafficPrediction, PredictError>,
}

#[derive(Debug)]
pub(crate) struct HealthCheckJob {
    pub(crate) base_url: String,
}

#[derive(Debug)]
pub(crate) struct HealthCheckOutcome {
    pub(crate) result: Result<String, PredictError>,
}

/// Owns the channel the worker threads report back on, plus the in-progress
/// flags that keep a second copy of the same job from starting.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    prediction_in_progress: bool,
    health_check_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            prediction_in_progress: false,
            health_check_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn prediction_in_progress(&self) -> bool {
        self.prediction_in_progress
    }

    pub(super) fn begin_prediction(&mut self, job: PredictionJob) {
        if self.prediction_in_progress {
            return;
        }
        self.prediction_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = prediction::predict(&job.base_url, &job.payload);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionOutcome { result }));
        });
    }

    pub(super) fn clear_prediction(&mut self) {
        self.prediction_in_progress = false;
    }

    pub(super) fn health_check_in_progress(&self) -> bool {
        self.health_check_in_progress
    }

    pub(super) fn begin_health_check(&mut self, job: HealthCheckJob) {
        if self.health_check_in_progress {
            return;
        }
        self.health_check_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = prediction::check_health(&job.base_url);
            let _ = tx.send(JobMessage::HealthChecked(HealthCheckOutcome { result }));
        });
    }

    pub(super) fn clear_health_check(&mut self) {
        self.health_check_in_progress = false;
    }
}
