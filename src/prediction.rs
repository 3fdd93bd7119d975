//! Talk to the recipe traffic prediction service.
//!
//! Two endpoints: `POST /recipe_type` scores a recipe, `GET /health` reports
//! whether the service is up. Both go through the shared HTTP agent.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http_client;

/// Path of the prediction endpoint, joined onto the configured base URL.
pub const PREDICT_PATH: &str = "/recipe_type";
/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// A validated recipe, shaped for the prediction request body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecipePayload {
    pub calories: f64,
    pub carbohydrate: f64,
    pub sugar: f64,
    pub protein: f64,
    pub category: String,
    pub servings: u32,
}

/// A prediction returned by the service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrafficPrediction {
    /// Traffic class label, e.g. `High Traffic`. Treated as opaque text.
    pub prediction: String,
    /// Model confidence in the predicted class, in `[0, 1]`.
    #[serde(rename = "trafficProbability")]
    pub traffic_probability: f64,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// Errors from the prediction service client.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Invalid service URL {url}: {source}")]
    BadUrl { url: String, source: url::ParseError },
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Unexpected response: {0}")]
    Json(String),
}

/// Submit a recipe for scoring.
///
/// Any non-2xx status is a uniform failure; the status line and body are
/// carried in the error for logging, not shown to the user verbatim.
pub fn predict(base_url: &str, payload: &RecipePayload) -> Result<TrafficPrediction, PredictError> {
    let url = endpoint_url(base_url, PREDICT_PATH)?;
    let request = http_client::agent()
        .post(&url)
        .set("Accept", "application/json");

    let response = match request.send_json(payload) {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(PredictError::Status { code, body });
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(PredictError::Transport(err.to_string()));
        }
    };

    response
        .into_json::<TrafficPrediction>()
        .map_err(|err| PredictError::Json(err.to_string()))
}

/// Probe the service's health endpoint, returning its status message.
pub fn check_health(base_url: &str) -> Result<String, PredictError> {
    let url = endpoint_url(base_url, HEALTH_PATH)?;
    let response = match http_client::agent().get(&url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(PredictError::Status { code, body });
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(PredictError::Transport(err.to_string()));
        }
    };

    let health = response
        .into_json::<HealthResponse>()
        .map_err(|err| PredictError::Json(err.to_string()))?;
    Ok(health.status)
}

/// Join an endpoint path onto the base URL, validating the base first.
///
/// The path is appended textually so a base with a path prefix keeps it.
fn endpoint_url(base_url: &str, path: &str) -> Result<String, PredictError> {
    Url::parse(base_url).map_err(|source| PredictError::BadUrl {
        url: base_url.to_string(),
        source,
    })?;
    Ok(format!("{}{}", base_url.trim_end_matches('/'), path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn sample_payload() -> RecipePayload {
        RecipePayload {
            calories: 280.0,
            carbohydrate: 21.5,
            sugar: 4.2,
            protein: 11.0,
            category: "Potato".to_string(),
            servings: 2,
        }
    }

    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    fn json_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[test]
    fn payload_serializes_with_numeric_values() {
        let value = serde_json::to_value(sample_payload()).unwrap();
        assert!(value["calories"].is_f64());
        assert!(value["carbohydrate"].is_f64());
        assert!(value["sugar"].is_f64());
        assert!(value["protein"].is_f64());
        assert!(value["servings"].is_u64());
        assert_eq!(value["category"], "Potato");
    }

    #[test]
    fn prediction_parses_wire_field_names() {
        let parsed: TrafficPrediction =
            serde_json::from_str(r#"{"prediction":"High Traffic","trafficProbability":0.82}"#)
                .unwrap();
        assert_eq!(parsed.prediction, "High Traffic");
        assert!((parsed.traffic_probability - 0.82).abs() < f64::EPSILON);
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash() {
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000", PREDICT_PATH).unwrap(),
            "http://127.0.0.1:8000/recipe_type"
        );
        assert_eq!(
            endpoint_url("http://127.0.0.1:8000/", PREDICT_PATH).unwrap(),
            "http://127.0.0.1:8000/recipe_type"
        );
    }

    #[test]
    fn endpoint_url_rejects_garbage() {
        let err = endpoint_url("not a url", HEALTH_PATH).unwrap_err();
        assert!(matches!(err, PredictError::BadUrl { .. }));
    }

    #[test]
    fn predict_parses_success_response() {
        let url = serve_once(json_response(
            r#"{"prediction":"Low Traffic","trafficProbability":0.34}"#,
        ));
        let result = predict(&url, &sample_payload()).unwrap();
        assert_eq!(result.prediction, "Low Traffic");
        assert!((result.traffic_probability - 0.34).abs() < f64::EPSILON);
    }

    #[test]
    fn predict_surfaces_status_and_body_on_http_error() {
        let body = r#"{"detail":"model unavailable"}"#;
        let url = serve_once(format!(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ));
        let err = predict(&url, &sample_payload()).unwrap_err();
        match err {
            PredictError::Status { code, body } => {
                assert_eq!(code, 503);
                assert!(body.contains("model unavailable"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn predict_reports_transport_failure_when_nothing_listens() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = predict(&format!("http://{addr}"), &sample_payload()).unwrap_err();
        assert!(matches!(err, PredictError::Transport(_)));
    }

    #[test]
    fn predict_rejects_malformed_success_body() {
        let url = serve_once(json_response(r#"{"prediction":"High Traffic"}"#));
        let err = predict(&url, &sample_payload()).unwrap_err();
        assert!(matches!(err, PredictError::Json(_)));
    }

    #[test]
    fn health_check_returns_status_message() {
        let url = serve_once(json_response(r#"{"status":"Service is running!"}"#));
        let status = check_health(&url).unwrap();
        assert_eq!(status, "Service is running!");
    }

    #[test]
    fn health_check_fails_on_http_error() {
        let url = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n".to_string());
        let err = check_health(&url).unwrap_err();
        assert!(matches!(err, PredictError::Status { code: 500, .. }));
    }
}
