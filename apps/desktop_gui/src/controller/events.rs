//! Backend-to-UI events.

use client_core::SubmissionId;
use shared::{
    error::SubmissionError,
    protocol::{HealthResponse, PredictionResult},
};

pub enum UiEvent {
    BackendFailed(String),
    PredictionFinished {
        id: SubmissionId,
        outcome: Result<PredictionResult, SubmissionError>,
    },
    HealthChecked(Result<HealthResponse, String>),
}

pub fn describe_health(health: &Result<HealthResponse, String>) -> String {
    match health {
        Ok(health) if health.is_ready() => format!("Service {}: model ready", health.status),
        Ok(health) => {
            let missing = match (health.model_loaded, health.vectorizer_loaded) {
                (false, false) => "model and vectorizer not loaded",
                (false, true) => "model not loaded",
                _ => "vectorizer not loaded",
            };
            format!("Service {}: {missing}", health.status)
        }
        Err(err) => {
            let lower = err.to_ascii_lowercase();
            if lower.contains("connect") || lower.contains("dns") || lower.contains("timed out") {
                "Service unreachable; check the API URL and network".to_string()
            } else {
                format!("Service health unknown: {err}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health(model_loaded: bool, vectorizer_loaded: bool) -> Result<HealthResponse, String> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            model_loaded,
            vectorizer_loaded,
        })
    }

    #[test]
    fn describes_readiness_and_missing_artifacts() {
        assert_eq!(describe_health(&health(true, true)), "Service healthy: model ready");
        assert_eq!(
            describe_health(&health(false, true)),
            "Service healthy: model not loaded"
        );
        assert_eq!(
            describe_health(&health(true, false)),
            "Service healthy: vectorizer not loaded"
        );
    }

    #[test]
    fn classifies_connection_failures_as_unreachable() {
        let unreachable = Err("error sending request: tcp connect error".to_string());
        assert_eq!(
            describe_health(&unreachable),
            "Service unreachable; check the API URL and network"
        );
        let other = Err("HTTP status server error (500 Internal Server Error)".to_string());
        assert!(describe_health(&other).starts_with("Service health unknown"));
    }
}
