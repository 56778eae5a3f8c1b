use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::SubmissionError,
    protocol::{ErrorDetail, HealthResponse, PredictRequest, PredictionResult},
};
use tracing::{debug, warn};

pub mod config;
pub mod form;
pub mod lifecycle;

pub use form::{FieldInput, FormError, FormState};
pub use lifecycle::{
    LifecyclePhase, Panel, PhaseKind, SubmissionController, SubmissionId, SubmissionTicket,
    SubmitRefusal,
};

/// Remote classifier contract. Submission failures come back already mapped
/// into the user-facing taxonomy.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, SubmissionError>;
    async fn health(&self) -> Result<HealthResponse>;
}

pub struct MissingPredictionService;

#[async_trait]
impl PredictionService for MissingPredictionService {
    async fn predict(
        &self,
        _request: &PredictRequest,
    ) -> Result<PredictionResult, SubmissionError> {
        Err(SubmissionError::transport("prediction service is not configured"))
    }

    async fn health(&self) -> Result<HealthResponse> {
        Err(anyhow!("prediction service is not configured"))
    }
}

#[derive(Clone)]
pub struct HttpPredictionClient {
    http: Client,
    api_url: String,
}

impl HttpPredictionClient {
    /// `api_url` is the base endpoint, e.g. `http://127.0.0.1:8000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(
        &self,
        request: &PredictRequest,
    ) -> Result<PredictionResult, SubmissionError> {
        let url = self.endpoint("predict");
        debug!(%url, "sending prediction request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| SubmissionError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SubmissionError::transport(err.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorDetail>(&body)
                .ok()
                .and_then(|error| error.message().map(str::to_string));
            if detail.is_none() {
                warn!(status = status.as_u16(), "prediction rejected without a usable detail");
            }
            return Err(SubmissionError::rejected(status.as_u16(), detail));
        }

        serde_json::from_str::<PredictionResult>(&body)
            .map_err(|err| SubmissionError::malformed_response(status.as_u16(), err.to_string()))
    }

    async fn health(&self) -> Result<HealthResponse> {
        let health = self
            .http
            .get(self.endpoint("health"))
            .send()
            .await?
            .error_for_status()?
            .json::<HealthResponse>()
            .await?;
        Ok(health)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
