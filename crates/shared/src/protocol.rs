use serde::{Deserialize, Serialize};

use crate::domain::{ConfidenceLevel, FormRecord, Verdict};

/// Body of `POST {base}/predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub title: String,
    pub description: String,
    pub company_profile: String,
    pub requirements: String,
    pub benefits: String,
    pub location: String,
    /// `1` when the company has a logo, `0` otherwise.
    pub has_company_logo: u8,
}

impl From<&FormRecord> for PredictRequest {
    fn from(record: &FormRecord) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            company_profile: record.company_profile.clone(),
            requirements: record.requirements.clone(),
            benefits: record.benefits.clone(),
            location: record.location.clone(),
            has_company_logo: u8::from(record.has_company_logo),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub is_fake: bool,
    pub message: String,
    pub confidence_level: ConfidenceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl PredictionResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_is_fake(self.is_fake)
    }

    /// Percentages reported alongside the verdict, when the service sent all
    /// of them.
    pub fn probabilities(&self) -> Option<Probabilities> {
        Some(Probabilities {
            fraud: self.fraud_probability?,
            real: self.real_probability?,
            confidence: self.confidence?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probabilities {
    pub fraud: f64,
    pub real: f64,
    pub confidence: f64,
}

/// Error body of a non-success response. FastAPI-style services send a
/// string for handled errors and an array for request validation failures,
/// so `detail` is kept untyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    pub fn message(&self) -> Option<&str> {
        self.detail.as_ref().and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
}

impl HealthResponse {
    pub fn is_ready(&self) -> bool {
        self.model_loaded && self.vectorizer_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_encodes_logo_flag_numerically_with_wire_names() {
        let record = FormRecord {
            title: " Engineer ".into(),
            location: "Berlin".into(),
            company_profile: "Acme".into(),
            description: "Build".into(),
            requirements: "Rust".into(),
            benefits: "PTO".into(),
            has_company_logo: false,
        };

        let body = serde_json::to_value(PredictRequest::from(&record)).expect("encode");
        assert_eq!(
            body,
            json!({
                "title": " Engineer ",
                "description": "Build",
                "company_profile": "Acme",
                "requirements": "Rust",
                "benefits": "PTO",
                "location": "Berlin",
                "has_company_logo": 0
            })
        );

        let checked = PredictRequest::from(&FormRecord::default());
        assert_eq!(checked.has_company_logo, 1);
    }

    #[test]
    fn decodes_minimal_and_full_prediction_bodies() {
        let minimal: PredictionResult = serde_json::from_value(json!({
            "is_fake": false,
            "message": "Looks legitimate",
            "confidence_level": "High"
        }))
        .expect("minimal");
        assert_eq!(minimal.verdict(), Verdict::LikelyLegitimate);
        assert_eq!(minimal.confidence_level, ConfidenceLevel::High);
        assert!(minimal.probabilities().is_none());

        let full: PredictionResult = serde_json::from_value(json!({
            "prediction": "fake",
            "is_fake": true,
            "fraud_probability": 91.25,
            "real_probability": 8.75,
            "confidence": 91.25,
            "confidence_level": "Very High",
            "message": "This job posting appears to be FRAUDULENT. Be cautious!"
        }))
        .expect("full");
        assert_eq!(full.verdict(), Verdict::PotentiallyFraudulent);
        assert_eq!(
            full.probabilities(),
            Some(Probabilities {
                fraud: 91.25,
                real: 8.75,
                confidence: 91.25
            })
        );
    }

    #[test]
    fn error_detail_only_surfaces_string_details() {
        let text: ErrorDetail =
            serde_json::from_value(json!({ "detail": "Missing fields" })).expect("text");
        assert_eq!(text.message(), Some("Missing fields"));

        let validation: ErrorDetail = serde_json::from_value(json!({
            "detail": [{ "loc": ["body", "title"], "msg": "field required" }]
        }))
        .expect("validation");
        assert_eq!(validation.message(), None);

        let empty: ErrorDetail = serde_json::from_value(json!({})).expect("empty");
        assert_eq!(empty.message(), None);
    }
}
