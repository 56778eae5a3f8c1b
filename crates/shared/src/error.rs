use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const REJECTION_FALLBACK_MESSAGE: &str = "Failed to get prediction";
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "An error occurred while making the prediction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionErrorKind {
    /// The service answered with a non-success status.
    ServiceRejection,
    /// No usable answer: connect/read failure or an undecodable body.
    TransportFailure,
}

/// Why the last submission produced no result. `Display` is the text shown
/// to the user; `cause` is only for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmissionError {
    kind: SubmissionErrorKind,
    message: String,
    status: Option<u16>,
    cause: Option<String>,
}

impl SubmissionError {
    /// Non-success response. A non-empty `detail` is shown verbatim.
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| REJECTION_FALLBACK_MESSAGE.to_string());
        Self {
            kind: SubmissionErrorKind::ServiceRejection,
            message,
            status: Some(status),
            cause: None,
        }
    }

    pub fn transport(cause: impl Into<String>) -> Self {
        Self {
            kind: SubmissionErrorKind::TransportFailure,
            message: TRANSPORT_FALLBACK_MESSAGE.to_string(),
            status: None,
            cause: Some(cause.into()),
        }
    }

    /// Success status whose body could not be decoded as a prediction.
    pub fn malformed_response(status: u16, cause: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::transport(format!("malformed prediction response: {}", cause.into()))
        }
    }

    pub fn kind(&self) -> SubmissionErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_service_detail() {
        let err = SubmissionError::rejected(400, Some("Missing fields".into()));
        assert_eq!(err.kind(), SubmissionErrorKind::ServiceRejection);
        assert_eq!(err.to_string(), "Missing fields");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn rejection_without_detail_uses_fallback() {
        assert_eq!(
            SubmissionError::rejected(500, None).message(),
            REJECTION_FALLBACK_MESSAGE
        );
        assert_eq!(
            SubmissionError::rejected(500, Some(String::new())).message(),
            REJECTION_FALLBACK_MESSAGE
        );
    }

    #[test]
    fn malformed_success_body_is_a_transport_failure() {
        let err = SubmissionError::malformed_response(200, "missing field `is_fake`");
        assert_eq!(err.kind(), SubmissionErrorKind::TransportFailure);
        assert_eq!(err.message(), TRANSPORT_FALLBACK_MESSAGE);
        assert!(err.cause().is_some_and(|cause| cause.contains("is_fake")));
    }
}
