//! Submission lifecycle: `idle -> pending -> succeeded | failed -> idle`.
//!
//! The controller owns the form and the outcome of the latest submission.
//! Front ends call [`SubmissionController::begin_submit`], run the request
//! wherever they like, and hand the outcome back through
//! [`SubmissionController::complete`].

use std::fmt;

use shared::{
    domain::{ConfidenceLevel, FormField, FormRecord, Verdict},
    error::SubmissionError,
    protocol::{PredictRequest, PredictionResult, Probabilities},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    form::{FieldInput, FormError, FormState},
    PredictionService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LifecyclePhase {
    Idle,
    Pending(SubmissionId),
    Succeeded(PredictionResult),
    Failed(SubmissionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl PhaseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Pending => "pending",
            PhaseKind::Succeeded => "succeeded",
            PhaseKind::Failed => "failed",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LifecyclePhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            LifecyclePhase::Idle => PhaseKind::Idle,
            LifecyclePhase::Pending(_) => PhaseKind::Pending,
            LifecyclePhase::Succeeded(_) => PhaseKind::Succeeded,
            LifecyclePhase::Failed(_) => PhaseKind::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRefusal {
    #[error("required fields are empty: {}", field_labels(.0))]
    MissingFields(Vec<FormField>),
    #[error("a submission is already in progress")]
    AlreadyPending,
}

fn field_labels(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Work order for the network call of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub id: SubmissionId,
    pub request: PredictRequest,
}

/// What the result modal shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Result {
        verdict: Verdict,
        message: String,
        confidence_level: ConfidenceLevel,
        probabilities: Option<Probabilities>,
    },
    Error {
        message: String,
    },
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Panel::Result { verdict, .. } => verdict.title(),
            Panel::Error { .. } => "Error",
        }
    }
}

#[derive(Debug)]
pub struct SubmissionController {
    form: FormState,
    phase: LifecyclePhase,
    next_id: u64,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            form: FormState::new(),
            phase: LifecyclePhase::Idle,
            next_id: 1,
        }
    }

    pub fn record(&self) -> &FormRecord {
        self.form.record()
    }

    /// Edits are accepted in every phase; an in-flight request already holds
    /// its own snapshot.
    pub fn update(&mut self, field: FormField, input: FieldInput) -> Result<(), FormError> {
        self.form.update(field, input)
    }

    pub fn update_named(&mut self, name: &str, input: FieldInput) -> Result<(), FormError> {
        self.form.update_named(name, input)
    }

    pub fn phase(&self) -> &LifecyclePhase {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LifecyclePhase::Pending(_))
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            LifecyclePhase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SubmissionError> {
        match &self.phase {
            LifecyclePhase::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.record().is_complete()
    }

    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, SubmitRefusal> {
        if let LifecyclePhase::Pending(id) = self.phase {
            debug!(submission = id.0, "submit ignored while a request is in flight");
            return Err(SubmitRefusal::AlreadyPending);
        }

        let missing = self.record().missing_required();
        if !missing.is_empty() {
            debug!(missing = missing.len(), "submit refused: required fields are empty");
            return Err(SubmitRefusal::MissingFields(missing));
        }

        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        self.phase = LifecyclePhase::Pending(id);
        info!(submission = id.0, "submission dispatched");

        Ok(SubmissionTicket {
            id,
            request: PredictRequest::from(self.record()),
        })
    }

    /// Applies the outcome of submission `id`. Returns `false` when `id` is
    /// not the submission currently pending (late arrival after a reset or
    /// dismiss), in which case nothing changes.
    pub fn complete(
        &mut self,
        id: SubmissionId,
        outcome: Result<PredictionResult, SubmissionError>,
    ) -> bool {
        if self.phase != LifecyclePhase::Pending(id) {
            debug!(
                submission = id.0,
                phase = %self.phase_kind(),
                "discarding stale submission outcome"
            );
            return false;
        }

        self.phase = match outcome {
            Ok(result) => {
                info!(
                    submission = id.0,
                    is_fake = result.is_fake,
                    confidence = %result.confidence_level,
                    "prediction received"
                );
                LifecyclePhase::Succeeded(result)
            }
            Err(error) => {
                warn!(
                    submission = id.0,
                    kind = ?error.kind(),
                    status = ?error.status(),
                    cause = error.cause().unwrap_or_default(),
                    "prediction failed: {error}"
                );
                LifecyclePhase::Failed(error)
            }
        };
        true
    }

    /// Closes the result or error panel. Form values are kept.
    pub fn dismiss(&mut self) -> bool {
        match self.phase {
            LifecyclePhase::Succeeded(_) | LifecyclePhase::Failed(_) => {
                self.phase = LifecyclePhase::Idle;
                true
            }
            LifecyclePhase::Idle | LifecyclePhase::Pending(_) => false,
        }
    }

    /// Starts over: form back to defaults, any outcome cleared. An in-flight
    /// request is not cancelled; its completion will be discarded.
    pub fn reset(&mut self) {
        self.form.reset();
        if self.phase != LifecyclePhase::Idle {
            info!(phase = %self.phase_kind(), "form reset");
        }
        self.phase = LifecyclePhase::Idle;
    }

    pub fn panel(&self) -> Option<Panel> {
        match &self.phase {
            LifecyclePhase::Succeeded(result) => Some(Panel::Result {
                verdict: result.verdict(),
                message: result.message.clone(),
                confidence_level: result.confidence_level.clone(),
                probabilities: result.probabilities(),
            }),
            LifecyclePhase::Failed(error) => Some(Panel::Error {
                message: error.message().to_string(),
            }),
            LifecyclePhase::Idle | LifecyclePhase::Pending(_) => None,
        }
    }

    /// Runs one whole submission against `service` and returns the phase it
    /// settled in.
    pub async fn submit<S>(&mut self, service: &S) -> Result<PhaseKind, SubmitRefusal>
    where
        S: PredictionService + ?Sized,
    {
        let ticket = self.begin_submit()?;
        let outcome = service.predict(&ticket.request).await;
        self.complete(ticket.id, outcome);
        Ok(self.phase_kind())
    }
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
