//! Backend commands queued from UI to backend worker.

use client_core::SubmissionTicket;

pub enum BackendCommand {
    Predict(SubmissionTicket),
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict(_) => "predict",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
