//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{SubmissionController, SubmitRefusal};
use crossbeam_channel::{Sender, TrySendError};
use shared::error::SubmissionError;

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. On failure `status` explains why and
/// the command is handed back.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), BackendCommand> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            *status = "UI command queue is full; please retry".to_string();
            Err(cmd)
        }
        Err(TrySendError::Disconnected(cmd)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure)"
                    .to_string();
            Err(cmd)
        }
    }
}

/// Handles the submit action: guards, moves the controller to pending and
/// queues the request. A request that cannot be queued fails the submission
/// right away so the form is never left pending.
pub fn submit_form(
    controller: &mut SubmissionController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    let ticket = match controller.begin_submit() {
        Ok(ticket) => ticket,
        Err(refusal @ SubmitRefusal::MissingFields(_)) => {
            *status = format!("Please fill in all required fields ({refusal})");
            return;
        }
        Err(SubmitRefusal::AlreadyPending) => return,
    };

    let id = ticket.id;
    *status = "Analyzing job posting...".to_string();
    if dispatch_backend_command(cmd_tx, BackendCommand::Predict(ticket), status).is_err() {
        controller.complete(id, Err(SubmissionError::transport(status.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{FieldInput, PhaseKind};
    use crossbeam_channel::bounded;
    use shared::{domain::FormField, error::TRANSPORT_FALLBACK_MESSAGE};

    fn filled_controller() -> SubmissionController {
        let mut controller = SubmissionController::new();
        for field in FormField::REQUIRED_TEXT {
            controller
                .update(field, FieldInput::Text("filled".to_string()))
                .expect("fill");
        }
        controller
    }

    #[test]
    fn submit_queues_predict_command_and_marks_pending() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut controller = filled_controller();
        let mut status = String::new();

        submit_form(&mut controller, &cmd_tx, &mut status);

        assert_eq!(controller.phase_kind(), PhaseKind::Pending);
        match cmd_rx.try_recv().expect("queued") {
            BackendCommand::Predict(ticket) => assert_eq!(ticket.request.title, "filled"),
            other => panic!("unexpected command: {}", other.name()),
        }

        submit_form(&mut controller, &cmd_tx, &mut status);
        assert!(cmd_rx.try_recv().is_err(), "second submit must not queue");
    }

    #[test]
    fn incomplete_form_is_not_queued() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let mut controller = SubmissionController::new();
        let mut status = String::new();

        submit_form(&mut controller, &cmd_tx, &mut status);

        assert_eq!(controller.phase_kind(), PhaseKind::Idle);
        assert!(cmd_rx.try_recv().is_err());
        assert!(status.starts_with("Please fill in all required fields"));
    }

    #[test]
    fn disconnected_backend_fails_submission_instead_of_hanging() {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(4);
        drop(cmd_rx);
        let mut controller = filled_controller();
        let mut status = String::new();

        submit_form(&mut controller, &cmd_tx, &mut status);

        assert_eq!(controller.phase_kind(), PhaseKind::Failed);
        assert_eq!(
            controller.error().map(|err| err.message()),
            Some(TRANSPORT_FALLBACK_MESSAGE)
        );
        assert!(status.contains("disconnected"));
    }

    #[test]
    fn full_queue_reports_retry_status() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&cmd_tx, BackendCommand::CheckHealth, &mut status)
            .unwrap_or_else(|_| panic!("first command fits"));

        let rejected = dispatch_backend_command(&cmd_tx, BackendCommand::CheckHealth, &mut status);

        assert!(rejected.is_err());
        assert_eq!(status, "UI command queue is full; please retry");
    }
}
