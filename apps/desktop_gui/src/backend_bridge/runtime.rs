//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpPredictionClient, PredictionService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the backend worker thread. Every command runs on its own task so a
/// slow prediction never holds up the health probe.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, api_url: String) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let service: Arc<dyn PredictionService> = Arc::new(HttpPredictionClient::new(api_url));
            tracing::info!("backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                let service = service.clone();
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::Predict(ticket) => {
                        tokio::spawn(async move {
                            let outcome = service.predict(&ticket.request).await;
                            let event = UiEvent::PredictionFinished {
                                id: ticket.id,
                                outcome,
                            };
                            tokio::task::block_in_place(|| deliver_outcome(&ui_tx, event));
                        });
                    }
                    BackendCommand::CheckHealth => {
                        tokio::spawn(async move {
                            let health = service.health().await.map_err(|err| format!("{err:#}"));
                            deliver(&ui_tx, UiEvent::HealthChecked(health));
                        });
                    }
                }
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}

fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if let Err(err) = ui_tx.try_send(event) {
        tracing::warn!("dropping backend event, ui queue unavailable: {err}");
    }
}

/// Waits for room in the UI queue. A dropped prediction outcome would leave
/// the form pending.
fn deliver_outcome(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::debug!("ui closed before prediction outcome was delivered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::SubmissionId;
    use crossbeam_channel::bounded;
    use shared::error::SubmissionError;
    use std::time::Duration;

    #[test]
    fn prediction_outcome_waits_for_full_ui_queue() {
        let (ui_tx, ui_rx) = bounded(1);
        deliver(&ui_tx, UiEvent::HealthChecked(Err("offline".to_string())));

        let drain = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let mut received = Vec::new();
            while let Ok(event) = ui_rx.recv_timeout(Duration::from_secs(2)) {
                received.push(event);
                if received.len() == 2 {
                    break;
                }
            }
            received
        });

        deliver_outcome(
            &ui_tx,
            UiEvent::PredictionFinished {
                id: SubmissionId(7),
                outcome: Err(SubmissionError::transport("offline")),
            },
        );

        let received = drain.join().expect("drain thread");
        assert_eq!(received.len(), 2);
        assert!(matches!(
            received[1],
            UiEvent::PredictionFinished { id: SubmissionId(7), .. }
        ));
    }

    #[test]
    fn health_event_is_dropped_when_ui_queue_is_full() {
        let (ui_tx, ui_rx) = bounded(1);
        deliver(&ui_tx, UiEvent::HealthChecked(Err("first".to_string())));
        deliver(&ui_tx, UiEvent::HealthChecked(Err("second".to_string())));

        assert!(matches!(
            ui_rx.try_recv(),
            Ok(UiEvent::HealthChecked(Err(message))) if message == "first"
        ));
        assert!(ui_rx.try_recv().is_err());
    }
}
