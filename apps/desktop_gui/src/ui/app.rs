use client_core::{FieldInput, Panel, SubmissionController};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{FieldKind, FormField, Verdict};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_health, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, submit_form};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_url: String,
}

const LEGITIMATE_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
const FRAUD_COLOR: egui::Color32 = egui::Color32::from_rgb(218, 54, 51);
const REQUIRED_COLOR: egui::Color32 = egui::Color32::from_rgb(218, 54, 51);

enum FormAction {
    Submit,
    Reset,
}

pub struct JobGuardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: SubmissionController,
    api_url: String,
    status: String,
    service_status: String,
}

impl JobGuardApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: SubmissionController::new(),
            api_url: startup.api_url,
            status: "Ready".to_string(),
            service_status: "Checking service...".to_string(),
        };
        let _ = dispatch_backend_command(
            &app.cmd_tx,
            BackendCommand::CheckHealth,
            &mut app.service_status,
        );
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendFailed(message) => {
                    self.service_status = message.clone();
                    self.status = message;
                }
                UiEvent::PredictionFinished { id, outcome } => {
                    if self.controller.complete(id, outcome) {
                        self.status = match self.controller.panel() {
                            Some(Panel::Result { verdict, .. }) => {
                                format!("Analysis complete: {}", verdict.title())
                            }
                            Some(Panel::Error { .. }) => "Analysis failed".to_string(),
                            None => "Ready".to_string(),
                        };
                    }
                }
                UiEvent::HealthChecked(health) => {
                    self.service_status = describe_health(&health);
                }
            }
        }
    }

    fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Submit => {
                submit_form(&mut self.controller, &self.cmd_tx, &mut self.status);
            }
            FormAction::Reset => {
                self.controller.reset();
                self.status = "Form cleared".to_string();
            }
        }
    }

    fn edit(&mut self, field: FormField, input: FieldInput) {
        if let Err(err) = self.controller.update(field, input) {
            tracing::warn!(%field, "rejected form edit: {err}");
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("JobGuard AI").strong().size(20.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.api_url).weak());
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                ui.separator();
                ui.small(egui::RichText::new(&self.service_status).weak());
            });
        });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) -> Option<FormAction> {
        ui.heading("Fake Job Posting Detector");
        ui.label("Fill in the job details below to check if it's legitimate or potentially fraudulent");
        ui.add_space(12.0);

        for field in FormField::ALL {
            match field.kind() {
                FieldKind::Checkbox => {
                    let mut checked = self.controller.record().has_company_logo;
                    if ui.checkbox(&mut checked, field.label()).changed() {
                        self.edit(field, FieldInput::Checked(checked));
                    }
                }
                FieldKind::Text => {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(field.label()).strong());
                        ui.label(egui::RichText::new("*").color(REQUIRED_COLOR));
                    });
                    let mut value = self
                        .controller
                        .record()
                        .text(field)
                        .unwrap_or_default()
                        .to_string();
                    let edit = match field.rows() {
                        Some(rows) => egui::TextEdit::multiline(&mut value).desired_rows(rows),
                        None => egui::TextEdit::singleline(&mut value),
                    }
                    .id_salt(field.name())
                    .hint_text(field.placeholder())
                    .desired_width(f32::INFINITY);
                    if ui.add(edit).changed() {
                        self.edit(field, FieldInput::Text(value));
                    }
                }
            }
            ui.add_space(8.0);
        }

        let loading = self.controller.is_loading();
        let mut action = None;
        ui.horizontal(|ui| {
            let submit = if loading {
                ui.spinner();
                egui::Button::new("Analyzing...")
            } else {
                egui::Button::new(egui::RichText::new("Analyze Job Posting").strong())
            };
            if ui.add_enabled(!loading, submit).clicked() {
                action = Some(FormAction::Submit);
            }
            if ui.button("Clear Form").clicked() {
                action = Some(FormAction::Reset);
            }
        });
        if !loading && !self.controller.can_submit() {
            ui.small(egui::RichText::new("Fields marked * are required").weak());
        }
        action
    }

    fn show_result_modal(&mut self, ctx: &egui::Context) {
        let Some(panel) = self.controller.panel() else {
            return;
        };

        let mut open = true;
        let mut close_requested = false;
        egui::Window::new(panel.title())
            .id(egui::Id::new("result_modal"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                match &panel {
                    Panel::Result {
                        verdict,
                        message,
                        confidence_level,
                        probabilities,
                    } => {
                        let color = match verdict {
                            Verdict::LikelyLegitimate => LEGITIMATE_COLOR,
                            Verdict::PotentiallyFraudulent => FRAUD_COLOR,
                        };
                        ui.label(
                            egui::RichText::new(verdict.title())
                                .heading()
                                .strong()
                                .color(color),
                        );
                        ui.label(message.as_str());
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new("Confidence Level").weak());
                            ui.label(egui::RichText::new(confidence_level.as_str()).strong());
                        });
                        if let Some(p) = probabilities {
                            ui.small(format!(
                                "Fraud {:.2}%  |  Real {:.2}%  |  Confidence {:.2}%",
                                p.fraud, p.real, p.confidence
                            ));
                        }
                    }
                    Panel::Error { message } => {
                        ui.label(egui::RichText::new("Error").heading().color(FRAUD_COLOR));
                        ui.label(message.as_str());
                    }
                }
                ui.add_space(10.0);
                if ui.button("Close").clicked() {
                    close_requested = true;
                }
            });

        if !open || close_requested {
            self.controller.dismiss();
            self.status = "Ready".to_string();
        }
    }
}

impl eframe::App for JobGuardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                action = self.show_form(ui);
            });
        });
        if let Some(action) = action {
            self.apply(action);
        }

        self.show_result_modal(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
