mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::config::{load_settings, prepare_api_url};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{JobGuardApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "jobguard-gui")]
#[command(about = "Desktop form for checking job postings against the fake-job classifier")]
struct Args {
    /// Base URL of the prediction API, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings();
    let api_url = prepare_api_url(args.api_url.as_deref().unwrap_or(&settings.api_url))?;
    tracing::info!(%api_url, "using prediction api");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, api_url.clone());

    let startup = StartupConfig { api_url };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("JobGuard AI")
            .with_inner_size([760.0, 900.0])
            .with_min_inner_size([520.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "JobGuard AI",
        options,
        Box::new(move |_cc| Ok(Box::new(JobGuardApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop app exited with error: {err}"))
}
