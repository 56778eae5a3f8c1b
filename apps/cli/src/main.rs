use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, load_settings_file, prepare_api_url},
    FieldInput, HttpPredictionClient, Panel, PredictionService, SubmissionController,
};
use shared::domain::FormField;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jobguard-cli")]
#[command(about = "Check a job posting against the fake-job classifier")]
struct Args {
    /// Base URL of the prediction API, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    api_url: Option<String>,

    /// Settings file to use instead of ./jobguard.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only probe the service health endpoint
    #[arg(long)]
    health: bool,

    /// Also print the raw prediction as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "")]
    title: String,

    #[arg(long, default_value = "")]
    location: String,

    #[arg(long, default_value = "")]
    company_profile: String,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long, default_value = "")]
    requirements: String,

    #[arg(long, default_value = "")]
    benefits: String,

    /// The company has no logo
    #[arg(long)]
    no_company_logo: bool,
}

impl Args {
    fn text_fields(&self) -> [(FormField, &str); 6] {
        [
            (FormField::Title, self.title.as_str()),
            (FormField::Location, self.location.as_str()),
            (FormField::CompanyProfile, self.company_profile.as_str()),
            (FormField::Description, self.description.as_str()),
            (FormField::Requirements, self.requirements.as_str()),
            (FormField::Benefits, self.benefits.as_str()),
        ]
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_file(path)?,
        None => load_settings(),
    };
    let api_url = prepare_api_url(args.api_url.as_deref().unwrap_or(&settings.api_url))?;
    let client = HttpPredictionClient::new(api_url);

    if args.health {
        let health = client
            .health()
            .await
            .with_context(|| format!("health check against {} failed", client.api_url()))?;
        println!("Status: {}", health.status);
        println!("Model loaded: {}", health.model_loaded);
        println!("Vectorizer loaded: {}", health.vectorizer_loaded);
        return Ok(if health.is_ready() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut controller = SubmissionController::new();
    for (field, value) in args.text_fields() {
        controller.update(field, FieldInput::Text(value.to_string()))?;
    }
    controller.update(
        FormField::HasCompanyLogo,
        FieldInput::Checked(!args.no_company_logo),
    )?;

    if let Err(refusal) = controller.submit(&client).await {
        eprintln!("Not submitted: {refusal}");
        return Ok(ExitCode::from(2));
    }

    if args.json {
        if let Some(result) = controller.result() {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }

    match controller.panel() {
        Some(Panel::Result {
            verdict,
            message,
            confidence_level,
            probabilities,
        }) => {
            println!("{}", verdict.title());
            println!("{message}");
            println!("Confidence Level: {confidence_level}");
            if let Some(p) = probabilities {
                println!(
                    "Fraud probability: {:.2}%  Real probability: {:.2}%  Confidence: {:.2}%",
                    p.fraud, p.real, p.confidence
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Panel::Error { message }) => {
            eprintln!("Error: {message}");
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
