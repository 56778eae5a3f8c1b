use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "jobguard.toml";
const FALLBACK_API_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub api_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: option_env!("JOBGUARD_API_URL")
                .unwrap_or(FALLBACK_API_URL)
                .into(),
        }
    }
}

/// Built-in default, then `jobguard.toml`, then `JOBGUARD_API_URL` /
/// `APP__API_URL`. The result is not validated; see [`prepare_api_url`].
pub fn load_settings() -> ClientSettings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file_contents {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("api_url") {
                settings.api_url = v.clone();
            }
        }
    }

    apply_env_overrides(&mut settings, env);
    settings
}

/// Like [`load_settings`] with `path` standing in for `jobguard.toml`. A
/// missing or malformed file is an error here.
pub fn load_settings_file(path: &Path) -> anyhow::Result<ClientSettings> {
    load_settings_file_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_file_with(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let mut settings: ClientSettings = toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    apply_env_overrides(&mut settings, env);
    Ok(settings)
}

fn apply_env_overrides(settings: &mut ClientSettings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("JOBGUARD_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }
}

/// Trims, drops trailing slashes and checks the value is an absolute
/// http(s) URL.
pub fn prepare_api_url(raw_api_url: &str) -> anyhow::Result<String> {
    let api_url = raw_api_url.trim().trim_end_matches('/');
    if api_url.is_empty() {
        bail!("prediction API URL is empty");
    }

    let parsed = Url::parse(api_url)
        .with_context(|| format!("invalid prediction API URL '{api_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "prediction API URL '{api_url}' must use http or https, not '{}'",
            parsed.scheme()
        );
    }
    if parsed.host_str().is_none() {
        bail!("prediction API URL '{api_url}' has no host");
    }

    Ok(api_url.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
