use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;
use swipe_core::{
    gesture::{DEFAULT_COMMIT_THRESHOLD, DEFAULT_PROVISIONAL_THRESHOLD},
    presentation::{DEFAULT_REVEAL_DELAY, DEFAULT_ROTATION_FACTOR},
    PresentationSettings, SwipeError, SwipeThresholds,
};
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "swipe.toml";
const ENV_PREFIX: &str = "SWIPE__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub provisional_threshold: f64,
    pub commit_threshold: f64,
    pub reveal_delay_ms: u64,
    pub rotation_factor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("demos/products.json"),
            provisional_threshold: DEFAULT_PROVISIONAL_THRESHOLD,
            commit_threshold: DEFAULT_COMMIT_THRESHOLD,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY.as_millis() as u64,
            rotation_factor: DEFAULT_ROTATION_FACTOR,
        }
    }
}

impl Settings {
    pub fn thresholds(&self) -> Result<SwipeThresholds, SwipeError> {
        SwipeThresholds::new(self.provisional_threshold, self.commit_threshold)
    }

    pub fn presentation(&self) -> PresentationSettings {
        PresentationSettings {
            rotation_factor: self.rotation_factor,
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
        }
    }
}

/// Defaults, then the settings file, then `SWIPE__*` environment overrides.
///
/// An explicitly given file must exist; the default `swipe.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings '{}'", path.display()))?;
            parse_settings(&raw)
                .with_context(|| format!("failed to parse settings '{}'", path.display()))?
        }
        None => match fs::read_to_string(DEFAULT_SETTINGS_FILE) {
            Ok(raw) => parse_settings(&raw)
                .with_context(|| format!("failed to parse settings '{DEFAULT_SETTINGS_FILE}'"))?,
            Err(_) => Settings::default(),
        },
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str(raw)?)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    if let Some(v) = var("CATALOG_PATH") {
        settings.catalog_path = PathBuf::from(v);
    }
    if let Some(v) = var("PROVISIONAL_THRESHOLD") {
        override_parsed(&mut settings.provisional_threshold, "PROVISIONAL_THRESHOLD", &v);
    }
    if let Some(v) = var("COMMIT_THRESHOLD") {
        override_parsed(&mut settings.commit_threshold, "COMMIT_THRESHOLD", &v);
    }
    if let Some(v) = var("REVEAL_DELAY_MS") {
        override_parsed(&mut settings.reveal_delay_ms, "REVEAL_DELAY_MS", &v);
    }
    if let Some(v) = var("ROTATION_FACTOR") {
        override_parsed(&mut settings.rotation_factor, "ROTATION_FACTOR", &v);
    }
}

fn override_parsed<T: std::str::FromStr>(slot: &mut T, name: &str, raw: &str) {
    match raw.trim().parse::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!("config: ignoring unparsable {ENV_PREFIX}{name}={raw}"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
