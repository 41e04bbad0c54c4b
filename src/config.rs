//! Configuration loading for the embedding.
//!
//! Only ambient behaviour is configurable: how the guard treats an
//! interpreter that is already live, and how logs are emitted. The core
//! interpreter policy is fixed in [`crate::policy`] and has no knobs here.
//!
//! All sections use `#[serde(default)]`, so an empty document is valid.
//! Inside the sandbox the document is usually embedded with `include_str!`
//! and parsed through [`BootConfig::from_toml_str`].

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::guard::{ForeignLiveness, InitGuard};

/// Top-level embedding configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootConfig {
    /// Init guard behaviour.
    #[serde(default)]
    pub guard: GuardConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BootConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("failed to parse boot config")
    }
}

/// Init guard settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardConfig {
    /// What to do when the interpreter is live but the guard is unset.
    #[serde(default)]
    pub foreign_liveness: ForeignLiveness,
}

impl GuardConfig {
    /// Build an unset guard carrying these settings.
    pub fn build_guard(&self) -> InitGuard {
        InitGuard::with_foreign_liveness(self.foreign_liveness)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}

/// Load the boot config from a TOML file on the host.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<BootConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read boot config at {}", path.display()))?;
    BootConfig::from_toml_str(&contents)
        .with_context(|| format!("invalid boot config at {}", path.display()))
}
