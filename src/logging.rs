//! Structured logging setup using `tracing-subscriber`.
//!
//! Two formats, both on stderr:
//! - **Console** ([`init_console`]): human-readable lines
//! - **JSON** ([`init_json`]): one object per event, for hosts that collect
//!   the sandbox's stderr
//!
//! There is no file layer: the sandbox has no writable filesystem. Every
//! initializer uses `try_init`, so a host that already installed a
//! subscriber gets an error instead of a panic.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// `RUST_LOG` when set, otherwise `default_level`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install a human-readable stderr subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_console(default_level: &str) -> anyhow::Result<()> {
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install console subscriber: {e}"))
}

/// Install a JSON stderr subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_json(default_level: &str) -> anyhow::Result<()> {
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install json subscriber: {e}"))
}

/// Install the subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    match config.format {
        LogFormat::Pretty => init_console(&config.level),
        LogFormat::Json => init_json(&config.level),
    }
}
