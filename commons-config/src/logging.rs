//! Logging bootstrap.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::schema::CommonsConfig;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns `false` when a global
/// subscriber was already installed, leaving it untouched.
///
/// # Errors
///
/// Fails when neither `RUST_LOG` nor the configured level is a valid filter.
pub fn init_tracing(config: &CommonsConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level `{}`", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}
