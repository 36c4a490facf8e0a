//! Configuration errors.

use thiserror::Error;

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error("failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    /// A value parsed but is not acceptable.
    #[error("invalid configuration `{field}`: {reason}")]
    Invalid {
        /// Offending key.
        field: &'static str,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A `.env` file exists but could not be read.
    #[error("failed to load dotenv file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Load(Box::new(value))
    }
}
