//! Layered configuration loading.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::debug;

use crate::error::ConfigResult;
use crate::schema::CommonsConfig;

/// Environment prefix read by [`ConfigLoader::new`].
pub const DEFAULT_ENV_PREFIX: &str = "MCP_";

/// Builds a [`CommonsConfig`] from defaults, a TOML file, and the environment.
///
/// Later sources override earlier ones.
#[derive(Clone, Debug)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader reading `MCP_*` variables and no file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.into(),
        }
    }

    /// Merges a TOML file over the defaults. A missing file is skipped.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Reads environment variables with this prefix instead.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Returns the merged provider stack without extracting it.
    #[must_use]
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(CommonsConfig::default()));
        if let Some(path) = &self.file {
            if path.exists() {
                debug!(path = %path.display(), "merging configuration file");
                figment = figment.merge(Toml::file(path));
            } else {
                debug!(path = %path.display(), "configuration file not found, skipping");
            }
        }
        figment.merge(Env::prefixed(&self.env_prefix))
    }

    /// Loads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Load`] when a source cannot be parsed and
    /// [`crate::ConfigError::Invalid`] when a value fails validation.
    pub fn load(&self) -> ConfigResult<CommonsConfig> {
        let config: CommonsConfig = self.figment().extract()?;
        config.validate()?;
        debug!(
            server = %config.server_name,
            transport = ?config.transport,
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Loads variables from a `.env` file into the process environment.
///
/// Returns `false` when the file does not exist.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Dotenv`] when the file exists but cannot be
/// parsed.
pub fn load_dotenv_file(path: impl AsRef<Path>) -> ConfigResult<bool> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(()) => {
            debug!(path = %path.as_ref().display(), "loaded dotenv file");
            Ok(true)
        }
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(err.into()),
    }
}
