//! Strongly typed configuration schema.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// How the hosting runtime is exposed. Recorded only; transports live in the
/// runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Standard input/output.
    #[default]
    Stdio,
    /// Server-sent events.
    Sse,
    /// Streamable HTTP.
    Http,
}

/// Settings shared by every server built on MCP commons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonsConfig {
    /// Name used in startup logs and registration summaries.
    pub server_name: String,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,
    /// Transport the runtime is started with.
    pub transport: Transport,
}

impl Default for CommonsConfig {
    fn default() -> Self {
        Self {
            server_name: "mcp-server".into(),
            log_level: "info".into(),
            json_logs: false,
            transport: Transport::Stdio,
        }
    }
}

impl CommonsConfig {
    /// Checks values that deserialise but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a blank server name or an unknown
    /// log level.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "server_name",
                reason: "cannot be empty".into(),
            });
        }

        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: format!("expected one of {LOG_LEVELS:?}, found `{}`", self.log_level),
            });
        }

        Ok(())
    }
}
