//! Configuration management for MCP commons servers.
//!
//! Settings are layered with `figment`: built-in defaults, then an optional
//! TOML file, then `MCP_`-prefixed environment variables.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod loader;
mod logging;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX, load_dotenv_file};
pub use logging::init_tracing;
pub use schema::{CommonsConfig, Transport};
