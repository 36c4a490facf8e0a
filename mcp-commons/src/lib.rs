//! Shared infrastructure for MCP servers.
//!
//! Bundles the workspace crates behind feature flags: the result adapter that
//! gives business logic a uniform success/failure envelope, the batch
//! lifecycle operations over a runtime's tool registry, and configuration.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use commons_primitives as primitives;

/// Result adapter (enabled by `adapter` feature).
#[cfg(feature = "adapter")]
pub use commons_adapter as adapter;

/// Tool registry lifecycle (enabled by `registry` feature).
#[cfg(feature = "registry")]
pub use commons_registry as registry;

/// Configuration and logging bootstrap (enabled by `config` feature).
#[cfg(feature = "config")]
pub use commons_config as config;

/// Version of the commons crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
