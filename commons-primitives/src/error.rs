//! Shared error definitions for MCP commons primitives.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration-level errors raised while constructing tool descriptors.
///
/// These are fatal to the call that produced them and are never retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool name failed validation.
    #[error("invalid tool name `{name}`: {reason}")]
    InvalidToolName {
        /// The offending name.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Tool signature is missing required information.
    #[error("invalid signature for tool `{name}`: {reason}")]
    InvalidSignature {
        /// Name of the tool whose signature was rejected.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Input schema metadata is not usable by the hosting runtime.
    #[error("invalid input schema for tool `{name}`: {reason}")]
    InvalidSchema {
        /// Name of the tool whose schema was rejected.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
