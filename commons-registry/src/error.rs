//! Errors surfaced by the host boundary and the lifecycle operations.

use commons_adapter::AdapterError;
use thiserror::Error;

/// Result alias for host primitives.
pub type HostResult<T> = Result<T, HostError>;

/// Result alias for lifecycle operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors returned by the hosting runtime's single-item primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The runtime refused the tool name.
    #[error("invalid tool name `{name}`: {reason}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Reason reported by the runtime.
        reason: String,
    },

    /// The runtime could not build an invocation contract from the tool.
    #[error("malformed tool `{name}`: {reason}")]
    MalformedTool {
        /// Offending name.
        name: String,
        /// Reason reported by the runtime.
        reason: String,
    },

    /// No tool with this name is registered.
    #[error("tool `{name}` is not registered")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The runtime rejected an otherwise well-formed request.
    #[error("runtime rejected `{name}`: {reason}")]
    Rejected {
        /// Name the request targeted.
        name: String,
        /// Reason reported by the runtime.
        reason: String,
    },

    /// The runtime could not serve the request at all.
    #[error("tool host unavailable: {reason}")]
    Unavailable {
        /// Reason reported by the runtime.
        reason: String,
    },
}

impl HostError {
    /// Returns `true` for failures caused by the request itself rather than
    /// by the state of the registry.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidName { .. } | Self::MalformedTool { .. })
    }

    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a whole lifecycle call.
///
/// Per-item failures never show up here; they are recorded in the returned
/// outcome instead.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool descriptor failed plan-phase validation.
    #[error("invalid tool spec: {source}")]
    InvalidSpec {
        /// Validation failure.
        #[from]
        source: commons_primitives::Error,
    },

    /// The runtime reported a configuration-level failure mid-batch.
    #[error("tool host refused `{name}`: {source}")]
    HostConfiguration {
        /// Name being processed when the runtime refused it.
        name: String,
        /// Error reported by the runtime.
        #[source]
        source: HostError,
    },

    /// Wrapping a business function failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Enumerating the registry failed.
    #[error("failed to enumerate registered tools: {source}")]
    Enumeration {
        /// Error reported by the runtime.
        #[source]
        source: HostError,
    },
}

impl RegistryError {
    /// Returns `true` for every configuration-level failure.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::Enumeration { .. })
    }
}
