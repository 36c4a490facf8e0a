//! Errors raised while adapting business functions.

use thiserror::Error;

/// Result alias for adapter construction.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors emitted at wrap time. Invocation-time failures are envelopes, not errors.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The signature handed to [`crate::wrap`] is unusable by the hosting runtime.
    #[error("adapter configuration error: {source}")]
    Configuration {
        /// Underlying validation failure.
        #[from]
        source: commons_primitives::Error,
    },
}
