//! Result adapter for business logic exposed as tools.
//!
//! Business functions return whatever suits them; [`wrap`] turns them into
//! [`AdaptedTool`]s whose every invocation yields a [`ResultEnvelope`]. Errors
//! and panics raised by the business function become failure envelopes and
//! never cross the adapter boundary.

#![warn(missing_docs, clippy::pedantic)]

mod envelope;
mod error;
mod stats;
mod wrap;

pub use envelope::{EnvelopeError, IntoEnvelope, ResultEnvelope, validate_envelope};
pub use error::{AdapterError, AdapterResult};
pub use stats::{AdapterStats, StatsSnapshot};
pub use wrap::{AdaptedTool, BusinessFn, wrap, wrap_sync};
