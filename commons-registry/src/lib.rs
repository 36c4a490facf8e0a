//! Batch lifecycle management for tools held by an external runtime.
//!
//! The runtime owns a mutable registry reachable through [`ToolHost`]. The
//! functions in this crate drive its single-item primitives to register,
//! remove, replace, and filter tools in batches, recording per-item failures
//! in the returned outcome rather than aborting.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod host;
mod lifecycle;
mod memory;
mod outcome;
mod spec;
mod summary;

pub use error::{HostError, HostResult, RegistryError, RegistryResult};
pub use host::ToolHost;
pub use lifecycle::{
    bulk_register, bulk_register_adapted, bulk_remove_tools, bulk_replace_tools,
    bulk_replace_tools_with_rollback, conditional_remove_tools, count_tools,
    get_registered_tools, register_catalog, tool_exists,
};
pub use memory::InMemoryToolHost;
pub use outcome::{OperationOutcome, RegistrationReport, ReplaceOutcome};
pub use spec::{AdaptedCatalog, ToolCatalog, ToolSpec};
pub use summary::log_registration_summary;
