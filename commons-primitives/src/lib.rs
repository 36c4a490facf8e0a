//! Core shared types for MCP commons.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod signature;
mod tool;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Correlation identifier attached to every batch operation.
pub use ids::BatchId;
/// Declarative description of a tool's calling contract.
pub use signature::{ToolSignature, validate_tool_name};
/// Invocation seam implemented by every registered tool.
pub use tool::{Tool, ToolError, ToolResult};
