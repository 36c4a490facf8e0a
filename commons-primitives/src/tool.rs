//! Invocation seam shared by the adapter and the registry.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Result alias for tool invocations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Trait implemented by anything the hosting runtime can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Invokes the tool with the given JSON input, returning JSON output.
    async fn invoke(&self, input: Value) -> ToolResult<Value>;
}

#[async_trait]
impl<F, Fut> Tool for F
where
    F: Send + Sync + Fn(Value) -> Fut,
    Fut: Future<Output = ToolResult<Value>> + Send,
{
    async fn invoke(&self, input: Value) -> ToolResult<Value> {
        (self)(input).await
    }
}

/// Errors produced while invoking a tool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The input payload did not match what the tool expects.
    #[error("invalid tool input: {reason}")]
    InvalidInput {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Tool execution failed.
    #[error("tool execution failed: {reason}")]
    Execution {
        /// Human-readable error returned by the tool implementation.
        reason: String,
    },
}

impl ToolError {
    /// Creates an execution error from the supplied reason.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }

    /// Creates an input error from the supplied reason.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
