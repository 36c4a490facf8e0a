//! Boundary consumed from the hosting runtime.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HostResult;
use crate::spec::ToolSpec;

/// Capability set of a mutable tool registry owned by a hosting runtime.
///
/// Lifecycle operations take a handle to this trait explicitly and never keep
/// a copy of what it holds: every inspection is a live call, because the
/// runtime may mutate the registry behind this layer's back.
#[async_trait]
pub trait ToolHost: Send + Sync {
    /// Registers a single tool. An existing tool with the same name is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HostError::InvalidName`] or
    /// [`crate::HostError::MalformedTool`] when the runtime cannot accept the
    /// descriptor.
    async fn add_tool(&self, spec: ToolSpec) -> HostResult<()>;

    /// Removes a single tool.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HostError::NotFound`] when no tool has this name.
    async fn remove_tool(&self, name: &str) -> HostResult<()>;

    /// Lists registered tool names. Ordering is whatever the runtime
    /// documents; callers needing determinism must sort.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HostError::Unavailable`] when the registry cannot be
    /// read.
    async fn list_tools(&self) -> HostResult<Vec<String>>;
}

#[async_trait]
impl<H> ToolHost for Arc<H>
where
    H: ToolHost + ?Sized,
{
    async fn add_tool(&self, spec: ToolSpec) -> HostResult<()> {
        (**self).add_tool(spec).await
    }

    async fn remove_tool(&self, name: &str) -> HostResult<()> {
        (**self).remove_tool(name).await
    }

    async fn list_tools(&self) -> HostResult<Vec<String>> {
        (**self).list_tools().await
    }
}
