//! In-process tool host keeping registrations in insertion order.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use commons_primitives::{Tool, ToolError, ToolSignature};
use serde_json::Value;
use tracing::debug;

use crate::error::{HostError, HostResult};
use crate::host::ToolHost;
use crate::spec::ToolSpec;

/// Minimal [`ToolHost`] backed by process memory.
///
/// Follows the usual runtime semantics: adding an existing name replaces the
/// tool in place, removing an unknown name fails with
/// [`HostError::NotFound`], and enumeration returns insertion order.
#[derive(Default)]
pub struct InMemoryToolHost {
    inner: RwLock<Vec<ToolSpec>>,
}

impl std::fmt::Debug for InMemoryToolHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.read().map(|tools| {
            tools
                .iter()
                .map(|spec| spec.name().to_owned())
                .collect::<Vec<_>>()
        });
        f.debug_struct("InMemoryToolHost")
            .field("registered", &names.unwrap_or_default())
            .finish()
    }
}

impl InMemoryToolHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signature of a registered tool.
    #[must_use]
    pub fn signature(&self, name: &str) -> Option<ToolSignature> {
        let tools = self.read().ok()?;
        tools
            .iter()
            .find(|spec| spec.name() == name)
            .map(|spec| spec.signature().clone())
    }

    /// Invokes a registered tool directly.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidInput`] when the tool is not registered or
    /// propagates the tool's own error.
    pub async fn invoke(&self, name: &str, input: Value) -> Result<Value, ToolError> {
        let handler = self
            .read()
            .ok()
            .and_then(|tools| {
                tools
                    .iter()
                    .find(|spec| spec.name() == name)
                    .map(ToolSpec::handler)
            })
            .ok_or_else(|| ToolError::invalid_input(format!("tool `{name}` is not registered")))?;
        handler.invoke(input).await
    }

    fn read(&self) -> HostResult<RwLockReadGuard<'_, Vec<ToolSpec>>> {
        self.inner.read().map_err(|_| HostError::Unavailable {
            reason: "tool registry lock poisoned".into(),
        })
    }

    fn write(&self) -> HostResult<RwLockWriteGuard<'_, Vec<ToolSpec>>> {
        self.inner.write().map_err(|_| HostError::Unavailable {
            reason: "tool registry lock poisoned".into(),
        })
    }
}

#[async_trait]
impl ToolHost for InMemoryToolHost {
    async fn add_tool(&self, spec: ToolSpec) -> HostResult<()> {
        if let Err(err) = commons_primitives::validate_tool_name(spec.name()) {
            return Err(HostError::InvalidName {
                name: spec.name().to_owned(),
                reason: err.to_string(),
            });
        }
        if let Err(err) = spec.signature().validate() {
            return Err(HostError::MalformedTool {
                name: spec.name().to_owned(),
                reason: err.to_string(),
            });
        }

        let mut tools = self.write()?;
        match tools.iter_mut().find(|existing| existing.name() == spec.name()) {
            Some(existing) => {
                debug!(tool = %spec.name(), "replacing registered tool");
                *existing = spec;
            }
            None => tools.push(spec),
        }
        Ok(())
    }

    async fn remove_tool(&self, name: &str) -> HostResult<()> {
        let mut tools = self.write()?;
        let position = tools
            .iter()
            .position(|spec| spec.name() == name)
            .ok_or_else(|| HostError::NotFound { name: name.into() })?;
        tools.remove(position);
        Ok(())
    }

    async fn list_tools(&self) -> HostResult<Vec<String>> {
        let tools = self.read()?;
        Ok(tools.iter().map(|spec| spec.name().to_owned()).collect())
    }
}
