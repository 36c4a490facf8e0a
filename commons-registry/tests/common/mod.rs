#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use commons_primitives::ToolResult;
use commons_registry::{HostError, HostResult, InMemoryToolHost, ToolHost, ToolSpec};
use serde_json::Value;

pub fn spec(name: &str, reply: &'static str) -> ToolSpec {
    ToolSpec::new(name, format!("Tool {name}"), move |_input: Value| async move {
        ToolResult::Ok(Value::from(reply))
    })
    .unwrap()
}

/// Host double that delegates to [`InMemoryToolHost`] but fails on demand.
#[derive(Default)]
pub struct ScriptedHost {
    pub inner: InMemoryToolHost,
    reject_adds: Mutex<HashSet<String>>,
    refuse_adds: Mutex<HashSet<String>>,
    reject_removes: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    unavailable: Mutex<bool>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// `add_tool(name)` fails with a per-item rejection.
    pub fn reject_add(&self, name: &str) {
        self.reject_adds.lock().unwrap().insert(name.to_owned());
    }

    /// `add_tool(name)` fails with a configuration-level error.
    pub fn refuse_add(&self, name: &str) {
        self.refuse_adds.lock().unwrap().insert(name.to_owned());
    }

    pub fn reject_remove(&self, name: &str) {
        self.reject_removes.lock().unwrap().insert(name.to_owned());
    }

    pub fn set_unavailable(&self) {
        *self.unavailable.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub async fn seed(&self, names: &[&'static str]) {
        for name in names {
            self.inner.add_tool(spec(name, name)).await.unwrap();
        }
    }
}

#[async_trait]
impl ToolHost for ScriptedHost {
    async fn add_tool(&self, spec: ToolSpec) -> HostResult<()> {
        let name = spec.name().to_owned();
        self.calls.lock().unwrap().push(format!("add:{name}"));
        if self.refuse_adds.lock().unwrap().contains(&name) {
            return Err(HostError::MalformedTool {
                name,
                reason: "scripted refusal".into(),
            });
        }
        if self.reject_adds.lock().unwrap().contains(&name) {
            return Err(HostError::rejected(name, "scripted rejection"));
        }
        self.inner.add_tool(spec).await
    }

    async fn remove_tool(&self, name: &str) -> HostResult<()> {
        self.calls.lock().unwrap().push(format!("remove:{name}"));
        if self.reject_removes.lock().unwrap().contains(name) {
            return Err(HostError::rejected(name, "scripted rejection"));
        }
        self.inner.remove_tool(name).await
    }

    async fn list_tools(&self) -> HostResult<Vec<String>> {
        if *self.unavailable.lock().unwrap() {
            return Err(HostError::Unavailable {
                reason: "scripted outage".into(),
            });
        }
        self.inner.list_tools().await
    }
}
