//! Declarative tool descriptors and ordered batches of them.

use std::fmt;
use std::sync::Arc;

use commons_adapter::{AdaptedTool, AdapterStats, BusinessFn, wrap};
use commons_primitives::{Tool, ToolSignature};
use serde_json::Value;

use crate::error::{RegistryError, RegistryResult};

/// A tool ready to be handed to the hosting runtime.
///
/// Built by the caller and consumed by a lifecycle operation; once registered
/// the runtime owns the live tool.
#[derive(Clone)]
pub struct ToolSpec {
    signature: ToolSignature,
    handler: Arc<dyn Tool>,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl ToolSpec {
    /// Creates a spec from a name, a description, and an invocable handler.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidSpec`] if the name is invalid.
    pub fn new<T>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: T,
    ) -> RegistryResult<Self>
    where
        T: Tool + 'static,
    {
        let signature = ToolSignature::new(name, description)?;
        Ok(Self::from_parts(signature, Arc::new(handler)))
    }

    /// Creates a spec from an existing signature and shared handler.
    #[must_use]
    pub fn from_parts(signature: ToolSignature, handler: Arc<dyn Tool>) -> Self {
        Self { signature, handler }
    }

    /// Attaches input schema metadata.
    #[must_use]
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.signature = self.signature.with_input_schema(schema);
        self
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.signature.description()
    }

    /// Returns the full signature.
    #[must_use]
    pub fn signature(&self) -> &ToolSignature {
        &self.signature
    }

    /// Returns the invocable handler.
    #[must_use]
    pub fn handler(&self) -> Arc<dyn Tool> {
        Arc::clone(&self.handler)
    }

    /// Validates the descriptor before it reaches the runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidSpec`] on any signature problem.
    pub fn validate(&self) -> RegistryResult<()> {
        self.signature.validate().map_err(RegistryError::from)
    }
}

impl From<AdaptedTool> for ToolSpec {
    fn from(tool: AdaptedTool) -> Self {
        let signature = tool.signature().clone();
        Self::from_parts(signature, Arc::new(tool))
    }
}

/// Ordered mapping of tool name to [`ToolSpec`].
///
/// Iteration follows first-insertion order. Inserting a name that is already
/// present replaces that entry in place.
#[derive(Clone, Debug, Default)]
pub struct ToolCatalog {
    specs: Vec<ToolSpec>,
}

impl ToolCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from `(name, handler, description)` tuples.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidSpec`] on the first invalid name.
    pub fn from_tuples<I, N, D>(entries: I) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = (N, Arc<dyn Tool>, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let mut catalog = Self::new();
        for (name, handler, description) in entries {
            let signature = ToolSignature::new(name, description)?;
            catalog.insert(ToolSpec::from_parts(signature, handler));
        }
        Ok(catalog)
    }

    /// Inserts a spec, returning the one it replaced.
    pub fn insert(&mut self, spec: ToolSpec) -> Option<ToolSpec> {
        match self.specs.iter_mut().find(|existing| existing.name() == spec.name()) {
            Some(existing) => Some(std::mem::replace(existing, spec)),
            None => {
                self.specs.push(spec);
                None
            }
        }
    }

    /// Builder-style [`Self::insert`].
    #[must_use]
    pub fn with(mut self, spec: ToolSpec) -> Self {
        self.insert(spec);
        self
    }

    /// Returns the spec registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }

    /// Returns `true` if `name` is in the catalog.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the names in iteration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(ToolSpec::name).collect()
    }

    /// Number of specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterates specs in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ToolSpec> {
        self.specs.iter()
    }

    /// Checks every spec, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidSpec`] naming the offending tool.
    pub fn validate(&self) -> RegistryResult<()> {
        self.specs.iter().try_for_each(ToolSpec::validate)
    }
}

impl FromIterator<ToolSpec> for ToolCatalog {
    fn from_iter<I: IntoIterator<Item = ToolSpec>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for spec in iter {
            catalog.insert(spec);
        }
        catalog
    }
}

impl IntoIterator for ToolCatalog {
    type Item = ToolSpec;
    type IntoIter = std::vec::IntoIter<ToolSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.into_iter()
    }
}

impl<'a> IntoIterator for &'a ToolCatalog {
    type Item = &'a ToolSpec;
    type IntoIter = std::slice::Iter<'a, ToolSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

/// Catalog builder that wraps business functions with the result adapter.
///
/// Wrapping happens on [`Self::tool`], so signature problems surface while
/// the catalog is assembled, before anything reaches the runtime.
#[derive(Debug, Default)]
pub struct AdaptedCatalog {
    catalog: ToolCatalog,
    stats: Option<Arc<AdapterStats>>,
}

impl AdaptedCatalog {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares one set of counters across every tool added afterwards.
    #[must_use]
    pub fn with_stats(mut self, stats: Arc<AdapterStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Wraps `business` and adds it under the signature's name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Adapter`] when the signature is rejected.
    pub fn tool<B>(mut self, signature: ToolSignature, business: B) -> RegistryResult<Self>
    where
        B: BusinessFn,
    {
        let mut adapted = wrap(signature, business)?;
        if let Some(stats) = &self.stats {
            adapted = adapted.with_stats(Arc::clone(stats));
        }
        self.catalog.insert(adapted.into());
        Ok(self)
    }

    /// Finishes building.
    #[must_use]
    pub fn into_catalog(self) -> ToolCatalog {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use commons_primitives::ToolResult;
    use serde_json::json;

    use super::*;

    fn echo() -> Arc<dyn Tool> {
        Arc::new(|input: Value| async move { ToolResult::Ok(input) })
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog = ToolCatalog::new();
        catalog.insert(ToolSpec::new("a", "first", echo_handler()).unwrap());
        catalog.insert(ToolSpec::new("b", "second", echo_handler()).unwrap());
        let replaced = catalog.insert(ToolSpec::new("a", "third", echo_handler()).unwrap());

        assert_eq!(replaced.map(|spec| spec.description().to_owned()).as_deref(), Some("first"));
        assert_eq!(catalog.names(), vec!["a", "b"]);
        assert_eq!(catalog.get("a").map(ToolSpec::description), Some("third"));
    }

    #[test]
    fn from_tuples_keeps_order() {
        let catalog = ToolCatalog::from_tuples([
            ("zeta", echo(), "Z"),
            ("alpha", echo(), "A"),
            ("mid", echo(), "M"),
        ])
        .unwrap();
        assert_eq!(catalog.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn from_tuples_rejects_bad_names() {
        let err = ToolCatalog::from_tuples([("bad name", echo(), "x")]).expect_err("invalid");
        assert!(matches!(err, RegistryError::InvalidSpec { .. }));
    }

    #[test]
    fn validate_reports_first_invalid_spec() {
        let catalog = ToolCatalog::new()
            .with(ToolSpec::new("good", "fine", echo_handler()).unwrap())
            .with(ToolSpec::new("blank", "", echo_handler()).unwrap())
            .with(
                ToolSpec::new("schema", "bad schema", echo_handler())
                    .unwrap()
                    .with_input_schema(json!("nope")),
            );

        let err = catalog.validate().expect_err("blank description");
        assert!(err.to_string().contains("blank"), "{err}");
    }

    #[test]
    fn adapted_catalog_rejects_bad_signatures() {
        let err = AdaptedCatalog::new()
            .tool(ToolSignature::new("x", " ").unwrap(), |input: Value| async move {
                Ok::<_, String>(input)
            })
            .expect_err("blank description");
        assert!(matches!(err, RegistryError::Adapter(_)));
    }

    fn echo_handler() -> impl Tool + 'static {
        |input: Value| async move { ToolResult::Ok(input) }
    }
}
