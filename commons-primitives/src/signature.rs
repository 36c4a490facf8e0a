//! Tool signatures advertised to the hosting runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

const MAX_NAME_LEN: usize = 128;

/// Calling contract of a tool: its name, documentation, and input schema.
///
/// The hosting runtime builds its invocation contract from this descriptor,
/// so wrappers must hand it through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSignature {
    name: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input_schema: Option<Value>,
}

impl ToolSignature {
    /// Creates a signature for the supplied name and description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToolName`] if the name is empty, too long, or
    /// contains unsupported characters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_tool_name(&name)?;
        Ok(Self {
            name,
            description: description.into(),
            input_schema: None,
        })
    }

    /// Attaches JSON schema metadata describing the tool input.
    #[must_use]
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the optional input schema.
    #[must_use]
    pub fn input_schema(&self) -> Option<&Value> {
        self.input_schema.as_ref()
    }

    /// Returns the parameter names declared by the input schema, sorted.
    #[must_use]
    pub fn parameter_names(&self) -> Vec<&str> {
        self.input_schema
            .as_ref()
            .and_then(|schema| schema.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Checks the whole descriptor, not just the name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignature`] when the description is blank and
    /// [`Error::InvalidSchema`] when the schema is not a JSON object schema.
    pub fn validate(&self) -> Result<()> {
        validate_tool_name(&self.name)?;

        if self.description.trim().is_empty() {
            return Err(Error::InvalidSignature {
                name: self.name.clone(),
                reason: "description cannot be empty".into(),
            });
        }

        if let Some(schema) = &self.input_schema {
            let Some(object) = schema.as_object() else {
                return Err(Error::InvalidSchema {
                    name: self.name.clone(),
                    reason: "schema must be a JSON object".into(),
                });
            };
            match object.get("type") {
                None => {}
                Some(Value::String(kind)) if kind == "object" => {}
                Some(other) => {
                    return Err(Error::InvalidSchema {
                        name: self.name.clone(),
                        reason: format!("schema type must be `object`, found {other}"),
                    });
                }
            }
            if let Some(props) = object.get("properties") {
                if !props.is_object() {
                    return Err(Error::InvalidSchema {
                        name: self.name.clone(),
                        reason: "`properties` must be an object".into(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Validates a tool name against the characters hosting runtimes accept.
///
/// # Errors
///
/// Returns [`Error::InvalidToolName`] if the name is empty, longer than the
/// supported maximum, or contains characters other than ASCII alphanumerics,
/// `_`, `-`, and `.`.
pub fn validate_tool_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidToolName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(Error::InvalidToolName {
            name: name.into(),
            reason: format!("name length must be <= {MAX_NAME_LEN}"),
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(Error::InvalidToolName {
            name: name.into(),
            reason: "name must contain ascii alphanumeric, dash, underscore, or dot".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_typical_names() {
        for name in ["search", "get_user", "repo.list-files", "tmp_1"] {
            validate_tool_name(name).unwrap();
        }
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["", "   ", "has space", "emoji🙂"] {
            let err = validate_tool_name(name).expect_err("should fail");
            assert!(matches!(err, Error::InvalidToolName { .. }));
        }

        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(validate_tool_name(&long).is_err());
    }

    #[test]
    fn validate_requires_description() {
        let signature = ToolSignature::new("echo", "  ").unwrap();
        let err = signature.validate().expect_err("blank description");
        assert!(matches!(err, Error::InvalidSignature { name, .. } if name == "echo"));
    }

    #[test]
    fn validate_checks_schema_shape() {
        let bad = ToolSignature::new("echo", "Echo").unwrap().with_input_schema(json!([1, 2]));
        assert!(matches!(bad.validate(), Err(Error::InvalidSchema { .. })));

        let wrong_type = ToolSignature::new("echo", "Echo")
            .unwrap()
            .with_input_schema(json!({ "type": "string" }));
        assert!(matches!(wrong_type.validate(), Err(Error::InvalidSchema { .. })));

        let good = ToolSignature::new("echo", "Echo").unwrap().with_input_schema(json!({
            "type": "object",
            "properties": { "message": { "type": "string" }, "count": { "type": "integer" } }
        }));
        good.validate().unwrap();
        assert_eq!(good.parameter_names(), vec!["count", "message"]);
    }
}
