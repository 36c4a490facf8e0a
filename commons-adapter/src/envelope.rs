//! The normalised success/data/error envelope.

use std::any::Any;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Normalised outcome of one business computation.
///
/// Exactly one of the two variants exists per invocation; the value is built
/// once and never mutated. On the wire it is the three-field object
/// `{ "success": bool, "data": ..., "error": ... }`, with optional `details`
/// on failures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "EnvelopeWire", try_from = "EnvelopeWire")]
pub enum ResultEnvelope {
    /// The computation produced a value.
    Success {
        /// Value returned by the business function.
        data: Value,
    },
    /// The computation failed.
    Failure {
        /// Stringified error message.
        error: String,
        /// Optional structured context.
        details: Option<Value>,
    },
}

impl ResultEnvelope {
    /// Builds a success envelope.
    #[must_use]
    pub fn success(data: impl Into<Value>) -> Self {
        Self::Success { data: data.into() }
    }

    /// Builds a failure envelope without details.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            details: None,
        }
    }

    /// Builds a failure envelope carrying structured details.
    #[must_use]
    pub fn failure_with_details(error: impl Into<String>, details: Value) -> Self {
        Self::Failure {
            error: error.into(),
            details: Some(details),
        }
    }

    /// Returns `true` for success envelopes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the payload of a success envelope.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the message of a failure envelope.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    /// Returns structured failure details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Failure { details, .. } => details.as_ref(),
            Self::Success { .. } => None,
        }
    }

    /// Converts the envelope into a plain `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure message for failure envelopes.
    pub fn into_result(self) -> Result<Value, String> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error, .. } => Err(error),
        }
    }

    /// Parses an envelope from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the payload is not an envelope or its
    /// fields contradict the success flag.
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let wire: EnvelopeWire =
            serde_json::from_value(value).map_err(|err| EnvelopeError::Malformed {
                reason: err.to_string(),
            })?;
        Self::try_from(wire)
    }

    /// Serialises the envelope into its JSON wire form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let wire = EnvelopeWire::from(self.clone());
        let mut object = serde_json::Map::new();
        object.insert("success".into(), Value::Bool(wire.success));
        object.insert("data".into(), wire.data);
        object.insert(
            "error".into(),
            wire.error.map_or(Value::Null, Value::String),
        );
        if let Some(details) = wire.details {
            object.insert("details".into(), details);
        }
        Value::Object(object)
    }
}

/// Returns `true` when the JSON payload is a well-formed envelope.
#[must_use]
pub fn validate_envelope(value: &Value) -> bool {
    ResultEnvelope::from_value(value.clone()).is_ok()
}

/// Errors produced while reading an envelope from JSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The payload does not have the envelope shape.
    #[error("malformed envelope: {reason}")]
    Malformed {
        /// Deserialisation failure.
        reason: String,
    },
    /// The fields contradict the success flag.
    #[error("inconsistent envelope: {reason}")]
    Inconsistent {
        /// Which field conflicts.
        reason: &'static str,
    },
}

#[derive(Serialize, Deserialize)]
struct EnvelopeWire {
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<ResultEnvelope> for EnvelopeWire {
    fn from(value: ResultEnvelope) -> Self {
        match value {
            ResultEnvelope::Success { data } => Self {
                success: true,
                data,
                error: None,
                details: None,
            },
            ResultEnvelope::Failure { error, details } => Self {
                success: false,
                data: Value::Null,
                error: Some(error),
                details,
            },
        }
    }
}

impl TryFrom<EnvelopeWire> for ResultEnvelope {
    type Error = EnvelopeError;

    fn try_from(wire: EnvelopeWire) -> Result<Self, Self::Error> {
        if wire.success {
            if wire.error.is_some() {
                return Err(EnvelopeError::Inconsistent {
                    reason: "success envelope carries an error",
                });
            }
            if wire.details.is_some() {
                return Err(EnvelopeError::Inconsistent {
                    reason: "success envelope carries failure details",
                });
            }
            return Ok(Self::Success { data: wire.data });
        }

        if !wire.data.is_null() {
            return Err(EnvelopeError::Inconsistent {
                reason: "failure envelope carries data",
            });
        }
        match wire.error {
            Some(error) if !error.trim().is_empty() => Ok(Self::Failure {
                error,
                details: wire.details,
            }),
            _ => Err(EnvelopeError::Inconsistent {
                reason: "failure envelope is missing an error message",
            }),
        }
    }
}

/// Conversion from a business function's return value into an envelope.
///
/// `ResultEnvelope` converts to itself, which is what makes wrapping
/// idempotent. `Ok` values are checked by type, not by shape: an
/// `Ok(ResultEnvelope)` passes through, anything else is serialised and boxed
/// as success.
pub trait IntoEnvelope {
    /// Performs the conversion.
    fn into_envelope(self) -> ResultEnvelope;
}

impl IntoEnvelope for ResultEnvelope {
    fn into_envelope(self) -> ResultEnvelope {
        self
    }
}

impl IntoEnvelope for Value {
    fn into_envelope(self) -> ResultEnvelope {
        ResultEnvelope::Success { data: self }
    }
}

impl<T, E> IntoEnvelope for Result<T, E>
where
    T: Serialize + 'static,
    E: Display,
{
    fn into_envelope(self) -> ResultEnvelope {
        match self {
            Ok(value) => box_value(&value),
            Err(err) => ResultEnvelope::failure(err.to_string()),
        }
    }
}

fn box_value<T: Serialize + 'static>(value: &T) -> ResultEnvelope {
    if let Some(envelope) = (value as &dyn Any).downcast_ref::<ResultEnvelope>() {
        return envelope.clone();
    }
    match serde_json::to_value(value) {
        Ok(data) => ResultEnvelope::Success { data },
        Err(err) => ResultEnvelope::failure(format!("failed to serialise result: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: &'static str,
    }

    #[test]
    fn boxes_plain_values() {
        let envelope = Ok::<_, String>(User { id: 7, name: "ada" }).into_envelope();
        assert_eq!(envelope, ResultEnvelope::success(json!({ "id": 7, "name": "ada" })));
    }

    #[test]
    fn errors_become_failures() {
        let envelope = Err::<Value, _>("user not found").into_envelope();
        assert!(!envelope.is_success());
        assert_eq!(envelope.error(), Some("user not found"));
        assert_eq!(envelope.data(), None);
    }

    #[test]
    fn ok_envelope_passes_through() {
        let inner = ResultEnvelope::failure_with_details("quota", json!({ "limit": 3 }));
        let envelope = Ok::<_, String>(inner.clone()).into_envelope();
        assert_eq!(envelope, inner);
    }

    #[test]
    fn wire_form_has_three_fields() {
        assert_eq!(
            ResultEnvelope::success(json!([1, 2])).to_value(),
            json!({ "success": true, "data": [1, 2], "error": null })
        );
        assert_eq!(
            serde_json::to_value(ResultEnvelope::failure("nope")).unwrap(),
            json!({ "success": false, "data": null, "error": "nope" })
        );
    }

    #[test]
    fn parses_and_validates_wire_form() {
        let parsed = ResultEnvelope::from_value(json!({
            "success": false,
            "error": "bad input",
            "details": { "field": "id" }
        }))
        .unwrap();
        assert_eq!(parsed.details(), Some(&json!({ "field": "id" })));

        assert!(validate_envelope(&json!({ "success": true, "data": 1 })));
        assert!(!validate_envelope(&json!({ "data": 1 })));
        assert!(!validate_envelope(&json!("plain")));
        assert!(!validate_envelope(&json!({ "success": true, "data": 1, "error": "x" })));
        assert!(!validate_envelope(&json!({ "success": false, "data": 1, "error": "x" })));
        assert!(!validate_envelope(&json!({ "success": false, "error": "" })));
    }
}
