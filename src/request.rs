//! Request marshalling: turning a classified payload into a transport-ready
//! request body, validated against the declared schema.

use std::fmt;

use serde_json::{Map, Value};

use crate::description::{Form, OperationKind};
use crate::error::InteractionError;
use crate::payload::PayloadShape;
use crate::schema::{json_type_name, DataSchema};

/// An in-flight request: built once per invocation, consumed exactly once by
/// the transport (or rendered and discarded in dry-run mode).
#[derive(Debug, Clone)]
pub struct ThingRequest {
    pub method: String,
    pub target: String,
    pub operation: OperationKind,
    pub body: Option<Value>,
}

impl ThingRequest {
    /// Render the request as a human-readable log line.
    pub fn to_log_string(&self) -> String {
        match &self.body {
            Some(body) => format!(
                "[{}] {} {} payload: {}",
                self.operation, self.method, self.target, body
            ),
            None => format!("[{}] {} {}", self.operation, self.method, self.target),
        }
    }
}

impl fmt::Display for ThingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_log_string())
    }
}

/// Build the request for `operation` through `form`, marshalling `shape`
/// against the declared schema.
///
/// # Errors
///
/// Returns a shape or coercion error when the payload contradicts the
/// schema; no request is issued in that case.
pub fn build_request(
    form: &Form,
    operation: OperationKind,
    shape: PayloadShape,
    schema: Option<&DataSchema>,
) -> Result<ThingRequest, InteractionError> {
    let body = match shape {
        PayloadShape::Empty => None,
        PayloadShape::Scalar(value) => Some(marshal_scalar(value, schema)?),
        PayloadShape::Sequence(values) => Some(marshal_sequence(values, schema)?),
        PayloadShape::Fields(fields) => Some(marshal_fields(fields, schema)?),
    };

    Ok(ThingRequest {
        method: form.method(operation).to_string(),
        target: form.href.clone(),
        operation,
        body,
    })
}

/// Validate a scalar value against the declared scalar schema.
///
/// Integral values satisfy both integer and number schemas (within-family
/// coercion); any other combination is a mismatch.
fn marshal_scalar(value: Value, schema: Option<&DataSchema>) -> Result<Value, InteractionError> {
    let declared = match schema {
        Some(s) => s,
        None => return Ok(value),
    };

    let ok = match declared {
        DataSchema::Boolean => value.is_boolean(),
        DataSchema::String => value.is_string(),
        DataSchema::Integer => value.as_number().map(|n| !n.is_f64()).unwrap_or(false),
        DataSchema::Number => value.is_number(),
        _ => false,
    };

    if ok {
        Ok(value)
    } else {
        Err(InteractionError::PrimitiveMismatch {
            declared: declared.type_name(),
            actual: json_type_name(&value),
        })
    }
}

fn marshal_sequence(
    values: Vec<Value>,
    schema: Option<&DataSchema>,
) -> Result<Value, InteractionError> {
    match schema {
        Some(DataSchema::Array(_)) => Ok(Value::Array(values)),
        Some(other) => Err(InteractionError::SchemaMismatch {
            declared: other.type_name(),
        }),
        None => Ok(Value::Array(values)),
    }
}

/// Build the object body, keeping only tags that name declared fields.
/// Undeclared tags are dropped silently.
fn marshal_fields(
    fields: Vec<(String, Value)>,
    schema: Option<&DataSchema>,
) -> Result<Value, InteractionError> {
    let declared = match schema {
        Some(s @ DataSchema::Object(_)) => s,
        Some(other) => {
            return Err(InteractionError::SchemaMismatch {
                declared: other.type_name(),
            })
        }
        None => {
            return Err(InteractionError::SchemaMismatch { declared: "none" });
        }
    };

    let mut body = Map::new();
    for (tag, value) in fields {
        if declared.field(&tag).is_some() {
            body.insert(tag, value);
        }
    }

    Ok(Value::Object(body))
}
