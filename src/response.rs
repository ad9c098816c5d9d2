//! Response unmarshalling: schema-directed decoding of a read response into
//! caller-facing value trees.

use serde_json::Value;

use crate::error::InteractionError;
use crate::schema::{json_type_name, DataSchema};

/// A caller-facing value: a scalar or an arbitrarily nested list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    List(Vec<OutputValue>),
}

impl OutputValue {
    /// Render the value tree back as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            OutputValue::Bool(b) => Value::Bool(*b),
            OutputValue::Integer(i) => Value::from(*i),
            OutputValue::Number(n) => Value::from(*n),
            OutputValue::String(s) => Value::String(s.clone()),
            OutputValue::List(items) => Value::Array(items.iter().map(|v| v.to_json()).collect()),
        }
    }
}

/// A decoded read result.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Scalar and array schemas: the value sequence.
    Values(Vec<OutputValue>),
    /// Object schemas, when the caller asked for tags: parallel tag and
    /// value sequences in field enumeration order.
    Fields {
        tags: Vec<String>,
        values: Vec<OutputValue>,
    },
}

/// Decode a successful response payload according to the declared schema.
///
/// Scalars become a single-element sequence; arrays are converted
/// recursively at arbitrary depth with scalar elements untouched; objects
/// are flattened into parallel tag/value sequences, but only when
/// `want_tags` is set. An object read without tags, and a `null` schema,
/// produce `Ok(None)`: no output, not an error.
///
/// # Errors
///
/// Returns `DecodeMismatch` when the payload's JSON type contradicts the
/// declared scalar type, or when an array schema receives a non-array.
pub fn decode(
    schema: &DataSchema,
    payload: &Value,
    want_tags: bool,
) -> Result<Option<Decoded>, InteractionError> {
    match schema {
        DataSchema::Boolean => {
            let value = payload.as_bool().ok_or_else(|| mismatch("boolean", payload))?;
            Ok(Some(Decoded::Values(vec![OutputValue::Bool(value)])))
        }
        DataSchema::String => {
            let value = payload.as_str().ok_or_else(|| mismatch("string", payload))?;
            Ok(Some(Decoded::Values(vec![OutputValue::String(
                value.to_string(),
            )])))
        }
        DataSchema::Integer => {
            let value = payload.as_i64().ok_or_else(|| mismatch("integer", payload))?;
            Ok(Some(Decoded::Values(vec![OutputValue::Integer(value)])))
        }
        DataSchema::Number => {
            let value = payload.as_f64().ok_or_else(|| mismatch("number", payload))?;
            Ok(Some(Decoded::Values(vec![OutputValue::Number(value)])))
        }
        DataSchema::Array(_) => {
            let items = payload.as_array().ok_or_else(|| mismatch("array", payload))?;
            let values = items
                .iter()
                .map(convert_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Decoded::Values(values)))
        }
        DataSchema::Object(_) => {
            if !want_tags {
                // Only the tag-output read form can surface an object.
                return Ok(None);
            }
            let map = payload.as_object().ok_or_else(|| mismatch("object", payload))?;
            let mut tags = Vec::with_capacity(map.len());
            let mut values = Vec::with_capacity(map.len());
            for (tag, value) in map {
                tags.push(tag.clone());
                values.push(convert_value(value)?);
            }
            Ok(Some(Decoded::Fields { tags, values }))
        }
        DataSchema::Null => Ok(None),
    }
}

/// Convert one response element: nested arrays recursively, scalars as-is.
fn convert_value(value: &Value) -> Result<OutputValue, InteractionError> {
    match value {
        Value::Bool(b) => Ok(OutputValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(OutputValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(OutputValue::Number(f))
            } else {
                Err(mismatch("number", value))
            }
        }
        Value::String(s) => Ok(OutputValue::String(s.clone())),
        Value::Array(items) => {
            let converted = items
                .iter()
                .map(convert_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(OutputValue::List(converted))
        }
        other => Err(mismatch("scalar or array", other)),
    }
}

fn mismatch(expected: &'static str, actual: &Value) -> InteractionError {
    InteractionError::DecodeMismatch {
        expected,
        actual: json_type_name(actual),
    }
}
