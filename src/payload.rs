//! Payload classification.
//!
//! Callers hand the engine loosely-typed argument lists: an ordered sequence
//! of JSON values, optionally paired with an equal-length list of field-name
//! tags. Classification happens exactly once, at the call boundary, and
//! produces a [`PayloadShape`]; everything downstream pattern-matches the
//! shape instead of re-inspecting runtime types.

use serde_json::Value;

use crate::error::InteractionError;
use crate::schema::{json_type_name, DataSchema};

/// The classified shape of a caller-supplied payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape {
    /// No payload declared and none supplied; the request gets no body.
    Empty,
    /// A single scalar value (boolean, integer, number, or string).
    Scalar(Value),
    /// The full value sequence, serialized as an array body.
    Sequence(Vec<Value>),
    /// Field-name/value pairs, zipped positionally from tags and values.
    Fields(Vec<(String, Value)>),
}

/// Classify tags and values against the declared schema.
///
/// Evaluation order matters and follows the engine's contract:
///
/// 1. No schema declared: `Empty` (the façade has already rejected payloads
///    the affordance cannot accept).
/// 2. Tags present: `Fields`. The schema must be object-typed.
/// 3. One value that is not itself a sequence: `Scalar`. The value's runtime
///    kind must be boolean, integral, floating, or string.
/// 4. Any other non-empty value list: `Sequence`. The schema must be
///    array-typed.
/// 5. Schema declared but nothing supplied: the shape is undeterminable.
///
/// Tag/value arity is the façade's concern and is checked before this runs.
///
/// # Errors
///
/// `SchemaMismatch` when the shape contradicts the declared schema type,
/// `UnsupportedPrimitive` when a single value has no scalar runtime kind,
/// `UndeterminedShape` for rule 5.
pub fn classify(
    tags: &[String],
    values: &[Value],
    schema: Option<&DataSchema>,
) -> Result<PayloadShape, InteractionError> {
    let Some(schema) = schema else {
        return Ok(PayloadShape::Empty);
    };

    if !tags.is_empty() {
        if !matches!(schema, DataSchema::Object(_)) {
            return Err(InteractionError::SchemaMismatch {
                declared: schema.type_name(),
            });
        }
        let fields = tags
            .iter()
            .cloned()
            .zip(values.iter().cloned())
            .collect();
        return Ok(PayloadShape::Fields(fields));
    }

    if values.len() == 1 && !values[0].is_array() {
        let value = &values[0];
        return match value {
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                Ok(PayloadShape::Scalar(value.clone()))
            }
            other => Err(InteractionError::UnsupportedPrimitive {
                actual: json_type_name(other),
            }),
        };
    }

    if !values.is_empty() {
        if !matches!(schema, DataSchema::Array(_)) {
            return Err(InteractionError::SchemaMismatch {
                declared: schema.type_name(),
            });
        }
        return Ok(PayloadShape::Sequence(values.to_vec()));
    }

    Err(InteractionError::UndeterminedShape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object_schema() -> DataSchema {
        DataSchema::Object(vec![
            ("hue".into(), DataSchema::Integer),
            ("on".into(), DataSchema::Boolean),
        ])
    }

    #[test]
    fn no_schema_is_empty() {
        let shape = classify(&[], &[], None).unwrap();
        assert_eq!(shape, PayloadShape::Empty);
    }

    #[test]
    fn single_scalar_values_classify_as_scalar() {
        for value in [json!(true), json!(7), json!(2.5), json!("on")] {
            let shape = classify(&[], &[value.clone()], Some(&DataSchema::Number)).unwrap();
            assert_eq!(shape, PayloadShape::Scalar(value));
        }
    }

    #[test]
    fn single_null_is_unsupported() {
        let result = classify(&[], &[Value::Null], Some(&DataSchema::String));
        assert!(matches!(
            result,
            Err(InteractionError::UnsupportedPrimitive { actual: "null" })
        ));
    }

    #[test]
    fn single_map_is_unsupported() {
        let result = classify(&[], &[json!({"a": 1})], Some(&DataSchema::String));
        assert!(matches!(
            result,
            Err(InteractionError::UnsupportedPrimitive { actual: "object" })
        ));
    }

    #[test]
    fn multiple_values_classify_as_sequence() {
        let schema = DataSchema::Array(None);
        let shape = classify(&[], &[json!(1), json!(2)], Some(&schema)).unwrap();
        assert_eq!(shape, PayloadShape::Sequence(vec![json!(1), json!(2)]));
    }

    #[test]
    fn single_nested_list_classifies_as_sequence() {
        // One element that is itself a sequence takes the array path,
        // not the primitive one.
        let schema = DataSchema::Array(None);
        let shape = classify(&[], &[json!([3, 4])], Some(&schema)).unwrap();
        assert_eq!(shape, PayloadShape::Sequence(vec![json!([3, 4])]));
    }

    #[test]
    fn sequence_against_non_array_schema_errors() {
        let result = classify(&[], &[json!(1), json!(2)], Some(&DataSchema::Integer));
        assert!(matches!(
            result,
            Err(InteractionError::SchemaMismatch { declared: "integer" })
        ));
    }

    #[test]
    fn tags_classify_as_fields() {
        let tags = vec!["hue".to_string(), "on".to_string()];
        let values = vec![json!(120), json!(true)];
        let shape = classify(&tags, &values, Some(&object_schema())).unwrap();
        assert_eq!(
            shape,
            PayloadShape::Fields(vec![
                ("hue".into(), json!(120)),
                ("on".into(), json!(true))
            ])
        );
    }

    #[test]
    fn tags_against_non_object_schema_error() {
        let tags = vec!["hue".to_string()];
        let result = classify(&tags, &[json!(120)], Some(&DataSchema::Array(None)));
        assert!(matches!(
            result,
            Err(InteractionError::SchemaMismatch { declared: "array" })
        ));
    }

    #[test]
    fn tags_take_precedence_over_arity() {
        // A single non-list value with a tag is an object payload, never a
        // primitive one.
        let tags = vec!["hue".to_string()];
        let shape = classify(&tags, &[json!(120)], Some(&object_schema())).unwrap();
        assert!(matches!(shape, PayloadShape::Fields(_)));
    }

    #[test]
    fn schema_present_but_nothing_supplied_is_undetermined() {
        let result = classify(&[], &[], Some(&DataSchema::Integer));
        assert!(matches!(result, Err(InteractionError::UndeterminedShape)));
    }
}
