//! Data schemas declared by Thing Description affordances.

use serde_json::Value;

use crate::error::DescriptionError;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_f64() {
                "number"
            } else {
                "integer"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A declared value-type descriptor for an affordance.
///
/// Mirrors the WoT TD data schema vocabulary. Only `Array` and `Object` carry
/// nested schemas; array nesting is unconstrained, object field values are
/// handled one level deep by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSchema {
    Boolean,
    String,
    Integer,
    Number,
    /// Declared as `"type": "null"`; carries no value either way.
    Null,
    /// Item schema may be absent (`items` is optional in a TD).
    Array(Option<Box<DataSchema>>),
    /// Named fields in document order.
    Object(Vec<(String, DataSchema)>),
}

impl DataSchema {
    /// The declared type name, as used in TD documents and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataSchema::Boolean => "boolean",
            DataSchema::String => "string",
            DataSchema::Integer => "integer",
            DataSchema::Number => "number",
            DataSchema::Null => "null",
            DataSchema::Array(_) => "array",
            DataSchema::Object(_) => "object",
        }
    }

    /// Looks up the schema of a declared object field.
    ///
    /// Returns `None` for non-object schemas and undeclared fields.
    pub fn field(&self, name: &str) -> Option<&DataSchema> {
        match self {
            DataSchema::Object(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }

    /// Parse a data schema from its TD JSON representation.
    ///
    /// `path` locates the schema within the document for error messages.
    ///
    /// # Errors
    ///
    /// Returns `DescriptionError::UnknownSchemaType` for unrecognized `type`
    /// values, or `DescriptionError::InvalidDescription` for malformed nodes.
    pub fn from_value(value: &Value, path: &str) -> Result<Self, DescriptionError> {
        let Some(obj) = value.as_object() else {
            return Err(DescriptionError::InvalidDescription {
                message: format!("data schema at {} is not an object", path),
            });
        };

        let type_name = obj.get("type").and_then(|t| t.as_str()).ok_or_else(|| {
            DescriptionError::InvalidDescription {
                message: format!("data schema at {} has no \"type\"", path),
            }
        })?;

        match type_name {
            "boolean" => Ok(DataSchema::Boolean),
            "string" => Ok(DataSchema::String),
            "integer" => Ok(DataSchema::Integer),
            "number" => Ok(DataSchema::Number),
            "null" => Ok(DataSchema::Null),
            "array" => {
                let items = match obj.get("items") {
                    Some(items) => Some(Box::new(DataSchema::from_value(
                        items,
                        &format!("{}/items", path),
                    )?)),
                    None => None,
                };
                Ok(DataSchema::Array(items))
            }
            "object" => {
                let mut fields = Vec::new();
                if let Some(props) = obj.get("properties").and_then(|p| p.as_object()) {
                    for (name, prop) in props {
                        let schema =
                            DataSchema::from_value(prop, &format!("{}/properties/{}", path, name))?;
                        fields.push((name.clone(), schema));
                    }
                }
                Ok(DataSchema::Object(fields))
            }
            other => Err(DescriptionError::UnknownSchemaType {
                path: path.to_string(),
                value: other.to_string(),
            }),
        }
    }
}
