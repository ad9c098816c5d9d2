//! Thing Description model: affordances, forms, semantic lookup.
//!
//! A Thing Description (TD) declares the capabilities of a remote Thing as
//! property and action affordances, each carrying a data schema and one or
//! more hypermedia forms. This module parses the JSON serialization into a
//! read-only model and answers "first affordance by semantic type" queries.

use std::fmt;

use serde_json::Value;

use crate::error::DescriptionError;
use crate::schema::DataSchema;

/// The operation kind a form is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ReadProperty,
    WriteProperty,
    InvokeAction,
}

impl OperationKind {
    /// The TD `op` keyword for this operation.
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::ReadProperty => "readproperty",
            OperationKind::WriteProperty => "writeproperty",
            OperationKind::InvokeAction => "invokeaction",
        }
    }

    /// Parse a TD `op` keyword. Unknown keywords are ignored by the parser.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "readproperty" => Some(OperationKind::ReadProperty),
            "writeproperty" => Some(OperationKind::WriteProperty),
            "invokeaction" => Some(OperationKind::InvokeAction),
            _ => None,
        }
    }

    /// The default HTTP method for this operation in the HTTP binding.
    pub fn default_method(&self) -> &'static str {
        match self {
            OperationKind::ReadProperty => "GET",
            OperationKind::WriteProperty => "PUT",
            OperationKind::InvokeAction => "POST",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Whether an affordance is a property or an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffordanceKind {
    Property,
    Action,
}

/// A hypermedia form binding an affordance to a transport target.
#[derive(Debug, Clone)]
pub struct Form {
    /// Target URI, already resolved against the TD `base`.
    pub href: String,
    /// Operation kinds this form serves.
    pub ops: Vec<OperationKind>,
    /// Optional `htv:methodName` override.
    pub method_name: Option<String>,
}

impl Form {
    /// The HTTP method to use for `operation` through this form.
    pub fn method(&self, operation: OperationKind) -> &str {
        self.method_name
            .as_deref()
            .unwrap_or_else(|| operation.default_method())
    }
}

/// A described capability of the Thing.
#[derive(Debug, Clone)]
pub struct Affordance {
    /// Affordance name (the key in the TD map).
    pub name: String,
    /// Semantic type IRIs from `@type`.
    pub semantic_types: Vec<String>,
    pub kind: AffordanceKind,
    /// Data schema: the property schema, or the action input schema.
    /// Actions without input carry `None`.
    pub schema: Option<DataSchema>,
    pub forms: Vec<Form>,
}

impl Affordance {
    /// First form usable for `operation`, if any.
    pub fn form_for(&self, operation: OperationKind) -> Option<&Form> {
        self.forms.iter().find(|f| f.ops.contains(&operation))
    }

    fn has_semantic_type(&self, iri: &str) -> bool {
        self.semantic_types.iter().any(|t| t == iri)
    }
}

/// A parsed Thing Description.
///
/// Immutable once constructed; safe to share across concurrent invocations.
#[derive(Debug, Clone)]
pub struct ThingDescription {
    pub title: String,
    pub base: Option<String>,
    pub properties: Vec<Affordance>,
    pub actions: Vec<Affordance>,
}

impl ThingDescription {
    /// Parse a TD from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `DescriptionError` if the document is structurally invalid or
    /// declares an unknown data schema type.
    pub fn from_value(doc: &Value) -> Result<Self, DescriptionError> {
        let Some(root) = doc.as_object() else {
            return Err(DescriptionError::InvalidDescription {
                message: "document root is not an object".into(),
            });
        };

        let title = root
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .to_string();
        let base = root
            .get("base")
            .and_then(|b| b.as_str())
            .map(|b| b.to_string());

        let mut properties = Vec::new();
        if let Some(props) = root.get("properties").and_then(|p| p.as_object()) {
            for (name, prop) in props {
                properties.push(parse_affordance(
                    name,
                    prop,
                    AffordanceKind::Property,
                    base.as_deref(),
                )?);
            }
        }

        let mut actions = Vec::new();
        if let Some(acts) = root.get("actions").and_then(|a| a.as_object()) {
            for (name, action) in acts {
                actions.push(parse_affordance(
                    name,
                    action,
                    AffordanceKind::Action,
                    base.as_deref(),
                )?);
            }
        }

        Ok(ThingDescription {
            title,
            base,
            properties,
            actions,
        })
    }

    /// First property whose `@type` contains `iri`, in document order.
    pub fn first_property_by_semantic_type(&self, iri: &str) -> Option<&Affordance> {
        self.properties.iter().find(|p| p.has_semantic_type(iri))
    }

    /// First action whose `@type` contains `iri`, in document order.
    pub fn first_action_by_semantic_type(&self, iri: &str) -> Option<&Affordance> {
        self.actions.iter().find(|a| a.has_semantic_type(iri))
    }
}

fn parse_affordance(
    name: &str,
    value: &Value,
    kind: AffordanceKind,
    base: Option<&str>,
) -> Result<Affordance, DescriptionError> {
    let Some(obj) = value.as_object() else {
        return Err(DescriptionError::InvalidDescription {
            message: format!("affordance \"{}\" is not an object", name),
        });
    };

    let semantic_types = parse_string_or_list(obj.get("@type"));

    // Properties are themselves data schemas; actions declare input separately.
    let schema = match kind {
        AffordanceKind::Property => Some(DataSchema::from_value(
            value,
            &format!("/properties/{}", name),
        )?),
        AffordanceKind::Action => match obj.get("input") {
            Some(input) => Some(DataSchema::from_value(
                input,
                &format!("/actions/{}/input", name),
            )?),
            None => None,
        },
    };

    let Some(forms) = obj.get("forms").and_then(|f| f.as_array()) else {
        return Err(DescriptionError::InvalidDescription {
            message: format!("affordance \"{}\" has no forms", name),
        });
    };

    let default_ops: Vec<OperationKind> = match kind {
        AffordanceKind::Property => vec![OperationKind::ReadProperty, OperationKind::WriteProperty],
        AffordanceKind::Action => vec![OperationKind::InvokeAction],
    };

    let mut parsed_forms = Vec::new();
    for form in forms {
        let Some(form_obj) = form.as_object() else {
            continue;
        };
        let Some(href) = form_obj.get("href").and_then(|h| h.as_str()) else {
            return Err(DescriptionError::InvalidDescription {
                message: format!("a form of \"{}\" has no href", name),
            });
        };

        let ops: Vec<OperationKind> = match form_obj.get("op") {
            Some(op) => parse_string_or_list(Some(op))
                .iter()
                .filter_map(|kw| OperationKind::parse(kw))
                .collect(),
            // TD defaulting rule: omitted op covers every operation of the
            // affordance kind.
            None => default_ops.clone(),
        };

        let method_name = form_obj
            .get("htv:methodName")
            .and_then(|m| m.as_str())
            .map(|m| m.to_string());

        parsed_forms.push(Form {
            href: resolve_href(base, href),
            ops,
            method_name,
        });
    }

    Ok(Affordance {
        name: name.to_string(),
        semantic_types,
        kind,
        schema,
        forms: parsed_forms,
    })
}

/// TD members like `@type` and `op` accept a string or a list of strings.
fn parse_string_or_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

/// Resolve a form href against the TD base URI.
fn resolve_href(base: Option<&str>, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match base {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            href.trim_start_matches('/')
        ),
        None => href.to_string(),
    }
}
