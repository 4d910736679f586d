//! Schema tree types

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// OpenAPI type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Object,
    Integer,
    Number,
    String,
    Boolean,
    Array,
    /// Missing or unrecognised type name
    Any,
}

impl FieldType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "object" => Self::Object,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            _ => Self::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the validated schema tree.
///
/// Field schemas carrying a `properties` mapping become [`SchemaNode::Object`];
/// everything else, including `type: object` without properties, is a
/// [`SchemaNode::Leaf`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum SchemaNode {
    Leaf(LeafSchema),
    Object(ObjectSchema),
}

impl SchemaNode {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Leaf(leaf) => leaf.field_type,
            Self::Object(_) => FieldType::Object,
        }
    }

    /// Object node with at least one property
    pub fn as_populated_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(object) if !object.properties.is_empty() => Some(object),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.description.as_deref(),
            Self::Object(object) => object.description.as_deref(),
        }
    }
}

/// Scalar-ish field: contributes a single variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafSchema {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Item type for arrays, when declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<FieldType>,
}

impl LeafSchema {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            default: None,
            format: None,
            description: None,
            items: None,
        }
    }
}

/// Object field with nested properties
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectSchema {
    pub properties: BTreeMap<String, SchemaNode>,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub required: BTreeSet<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ObjectSchema {
    pub fn is_required(&self, field_name: &str) -> bool {
        self.required.contains(field_name)
    }
}
