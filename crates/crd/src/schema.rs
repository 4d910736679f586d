//! Extracted CRD schema

use crate::types::SchemaNode;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// The parts of a CRD document the generator needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrdSchema {
    /// CRD name (metadata.name)
    pub name: String,

    /// API group
    pub group: String,

    /// API version the schema was taken from, if the CRD lists one
    pub version: Option<String>,

    /// Resource kind (from spec.names.kind)
    pub kind: String,

    /// Top-level properties of the custom resource spec
    pub fields: BTreeMap<String, SchemaNode>,

    /// Required top-level fields
    pub required: BTreeSet<String>,

    /// Source file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl CrdSchema {
    /// Get the kind name (from spec.names.kind)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Lowercased kind, used as the Terraform resource identifier
    pub fn resource_name(&self) -> String {
        self.kind.to_lowercase()
    }

    /// Full API version (group/version)
    pub fn api_version(&self) -> Option<String> {
        self.version
            .as_ref()
            .map(|version| format!("{}/{}", self.group, version))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Top-level fields the generator skips: leaves and objects without properties
    pub fn skipped_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, node)| node.as_populated_object().is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of nodes in the field tree, objects included
    pub fn node_count(&self) -> usize {
        fn count(node: &SchemaNode) -> usize {
            match node {
                SchemaNode::Object(object) => {
                    1 + object.properties.values().map(count).sum::<usize>()
                }
                _ => 1,
            }
        }
        self.fields.values().map(count).sum()
    }

    pub fn is_field_required(&self, field_name: &str) -> bool {
        self.required.contains(field_name)
    }
}
