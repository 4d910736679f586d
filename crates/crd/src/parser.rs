//! CRD parser implementation

use crate::error::SchemaError;
use crate::schema::CrdSchema;
use crate::types::{FieldType, LeafSchema, ObjectSchema, SchemaNode};
use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// Extract the resource schema from CRD text (YAML or JSON)
pub fn extract_schema(document: &str) -> Result<CrdSchema, SchemaError> {
    CrdParser::new().parse_str(document)
}

pub struct CrdParser;

impl Default for CrdParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CrdParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single CRD file
    pub fn parse_file(&self, path: &Path) -> Result<CrdSchema, SchemaError> {
        info!("Parsing CRD file: {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut schema = self.parse_str(&content)?;
        schema.source_path = Some(path.to_path_buf());
        Ok(schema)
    }

    /// Parse CRD text already held in memory
    pub fn parse_str(&self, content: &str) -> Result<CrdSchema, SchemaError> {
        let doc: Value = serde_yaml::from_str(content)?;
        self.extract_crd_from_document(&doc)
    }

    /// Extract CRD information from a YAML document
    fn extract_crd_from_document(&self, doc: &Value) -> Result<CrdSchema, SchemaError> {
        if let Some(kind) = doc.get("kind").and_then(|k| k.as_str()) {
            if kind != "CustomResourceDefinition" {
                warn!("Document kind is {}, expected CustomResourceDefinition", kind);
            }
        }

        let spec = doc.get("spec");

        let (root_path, root, version) = self.locate_root_schema(spec)?;

        let properties_path = format!("{root_path}.properties");
        let properties = root
            .get("properties")
            .ok_or_else(|| SchemaError::shape(&properties_path, "missing"))?;
        let mut fields = self.parse_properties(&properties_path, properties)?;
        let mut required = self.parse_required(&format!("{root_path}.required"), root)?;

        // Custom resources nest their fields under `spec`
        if let Some(resource_spec) = fields
            .get("spec")
            .and_then(SchemaNode::as_populated_object)
            .cloned()
        {
            debug!("Using properties of the resource spec as top-level fields");
            required = resource_spec.required;
            fields = resource_spec.properties;
        }

        let kind = self.extract_title(spec)?;

        let name = doc
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or(kind.as_str())
            .to_string();

        let group = spec
            .and_then(|s| s.get("group"))
            .and_then(|g| g.as_str())
            .unwrap_or_default()
            .to_string();

        info!("Extracted {} top-level fields for kind {}", fields.len(), kind);

        Ok(CrdSchema {
            name,
            group,
            version,
            kind,
            fields,
            required,
            source_path: None,
        })
    }

    /// Find the openAPIV3Schema root, returning its path, value and API version.
    ///
    /// `spec.validation.openAPIV3Schema` is checked first; the per-version
    /// location used by `apiextensions.k8s.io/v1` is the fallback, preferring
    /// the storage version.
    fn locate_root_schema<'a>(
        &self,
        spec: Option<&'a Value>,
    ) -> Result<(String, &'a Value, Option<String>), SchemaError> {
        let spec = spec.ok_or_else(|| {
            SchemaError::shape("spec.validation.openAPIV3Schema", "CRD missing spec")
        })?;

        if let Some(root) = spec
            .get("validation")
            .and_then(|v| v.get("openAPIV3Schema"))
        {
            let version = spec
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            return Ok((
                "spec.validation.openAPIV3Schema".to_string(),
                root,
                version,
            ));
        }

        if let Some(versions) = spec.get("versions").and_then(|v| v.as_sequence()) {
            let index = versions
                .iter()
                .position(|v| v.get("storage").and_then(|s| s.as_bool()) == Some(true))
                .unwrap_or(0);

            if let Some(version_doc) = versions.get(index) {
                if let Some(root) = version_doc
                    .get("schema")
                    .and_then(|s| s.get("openAPIV3Schema"))
                {
                    let version = version_doc
                        .get("name")
                        .and_then(|n| n.as_str())
                        .map(str::to_string);
                    debug!("Using schema of version {:?}", version);
                    return Ok((
                        format!("spec.versions[{index}].schema.openAPIV3Schema"),
                        root,
                        version,
                    ));
                }
            }
        }

        Err(SchemaError::shape(
            "spec.validation.openAPIV3Schema",
            "missing",
        ))
    }

    /// Resource title from spec.names.kind
    fn extract_title(&self, spec: Option<&Value>) -> Result<String, SchemaError> {
        let kind = spec
            .and_then(|s| s.get("names"))
            .and_then(|n| n.get("kind"))
            .ok_or_else(|| SchemaError::Title("spec.names.kind is missing".to_string()))?
            .as_str()
            .ok_or_else(|| SchemaError::Title("spec.names.kind must be a string".to_string()))?
            .trim();

        if kind.is_empty() {
            return Err(SchemaError::Title("spec.names.kind is empty".to_string()));
        }

        if !is_identifier(&kind.to_lowercase()) {
            return Err(SchemaError::Title(format!(
                "`{kind}` cannot be used as a resource identifier"
            )));
        }

        Ok(kind.to_string())
    }

    fn parse_properties(
        &self,
        path: &str,
        value: &Value,
    ) -> Result<BTreeMap<String, SchemaNode>, SchemaError> {
        let mapping = value
            .as_mapping()
            .ok_or_else(|| SchemaError::shape(path, "expected a mapping"))?;

        let mut properties = BTreeMap::new();
        for (key, field_schema) in mapping {
            let key = key
                .as_str()
                .ok_or_else(|| SchemaError::shape(path, "property names must be strings"))?;
            let node = self.parse_node(&format!("{path}.{key}"), field_schema)?;
            properties.insert(key.to_string(), node);
        }

        Ok(properties)
    }

    /// Validate a field schema and turn it into a tree node
    fn parse_node(&self, path: &str, value: &Value) -> Result<SchemaNode, SchemaError> {
        if !value.is_mapping() {
            return Err(SchemaError::shape(path, "expected a field schema mapping"));
        }

        let type_name = match value.get("type") {
            Some(t) => Some(
                t.as_str()
                    .ok_or_else(|| SchemaError::shape(path, "type must be a string"))?,
            ),
            None => None,
        };

        let description = value
            .get("description")
            .and_then(|d| d.as_str())
            .map(str::to_string);

        // Only objects (or untyped schemas) with a properties mapping are traversed
        let declared_type = type_name.map(FieldType::from_name);
        let properties = value.get("properties").filter(|p| p.is_mapping());
        match (declared_type, properties) {
            (None | Some(FieldType::Object), Some(properties)) => {
                let properties =
                    self.parse_properties(&format!("{path}.properties"), properties)?;
                let required = self.parse_required(&format!("{path}.required"), value)?;
                return Ok(SchemaNode::Object(ObjectSchema {
                    properties,
                    required,
                    description,
                }));
            }
            (Some(field_type), Some(_)) => {
                debug!("{} has properties but type {}, treating as leaf", path, field_type);
            }
            (_, None) if value.get("properties").is_some() => {
                debug!("{} has no usable properties mapping, treating as leaf", path);
            }
            (Some(FieldType::Object), None) => {
                debug!("{} is an object without properties, treating as leaf", path);
            }
            _ => {}
        }

        let field_type = declared_type.unwrap_or(FieldType::Any);

        Ok(SchemaNode::Leaf(LeafSchema {
            field_type,
            default: value.get("default").cloned(),
            format: value
                .get("format")
                .and_then(|f| f.as_str())
                .map(str::to_string),
            description,
            items: value
                .get("items")
                .and_then(|i| i.get("type"))
                .and_then(|t| t.as_str())
                .map(FieldType::from_name),
        }))
    }

    fn parse_required(&self, path: &str, schema: &Value) -> Result<BTreeSet<String>, SchemaError> {
        let Some(required) = schema.get("required") else {
            return Ok(BTreeSet::new());
        };

        let entries = required
            .as_sequence()
            .ok_or_else(|| SchemaError::shape(path, "expected a list of field names"))?;

        Ok(entries
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect())
    }
}

/// ASCII identifier: letter or underscore first, then letters, digits, `_` or `-`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
