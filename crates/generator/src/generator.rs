//! Terraform module generator implementation

use crate::config::ModuleOptions;
use crate::fragment::{quote, Binding, Fragment, ModuleBuilder, ResourceBlock, VariableBlock};
use crate::result::ModuleResult;
use std::collections::{BTreeMap, BTreeSet};
use tfmod_crd::{CrdSchema, FieldType, SchemaNode};
use tracing::{debug, info};

pub struct ModuleGenerator {
    options: ModuleOptions,
}

impl Default for ModuleGenerator {
    fn default() -> Self {
        Self::new(ModuleOptions::default())
    }
}

impl ModuleGenerator {
    pub fn new(options: ModuleOptions) -> Self {
        Self { options }
    }

    /// Generate the module for an extracted CRD schema
    pub fn generate(&self, schema: &CrdSchema) -> ModuleResult {
        info!("Generating Terraform module for {}", schema.kind());

        let result = self.assemble(schema.kind(), &schema.fields);

        info!(
            "Generated {} variables for resource {:?} ({} fields skipped)",
            result.variables_generated,
            result.resource_type,
            result.skipped_fields.len()
        );
        result
    }

    /// Generate module text for a title and its top-level fields
    pub fn generate_module(&self, title: &str, fields: &BTreeMap<String, SchemaNode>) -> String {
        self.assemble(title, fields).module
    }

    fn assemble(&self, title: &str, fields: &BTreeMap<String, SchemaNode>) -> ModuleResult {
        let resource_name = title.to_lowercase();
        let resource_type = self
            .options
            .resource_type
            .clone()
            .unwrap_or_else(|| resource_name.clone());

        let mut declarations = Declarations::new();
        let mut body = Vec::new();
        let mut skipped_fields = Vec::new();
        // `metadata` is the fixed block of the resource body
        let mut attribute_names = BTreeSet::from(["metadata".to_string()]);

        for (field_name, field_schema) in fields {
            // Only top-level objects with properties contribute declarations
            let Some(object) = field_schema.as_populated_object() else {
                debug!("Skipping top-level field {}: not an object with properties", field_name);
                skipped_fields.push(field_name.clone());
                continue;
            };

            let bindings = self.walk_object(&[field_name.as_str()], object, 1, &mut declarations);
            body.push(Binding::Object {
                name: unique_name(variable_name(&[field_name.as_str()]), &mut attribute_names),
                bindings,
            });
        }

        let mut builder = ModuleBuilder::new();
        if let Some(header) = &self.options.header_comment {
            builder.push(Fragment::Comment(header.clone()));
        }
        builder
            .push(Fragment::Variable(VariableBlock::new(
                "namespace",
                "The namespace for the resource",
            )))
            .push(Fragment::Variable(VariableBlock::new(
                "name",
                "The name of the resource",
            )));

        let variables_generated = declarations.variables.len();
        for variable in declarations.variables {
            builder.push(Fragment::Variable(variable));
        }

        builder.push(Fragment::Resource(ResourceBlock {
            resource_type: resource_type.clone(),
            name: resource_name.clone(),
            body,
        }));

        ModuleResult {
            module: builder.render(),
            resource_type,
            resource_name,
            variables_generated,
            skipped_fields,
        }
    }

    /// Emit variables for the properties of `object` and return their bindings
    fn walk_object(
        &self,
        path: &[&str],
        object: &tfmod_crd::ObjectSchema,
        depth: usize,
        declarations: &mut Declarations,
    ) -> Vec<Binding> {
        let mut bindings = Vec::new();

        for (field_name, field_schema) in &object.properties {
            let mut field_path = path.to_vec();
            field_path.push(field_name);

            match field_schema.as_populated_object() {
                Some(nested) if depth < self.options.max_depth => {
                    bindings.push(Binding::Object {
                        name: field_name.clone(),
                        bindings: self.walk_object(&field_path, nested, depth + 1, declarations),
                    });
                }
                _ => {
                    let name = declarations.reserve(variable_name(&field_path));
                    let variable = self.variable_for(
                        name,
                        &field_path,
                        field_schema,
                        object.is_required(field_name),
                    );
                    bindings.push(Binding::Attribute {
                        name: field_name.clone(),
                        variable: variable.name.clone(),
                    });
                    declarations.variables.push(variable);
                }
            }
        }

        bindings
    }

    /// Build the variable declaration for a single field
    fn variable_for(
        &self,
        name: String,
        path: &[&str],
        node: &SchemaNode,
        required: bool,
    ) -> VariableBlock {
        let mut variable = VariableBlock::new(name, path.join("."));

        if let Some(description) = node.description() {
            variable.description = format!("{}: {}", variable.description, description.trim());
        }

        let mut metadata = Vec::new();
        if required {
            metadata.push("required".to_string());
        }

        let default = match node {
            SchemaNode::Leaf(leaf) => {
                if let Some(format) = &leaf.format {
                    metadata.push(format!("format: {format}"));
                }
                leaf.default.as_ref()
            }
            SchemaNode::Object(_) => None,
        };

        if let Some(default) = default {
            metadata.push(format!("default: {}", describe_value(default)));
        }

        if !metadata.is_empty() {
            variable.description = format!("{} ({})", variable.description, metadata.join(", "));
        }

        variable.type_expr = Some(terraform_type(node));
        variable.default = match default {
            Some(value) => Some(hcl_value(value)),
            None if required => None,
            None => Some("null".to_string()),
        };

        variable
    }
}

/// Variables collected for one module, with every name handed out so far
struct Declarations {
    variables: Vec<VariableBlock>,
    names: BTreeSet<String>,
}

impl Declarations {
    fn new() -> Self {
        Self {
            variables: Vec::new(),
            names: BTreeSet::new(),
        }
    }

    fn reserve(&mut self, base: String) -> String {
        unique_name(base, &mut self.names)
    }
}

/// Claim `base`, or the first free `base_N` (N >= 2) when it is taken
fn unique_name(base: String, taken: &mut BTreeSet<String>) -> String {
    let mut name = base.clone();
    let mut suffix = 2;
    while taken.contains(&name) {
        debug!("Name {} already in use, trying suffix {}", name, suffix);
        name = format!("{base}_{suffix}");
        suffix += 1;
    }
    taken.insert(name.clone());
    name
}

/// Join a field path into a Terraform variable name
fn variable_name(path: &[&str]) -> String {
    let name = path
        .iter()
        .map(|segment| {
            segment
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_");

    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        format!("_{name}")
    } else {
        name
    }
}

/// Terraform type constraint for a field
fn terraform_type(node: &SchemaNode) -> String {
    match node {
        SchemaNode::Object(_) => "any".to_string(),
        SchemaNode::Leaf(leaf) => match leaf.field_type {
            FieldType::String => "string".to_string(),
            FieldType::Integer | FieldType::Number => "number".to_string(),
            FieldType::Boolean => "bool".to_string(),
            FieldType::Object => "map(any)".to_string(),
            FieldType::Any => "any".to_string(),
            FieldType::Array => {
                let items = match leaf.items {
                    Some(FieldType::String) => "string",
                    Some(FieldType::Integer | FieldType::Number) => "number",
                    Some(FieldType::Boolean) => "bool",
                    _ => "any",
                };
                format!("list({items})")
            }
        },
    }
}

/// Serialize a YAML value as an HCL expression
fn hcl_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => quote(s),
        serde_yaml::Value::Sequence(seq) => {
            let items: Vec<String> = seq.iter().map(hcl_value).collect();
            format!("[{}]", items.join(", "))
        }
        serde_yaml::Value::Mapping(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => quote(s),
                        other => quote(&hcl_value(other)),
                    };
                    format!("{key} = {}", hcl_value(v))
                })
                .collect();
            format!("{{ {} }}", items.join(", "))
        }
        serde_yaml::Value::Tagged(tagged) => hcl_value(&tagged.value),
    }
}

/// Human-readable form of a default, for descriptions
fn describe_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => hcl_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tfmod_crd::{LeafSchema, ObjectSchema};

    fn leaf(field_type: FieldType) -> SchemaNode {
        SchemaNode::Leaf(LeafSchema::new(field_type))
    }

    fn object(properties: Vec<(&str, SchemaNode)>) -> SchemaNode {
        SchemaNode::Object(ObjectSchema {
            properties: properties
                .into_iter()
                .map(|(name, node)| (name.to_string(), node))
                .collect(),
            ..Default::default()
        })
    }

    fn sample_fields() -> BTreeMap<String, SchemaNode> {
        let mut cpu = LeafSchema::new(FieldType::String);
        cpu.format = Some("resource".to_string());
        cpu.default = Some(serde_yaml::Value::from("100m"));

        let mut replicas = LeafSchema::new(FieldType::Integer);
        replicas.default = Some(serde_yaml::Value::from(1));

        let mut config = ObjectSchema::default();
        config
            .properties
            .insert("replicas".to_string(), SchemaNode::Leaf(replicas));
        config.properties.insert(
            "resources".to_string(),
            object(vec![("cpu", SchemaNode::Leaf(cpu))]),
        );
        config.required.insert("replicas".to_string());

        let mut fields = BTreeMap::new();
        fields.insert("size".to_string(), leaf(FieldType::Integer));
        fields.insert("config".to_string(), SchemaNode::Object(config));
        fields
    }

    #[test]
    fn test_header_variables_and_resource_block() {
        let module = ModuleGenerator::default().generate_module("MyResource", &BTreeMap::new());

        assert!(module.starts_with(
            "variable \"namespace\" {\n  description = \"The namespace for the resource\"\n}\n\n\
             variable \"name\" {\n  description = \"The name of the resource\"\n}\n"
        ));
        assert!(module.contains("resource \"myresource\" \"myresource\" {"));
        assert!(module.ends_with("  metadata {\n    namespace = var.namespace\n    name = var.name\n  }\n}\n"));
    }

    #[test]
    fn test_top_level_leaf_is_skipped() {
        let mut fields = BTreeMap::new();
        fields.insert("size".to_string(), leaf(FieldType::String));
        fields.insert("labels".to_string(), leaf(FieldType::Object));
        fields.insert("empty".to_string(), object(Vec::new()));

        let generator = ModuleGenerator::default();
        let module = generator.generate_module("Widget", &fields);

        assert_eq!(module.matches("variable \"").count(), 2);
        assert!(!module.contains("size"));
        assert!(!module.contains("labels"));
    }

    #[test]
    fn test_one_declaration_per_nested_property() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "config".to_string(),
            object(vec![
                ("replicas", leaf(FieldType::Integer)),
                ("image", leaf(FieldType::String)),
                ("debug", leaf(FieldType::Boolean)),
            ]),
        );

        let generator = ModuleGenerator::default();
        let result = generator.assemble("Widget", &fields);

        assert_eq!(result.variables_generated, 3);
        assert_eq!(result.module.matches("variable \"config_").count(), 3);
        assert!(result.module.contains("variable \"config_debug\" {"));
        assert!(result.module.contains("    image = var.config_image\n"));
    }

    #[test]
    fn test_sample_variables() {
        let generator = ModuleGenerator::default();
        let result = generator.assemble("MyResource", &sample_fields());

        assert_eq!(result.skipped_fields, vec!["size".to_string()]);
        assert_eq!(result.variables_generated, 2);
        assert!(result.module.contains(
            "variable \"config_replicas\" {\n  description = \"config.replicas (required, default: 1)\"\n  type = number\n  default = 1\n}\n"
        ));
        assert!(result.module.contains(
            "variable \"config_resources_cpu\" {\n  description = \"config.resources.cpu (format: resource, default: 100m)\"\n  type = string\n  default = \"100m\"\n}\n"
        ));
        assert!(result.module.contains(
            "  config = {\n    replicas = var.config_replicas\n    resources = {\n      cpu = var.config_resources_cpu\n    }\n  }\n"
        ));
    }

    #[test]
    fn test_fields_are_emitted_in_name_order() {
        let module = ModuleGenerator::default().generate_module("MyResource", &sample_fields());

        let replicas = module.find("variable \"config_replicas\"").unwrap();
        let cpu = module.find("variable \"config_resources_cpu\"").unwrap();
        let resource = module.find("resource \"myresource\"").unwrap();
        assert!(replicas < cpu);
        assert!(cpu < resource);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let generator = ModuleGenerator::default();
        let fields = sample_fields();

        assert_eq!(
            generator.generate_module("MyResource", &fields),
            generator.generate_module("MyResource", &fields)
        );
    }

    #[test]
    fn test_max_depth_collapses_nested_objects() {
        let generator = ModuleGenerator::new(ModuleOptions {
            max_depth: 1,
            ..Default::default()
        });
        let result = generator.assemble("MyResource", &sample_fields());

        assert!(result
            .module
            .contains("variable \"config_resources\" {\n  description = \"config.resources\"\n  type = any\n  default = null\n}\n"));
        assert!(!result.module.contains("config_resources_cpu"));
        assert!(result.module.contains("    resources = var.config_resources\n"));
    }

    #[test]
    fn test_resource_type_and_header_options() {
        let generator = ModuleGenerator::new(ModuleOptions {
            resource_type: Some("kubernetes_manifest".to_string()),
            header_comment: Some("Generated from MyResource".to_string()),
            ..Default::default()
        });
        let result = generator.assemble("MyResource", &sample_fields());

        assert!(result.module.starts_with("# Generated from MyResource\n\nvariable \"namespace\""));
        assert!(result
            .module
            .contains("resource \"kubernetes_manifest\" \"myresource\" {"));
        assert_eq!(result.resource_type, "kubernetes_manifest");
        assert_eq!(result.resource_name, "myresource");
    }

    #[test]
    fn test_generate_from_schema() {
        let schema = CrdSchema {
            name: "myresource".to_string(),
            group: "mygroup.example.com".to_string(),
            version: None,
            kind: "MyResource".to_string(),
            fields: sample_fields(),
            required: Default::default(),
            source_path: None,
        };

        let result = ModuleGenerator::default().generate(&schema);
        assert_eq!(result.module, ModuleGenerator::default().generate_module("MyResource", &schema.fields));
    }

    #[rstest]
    #[case(leaf(FieldType::String), "string")]
    #[case(leaf(FieldType::Integer), "number")]
    #[case(leaf(FieldType::Number), "number")]
    #[case(leaf(FieldType::Boolean), "bool")]
    #[case(leaf(FieldType::Object), "map(any)")]
    #[case(leaf(FieldType::Array), "list(any)")]
    #[case(leaf(FieldType::Any), "any")]
    #[case(object(vec![("a", leaf(FieldType::String))]), "any")]
    fn test_terraform_type(#[case] node: SchemaNode, #[case] expected: &str) {
        assert_eq!(terraform_type(&node), expected);
    }

    #[test]
    fn test_array_item_type() {
        let mut ports = LeafSchema::new(FieldType::Array);
        ports.items = Some(FieldType::Integer);
        assert_eq!(terraform_type(&SchemaNode::Leaf(ports)), "list(number)");
    }

    #[test]
    fn test_hcl_value() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("{limits: [1, 2], name: \"a\", enabled: true, other: null}").unwrap();

        assert_eq!(
            hcl_value(&value),
            "{ \"limits\" = [1, 2], \"name\" = \"a\", \"enabled\" = true, \"other\" = null }"
        );
    }

    #[test]
    fn test_variable_name_sanitizing() {
        assert_eq!(variable_name(&["config", "replicas"]), "config_replicas");
        assert_eq!(variable_name(&["tls", "ca.crt"]), "tls_ca_crt");
        assert_eq!(variable_name(&["8080", "port"]), "_8080_port");
        assert_eq!(variable_name(&["-x"]), "_-x");
    }

    #[test]
    fn test_colliding_variable_names_are_made_unique() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "config".to_string(),
            object(vec![
                ("a_b", leaf(FieldType::String)),
                ("a", object(vec![("b", leaf(FieldType::Integer))])),
            ]),
        );
        fields.insert(
            "tls".to_string(),
            object(vec![
                ("ca.crt", leaf(FieldType::String)),
                ("ca_crt", leaf(FieldType::String)),
            ]),
        );

        let result = ModuleGenerator::default().assemble("Widget", &fields);
        let module = &result.module;

        assert_eq!(result.variables_generated, 4);
        assert_eq!(module.matches("variable \"config_a_b\" {").count(), 1);
        assert_eq!(module.matches("variable \"config_a_b_2\" {").count(), 1);
        assert_eq!(module.matches("variable \"tls_ca_crt\" {").count(), 1);
        assert_eq!(module.matches("variable \"tls_ca_crt_2\" {").count(), 1);

        // Lexicographic walk: `a.b` claims the plain name before `a_b`
        assert!(module.contains("    a = {\n      b = var.config_a_b\n    }\n    a_b = var.config_a_b_2\n"));
        assert!(module.contains("    \"ca.crt\" = var.tls_ca_crt\n    ca_crt = var.tls_ca_crt_2\n"));
    }

    #[test]
    fn test_top_level_attribute_names_are_identifiers() {
        let mut fields = BTreeMap::new();
        fields.insert("ca.crt".to_string(), object(vec![("key", leaf(FieldType::String))]));
        fields.insert("ca_crt".to_string(), object(vec![("key", leaf(FieldType::String))]));
        fields.insert("metadata".to_string(), object(vec![("labels", leaf(FieldType::Object))]));

        let module = ModuleGenerator::default().generate_module("Widget", &fields);

        assert!(module.contains("  ca_crt = {\n    key = var.ca_crt_key\n  }\n"));
        assert!(module.contains("  ca_crt_2 = {\n    key = var.ca_crt_key_2\n  }\n"));
        assert!(module.contains("  metadata_2 = {\n    labels = var.metadata_labels\n  }\n"));
        assert!(!module.contains("\"ca.crt\" = {"));
    }

    #[test]
    fn test_optional_field_without_default() {
        let mut fields = BTreeMap::new();
        let mut image = LeafSchema::new(FieldType::String);
        image.description = Some("Container image ".to_string());
        fields.insert(
            "config".to_string(),
            object(vec![("image", SchemaNode::Leaf(image))]),
        );

        let module = ModuleGenerator::default().generate_module("Widget", &fields);
        assert!(module.contains(
            "variable \"config_image\" {\n  description = \"config.image: Container image\"\n  type = string\n  default = null\n}\n"
        ));
    }
}
