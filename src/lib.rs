//! Terraform Module Generator Library
//!
//! Reads a Kubernetes CustomResourceDefinition, extracts the OpenAPI v3 schema
//! of the resource spec and emits a skeleton Terraform module exposing one
//! variable per nested field plus a resource block binding them.

pub mod cli;
pub mod config;
pub mod sample;
pub mod utils;

pub use config::{Config, GenerationConfig, OutputConfig};
pub use tfmod_crd::{extract_schema, CrdParser, CrdSchema, SchemaError, SchemaNode};
pub use tfmod_generator::{generate_module, ModuleGenerator, ModuleOptions, ModuleResult};

use std::path::Path;
use tracing::info;

/// Main application context tying the extractor and generator together
pub struct TfModGen {
    config: Config,
    crd_parser: CrdParser,
}

impl TfModGen {
    /// Create a new TfModGen instance with the given configuration
    pub fn new(config: Config) -> TfModGenResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            crd_parser: CrdParser::new(),
        })
    }

    /// Extract the schema from CRD text
    pub fn extract(&self, document: &str) -> TfModGenResult<CrdSchema> {
        Ok(self.crd_parser.parse_str(document)?)
    }

    /// Extract the schema from a CRD file
    pub fn extract_file(&self, path: &Path) -> TfModGenResult<CrdSchema> {
        Ok(self.crd_parser.parse_file(path)?)
    }

    /// Extract and generate in one pass
    pub fn generate(&self, document: &str) -> TfModGenResult<ModuleResult> {
        let schema = self.extract(document)?;
        self.generate_schema(&schema, document)
    }

    /// Read a CRD file, then extract and generate
    pub fn generate_file(&self, path: &Path) -> TfModGenResult<ModuleResult> {
        info!("Generating module from {:?}", path);

        let document = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut schema = self.extract(&document)?;
        schema.source_path = Some(path.to_path_buf());
        self.generate_schema(&schema, &document)
    }

    fn generate_schema(&self, schema: &CrdSchema, document: &str) -> TfModGenResult<ModuleResult> {
        let options = self.module_options(schema, document);
        options
            .validate()
            .map_err(|e| TfModGenError::Config(e.to_string()))?;

        Ok(ModuleGenerator::new(options).generate(schema))
    }

    /// Module options from the generation config, plus the source header
    pub fn module_options(&self, schema: &CrdSchema, document: &str) -> ModuleOptions {
        let generation = &self.config.generation;

        let header_comment = generation.source_header.then(|| {
            format!(
                "Generated by tfmod-gen {} from {}\nsource sha256: {}",
                env!("CARGO_PKG_VERSION"),
                schema.kind(),
                utils::calculate_string_hash(document)
            )
        });

        ModuleOptions {
            max_depth: generation.max_depth,
            resource_type: generation.resource_type.clone(),
            header_comment,
        }
    }

    /// Serialize the extracted field tree for inspection
    pub fn render_tree(&self, schema: &CrdSchema, format: TreeFormat) -> TfModGenResult<String> {
        match format {
            TreeFormat::Yaml => Ok(serde_yaml::to_string(schema)?),
            TreeFormat::Json => Ok(serde_json::to_string_pretty(schema)?),
        }
    }
}

/// Output format for `inspect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Yaml,
    Json,
}

impl std::str::FromStr for TreeFormat {
    type Err = TfModGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(TfModGenError::Config(format!("Unknown format: {other}"))),
        }
    }
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum TfModGenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema extraction failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the main application
pub type TfModGenResult<T> = Result<T, TfModGenError>;
