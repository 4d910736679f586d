//! Main configuration structure and implementation

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{GenerationConfig, OutputConfig};
use crate::{TfModGenError, TfModGenResult};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Generation settings
    pub generation: GenerationConfig,

    /// Output configuration
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> TfModGenResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TfModGenError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> TfModGenResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> TfModGenResult<()> {
        if self.version != "1.0" {
            return Err(TfModGenError::Config(format!(
                "Unsupported configuration version: {}",
                self.version
            )));
        }

        self.generation
            .validate()
            .map_err(|e| TfModGenError::Config(e.to_string()))?;

        self.output
            .validate()
            .map_err(|e| TfModGenError::Config(e.to_string()))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            generation: GenerationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
