//! Generation settings

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Object nesting levels expanded into individual variables
    pub max_depth: usize,

    /// Resource type label; the lowercased kind when unset
    pub resource_type: Option<String>,

    /// Prefix the module with a comment naming the source kind and digest
    pub source_header: bool,
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(anyhow!("generation.max_depth must be at least 1"));
        }

        if let Some(resource_type) = &self.resource_type {
            if !tfmod_crd::is_identifier(resource_type) {
                return Err(anyhow!(
                    "generation.resource_type is not a valid identifier: {:?}",
                    resource_type
                ));
            }
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            resource_type: None,
            source_header: true,
        }
    }
}
