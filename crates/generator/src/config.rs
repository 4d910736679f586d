//! Configuration types for the generator

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Options controlling module generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOptions {
    /// Object nesting levels expanded into individual variables.
    /// Deeper objects collapse into a single `any` variable.
    pub max_depth: usize,

    /// Resource type label; defaults to the lowercased kind
    pub resource_type: Option<String>,

    /// Comment emitted at the top of the module
    pub header_comment: Option<String>,
}

impl ModuleOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(anyhow!("max_depth must be at least 1"));
        }

        if let Some(resource_type) = &self.resource_type {
            if !tfmod_crd::is_identifier(resource_type) {
                return Err(anyhow!("Invalid resource type: {:?}", resource_type));
            }
        }

        Ok(())
    }
}

impl Default for ModuleOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            resource_type: None,
            header_comment: None,
        }
    }
}
