//! Output settings

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File the module is written to; stdout when unset
    pub path: Option<PathBuf>,
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("output.path cannot be empty"));
            }
        }
        Ok(())
    }
}
