//! Utility functions for TfModGen

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names, checked in the working directory
pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
    ".tfmod-gen.yaml",
    ".tfmod-gen.yml",
    "tfmod-gen.yaml",
    "tfmod-gen.yml",
];

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(anyhow!("Path exists but is not a directory: {:?}", path));
    }
    Ok(())
}

/// Get the XDG config directory for TfModGen
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join("tfmod-gen");

    Ok(config_dir)
}

/// Find a configuration file in `dir`, then in the XDG config directory
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .or_else(|| {
            get_config_dir()
                .ok()
                .map(|config_dir| config_dir.join("config.yaml"))
                .filter(|path| path.is_file())
        })
}

/// Expand `~` and environment variables in a user supplied path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| anyhow!("Failed to expand path {}: {}", path, e))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Write generated content, creating parent directories as needed
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Calculate SHA256 hash of a string
pub fn calculate_string_hash(content: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
