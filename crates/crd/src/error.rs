//! Errors raised while extracting a schema from a CRD document

use std::path::PathBuf;

/// Extraction error kinds. All of them are fatal to a run.
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("CRD document is not valid YAML/JSON: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid schema shape at `{path}`: {reason}")]
    SchemaShape { path: String, reason: String },

    #[error("invalid resource title: {0}")]
    Title(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    pub(crate) fn shape(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaShape {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a missing or malformed schema path
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::SchemaShape { .. })
    }
}
