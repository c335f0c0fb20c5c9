use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} does not have the expected structure: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {reason}")]
    Serialization { path: PathBuf, reason: String },
}

impl StoreError {
    /// Classify a decode error: well-formed JSON of the wrong shape is a schema
    /// error, anything else is a parse error.
    pub(crate) fn decode(path: PathBuf, source: serde_json::Error) -> Self {
        match source.classify() {
            serde_json::error::Category::Data => StoreError::Schema { path, source },
            _ => StoreError::Parse { path, source },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
