use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate variable name: {0}")]
    DuplicateVariable(String),
    #[error("invalid attribute value: {0}")]
    InvalidAttribute(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
