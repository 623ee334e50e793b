use std::path::PathBuf;

use docmerge_api::ValidationError;
use docmerge_ingest::IngestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocmergeError {
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error("registration error: {0}")]
    Ingest(#[from] IngestError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed artifact {}: {reason}", path.display())]
    Artifact { path: PathBuf, reason: String },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocmergeError {
    pub fn artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DocmergeError::Artifact {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocmergeError>;
