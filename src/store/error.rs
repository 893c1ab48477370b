use std::path::PathBuf;
use thiserror::Error;

/// Failures of the file-backed collection store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read collection file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("collection file {path} is not a valid JSON array of records: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write collection file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}
