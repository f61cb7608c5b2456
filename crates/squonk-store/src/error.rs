//! Error types for squonk-store

use std::path::PathBuf;

use squonk_types::GroupId;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for registry store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed registry file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Key '{0}' holds a group registration, not a song list")]
    KeyConflict(GroupId),
}
