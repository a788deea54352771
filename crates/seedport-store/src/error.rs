//! Error types for document stores

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored data could not be decoded, or a document could not be encoded
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Write group exceeds what the store accepts atomically
    #[error("Batch of {size} writes exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Writes in the rejected group
        size: usize,
        /// Largest accepted group
        max: usize,
    },
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}
