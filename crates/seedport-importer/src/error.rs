//! Error types for import operations

use thiserror::Error;

/// Errors that can occur during an import
#[derive(Error, Debug)]
pub enum ImportError {
    /// A write group failed to commit; earlier groups stay committed
    #[error("Storage error in '{collection}' batch {batch}: {message}")]
    Store {
        /// Collection being written
        collection: String,
        /// Zero-based batch index
        batch: usize,
        /// Store error text
        message: String,
    },

    /// A record is not a JSON object
    #[error("Record {index} in '{collection}' is not an object")]
    InvalidRecord {
        /// Collection the record belongs to
        collection: String,
        /// Position in the input array
        index: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON input could not be parsed
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::JsonParse(e.to_string())
    }
}
