//! Error types for the Extractor
//!
//! Extraction itself never fails; these cover reading input and loading
//! configuration.

use thiserror::Error;

/// Errors that can occur around extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Reading the source file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serializing or parsing a seed export failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Serialization(e.to_string())
    }
}
