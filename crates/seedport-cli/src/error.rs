//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No usable service-account credential
    #[error("Credential error: {0}")]
    Credentials(String),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extractor(#[from] seedport_extractor::ExtractorError),

    /// Store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] seedport_store::StoreError),

    /// Import failed part-way or never started
    #[error("Import error: {0}")]
    Import(#[from] seedport_importer::ImportError),

    /// Server error
    #[error("Server error: {0}")]
    Server(#[from] seedport_server::ServerError),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
