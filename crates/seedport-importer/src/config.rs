//! Configuration for the Importer

use crate::error::ImportError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Importer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Documents per atomic write group; capped by the store's own limit
    pub batch_size: usize,

    /// Field holding the document identifier
    pub id_field: String,

    /// Extra attempts for a failed write group (0 = fail on first error)
    pub commit_retries: u32,

    /// Pause between attempts (milliseconds)
    pub retry_backoff_ms: u64,
}

impl ImportConfig {
    /// Pause between attempts as a Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.id_field.is_empty() {
            return Err("id_field must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ImportError> {
        toml::from_str(toml_str)
            .map_err(|e| ImportError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ImportError> {
        toml::to_string_pretty(self)
            .map_err(|e| ImportError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ImportConfig {
    /// Firestore accepts at most 500 writes per batch
    fn default() -> Self {
        Self {
            batch_size: 400,
            id_field: "id".to_string(),
            commit_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}
