//! Configuration for the Extractor

use crate::error::ExtractorError;
use seedport_domain::DEFAULT_DOCUMENT_STATUS;
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
///
/// Names the constructors recognised in seed source. The defaults match the
/// Room entities of the case-management app.
///
/// Names match whole identifiers only: `TaskProgress(...)` is not a
/// `Progress(...)` call. An app whose entities carry a prefix must name them
/// here, e.g. `progress_constructor = "TaskProgress"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Constructor producing user records
    pub user_constructor: String,

    /// Constructor producing case records
    pub case_constructor: String,

    /// Constructor producing progress records (exact identifier)
    pub progress_constructor: String,

    /// Wrapper call around timestamp expressions (`Date(...)`)
    pub timestamp_wrapper: String,

    /// Document status for cases that do not set one
    pub default_document_status: String,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let names = [
            ("user_constructor", &self.user_constructor),
            ("case_constructor", &self.case_constructor),
            ("progress_constructor", &self.progress_constructor),
            ("timestamp_wrapper", &self.timestamp_wrapper),
        ];
        for (field, value) in names {
            if !is_identifier(value) {
                return Err(format!("{} must be a plain identifier, got '{}'", field, value));
            }
        }
        if self.user_constructor == self.case_constructor
            || self.user_constructor == self.progress_constructor
            || self.case_constructor == self.progress_constructor
        {
            return Err("constructor names must be distinct".to_string());
        }
        if self.default_document_status.is_empty() {
            return Err("default_document_status must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_constructor: "User".to_string(),
            case_constructor: "CaseEntity".to_string(),
            progress_constructor: "Progress".to_string(),
            timestamp_wrapper: "Date".to_string(),
            default_document_status: DEFAULT_DOCUMENT_STATUS.to_string(),
        }
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => chars.all(|c| c == '_' || c.is_alphanumeric()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_qualified_name_rejected() {
        let config = ExtractorConfig {
            case_constructor: "entity.CaseEntity".to_string(),
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let config = ExtractorConfig {
            progress_constructor: "User".to_string(),
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExtractorConfig::from_toml(r#"case_constructor = "Case""#).unwrap();
        assert_eq!(config.case_constructor, "Case");
        assert_eq!(config.user_constructor, "User");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
