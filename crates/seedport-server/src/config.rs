//! Configuration for the legacy API server.
//!
//! Loads bind settings from TOML, with the `PORT` environment variable
//! taking precedence as it did for the Node deployment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse or serialize TOML
    #[error("Failed to {action} TOML: {message}")]
    Toml {
        /// "parse" or "serialize"
        action: &'static str,
        /// Underlying error text
        message: String,
    },

    /// A value is present but unusable
    #[error("Invalid configuration value for {field}: {value}")]
    Invalid {
        /// Offending field
        field: String,
        /// Offending value
        value: String,
    },
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub bind_address: String,

    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

impl ServerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "bind_address".to_string(),
                value: self.bind_address.clone(),
            });
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Toml {
            action: "parse",
            message: e.to_string(),
        })
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Toml {
            action: "serialize",
            message: e.to_string(),
        })
    }

    /// Apply `PORT` from the environment, if set
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        match std::env::var(PORT_ENV) {
            Ok(raw) => self.with_port_str(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_port_str(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
            field: PORT_ENV.to_string(),
            value: raw.to_string(),
        })?;
        Ok(self)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
