//! Service-account credential lookup.
//!
//! The credential names the destination project. Lookup order is the
//! `--credentials` flag, then `GOOGLE_APPLICATION_CREDENTIALS`, then
//! `serviceAccountKey.json` in the working directory. A path that is
//! named but missing is an error rather than a reason to keep looking.

use crate::error::{CliError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the credential file
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Credential file looked for when nothing else is given
pub const DEFAULT_CREDENTIALS_FILE: &str = "serviceAccountKey.json";

/// A parsed service-account key.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    /// Destination project
    pub project_id: String,

    /// Identity the key belongs to
    pub client_email: String,

    /// Remaining key fields, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceAccount {
    /// Resolve and load the credential using the process environment.
    pub fn resolve(explicit: Option<&Path>) -> Result<(PathBuf, Self)> {
        let path = resolve_path(
            explicit,
            std::env::var_os(CREDENTIALS_ENV),
            Path::new(DEFAULT_CREDENTIALS_FILE),
        )?;
        let account = Self::from_file(&path)?;
        Ok((path, account))
    }

    /// Load a credential file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Credentials(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
            .map_err(|e| CliError::Credentials(format!("{}: {}", path.display(), e)))
    }

    fn from_json(json: &str) -> std::result::Result<Self, String> {
        let account: ServiceAccount =
            serde_json::from_str(json).map_err(|e| format!("not a service-account key ({})", e))?;
        if account.project_id.trim().is_empty() {
            return Err("project_id is empty".to_string());
        }
        Ok(account)
    }
}

/// Pick the credential path from the flag, the environment value, or the default.
pub fn resolve_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    default: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return existing(path.to_path_buf(), "--credentials");
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return existing(PathBuf::from(value), CREDENTIALS_ENV);
    }
    if default.is_file() {
        return Ok(default.to_path_buf());
    }
    Err(CliError::Credentials(format!(
        "No service-account key found. Pass --credentials, set {} or place {} in the working directory",
        CREDENTIALS_ENV,
        default.display()
    )))
}

fn existing(path: PathBuf, source: &str) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(CliError::Credentials(format!(
            "{} points to {}, which does not exist",
            source,
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const KEY: &str = r#"{
        "type": "service_account",
        "project_id": "cms-demo",
        "client_email": "importer@cms-demo.iam.gserviceaccount.com",
        "private_key_id": "abc123"
    }"#;

    fn key_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_key() {
        let account = ServiceAccount::from_json(KEY).unwrap();
        assert_eq!(account.project_id, "cms-demo");
        assert_eq!(account.client_email, "importer@cms-demo.iam.gserviceaccount.com");
        assert_eq!(account.extra.get("type"), Some(&Value::from("service_account")));
    }

    #[test]
    fn test_missing_project_id() {
        let result = ServiceAccount::from_json(r#"{"client_email": "x@y"}"#);
        assert!(result.is_err());
        let result = ServiceAccount::from_json(r#"{"project_id": " ", "client_email": "x@y"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_json_is_credential_error() {
        let file = key_file("not json");
        let result = ServiceAccount::from_file(file.path());
        assert!(matches!(result, Err(CliError::Credentials(_))));
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = key_file(KEY);
        let env = key_file(KEY);
        let path = resolve_path(
            Some(explicit.path()),
            Some(env.path().as_os_str().to_owned()),
            Path::new("does-not-exist.json"),
        )
        .unwrap();
        assert_eq!(path, explicit.path());
    }

    #[test]
    fn test_env_before_default() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join(DEFAULT_CREDENTIALS_FILE);
        fs::write(&default, KEY).unwrap();
        let env = key_file(KEY);

        let path = resolve_path(None, Some(env.path().as_os_str().to_owned()), &default).unwrap();
        assert_eq!(path, env.path());

        let path = resolve_path(None, None, &default).unwrap();
        assert_eq!(path, default);
    }

    #[test]
    fn test_named_but_missing_is_fatal() {
        let dir = TempDir::new().unwrap();
        let default = dir.path().join(DEFAULT_CREDENTIALS_FILE);
        fs::write(&default, KEY).unwrap();

        let missing = dir.path().join("missing.json");
        let result = resolve_path(Some(&missing), None, &default);
        assert!(matches!(result, Err(CliError::Credentials(_))));

        let result = resolve_path(None, Some(missing.into_os_string()), &default);
        assert!(matches!(result, Err(CliError::Credentials(_))));
    }

    #[test]
    fn test_nothing_found() {
        let dir = TempDir::new().unwrap();
        let result = resolve_path(None, None, &dir.path().join(DEFAULT_CREDENTIALS_FILE));
        let message = result.unwrap_err().to_string();
        assert!(message.contains(CREDENTIALS_ENV));
    }
}
