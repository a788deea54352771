//! Input record sets
//!
//! Records enter the importer as JSON objects so that pre-normalized exports
//! carrying extra fields are written unchanged.

use crate::error::ImportError;
use seedport_domain::{RecordKind, SeedBundle};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Records per destination collection
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordSet {
    /// `users` collection
    #[serde(default, deserialize_with = "array_or_empty")]
    pub users: Vec<Value>,

    /// `cases` collection
    #[serde(default, deserialize_with = "array_or_empty")]
    pub cases: Vec<Value>,

    /// `progress` collection
    #[serde(default, deserialize_with = "array_or_empty")]
    pub progress: Vec<Value>,
}

impl RecordSet {
    /// Parse a `{users, cases, progress}` document.
    ///
    /// Missing, null or non-array members are treated as empty.
    pub fn from_json_str(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert extracted records, rendering timestamps as ISO-8601 strings
    pub fn from_bundle(bundle: &SeedBundle) -> Result<Self, ImportError> {
        Ok(Self {
            users: bundle.json_records(RecordKind::User)?,
            cases: bundle.json_records(RecordKind::Case)?,
            progress: bundle.json_records(RecordKind::Progress)?,
        })
    }

    /// Records for one kind
    pub fn records(&self, kind: RecordKind) -> &[Value] {
        match kind {
            RecordKind::User => &self.users,
            RecordKind::Case => &self.cases,
            RecordKind::Progress => &self.progress,
        }
    }

    /// Total records across all kinds
    pub fn len(&self) -> usize {
        self.users.len() + self.cases.len() + self.progress.len()
    }

    /// True when there is nothing to import
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn array_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_members() {
        let set = RecordSet::from_json_str(r#"{"users": null, "cases": [{"id": "c1"}]}"#).unwrap();
        assert!(set.users.is_empty());
        assert_eq!(set.cases.len(), 1);
        assert!(set.progress.is_empty());
    }

    #[test]
    fn test_non_array_member_ignored() {
        let set = RecordSet::from_json_str(r#"{"progress": {"id": "p1"}}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_extra_fields_preserved() {
        let set = RecordSet::from_json_str(r#"{"users": [{"id": "u1", "legacyFlag": true}]}"#).unwrap();
        assert_eq!(set.users[0]["legacyFlag"], true);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            RecordSet::from_json_str("{users: []"),
            Err(ImportError::JsonParse(_))
        ));
    }
}
