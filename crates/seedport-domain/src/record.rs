//! Seed record types
//!
//! One struct per constructor kind found in the database initializer.
//! Field names serialize in camelCase to match the documents the mobile and
//! web clients read.

use crate::timestamp::iso_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document status assigned to a case when the source does not set one
pub const DEFAULT_DOCUMENT_STATUS: &str = "NOT_UPLOADED";

/// The three record kinds, each mapped to one destination collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `User(...)` occurrences
    User,
    /// `CaseEntity(...)` occurrences
    Case,
    /// `Progress(...)` occurrences
    Progress,
}

impl RecordKind {
    /// All kinds, in import order
    pub const ALL: [RecordKind; 3] = [RecordKind::User, RecordKind::Case, RecordKind::Progress];

    /// Destination collection name
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::User => "users",
            RecordKind::Case => "cases",
            RecordKind::Progress => "progress",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// An application user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Unique identifier
    pub id: String,

    /// Login name
    pub username: String,

    /// Password, plaintext as authored in the seed source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Role enum token (e.g. `ADMIN`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Stamped at extraction time, never read from the source
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// A case assigned to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Unique identifier
    pub id: String,

    /// Case title
    pub title: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Status enum token (e.g. `OPEN`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Soft reference to a user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// Soft reference to a user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// Creation time
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,

    /// Last update time
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,

    /// Completion percentage, 0 when not given
    #[serde(default)]
    pub progress_percentage: i64,

    /// Document status enum token
    #[serde(default = "default_document_status")]
    pub document_status: String,
}

/// A progress note for a user on a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Unique identifier
    pub id: String,

    /// Soft reference to a user id
    pub user_id: String,

    /// Soft reference to a case id
    pub case_id: String,

    /// Completion percentage, 0 when not given
    #[serde(default)]
    pub progress_percentage: i64,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Last update time
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// The full result of one extraction run, in source order per kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedBundle {
    /// Extracted users
    #[serde(default)]
    pub users: Vec<UserRecord>,

    /// Extracted cases
    #[serde(default)]
    pub cases: Vec<CaseRecord>,

    /// Extracted progress entries
    #[serde(default)]
    pub progress: Vec<ProgressRecord>,
}

impl SeedBundle {
    /// Total number of records across all kinds
    pub fn len(&self) -> usize {
        self.users.len() + self.cases.len() + self.progress.len()
    }

    /// True when no records were extracted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records of one kind
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::User => self.users.len(),
            RecordKind::Case => self.cases.len(),
            RecordKind::Progress => self.progress.len(),
        }
    }

    /// Records of one kind as plain JSON objects
    pub fn json_records(&self, kind: RecordKind) -> Result<Vec<serde_json::Value>, serde_json::Error> {
        match kind {
            RecordKind::User => self.users.iter().map(serde_json::to_value).collect(),
            RecordKind::Case => self.cases.iter().map(serde_json::to_value).collect(),
            RecordKind::Progress => self.progress.iter().map(serde_json::to_value).collect(),
        }
    }
}

fn default_document_status() -> String {
    DEFAULT_DOCUMENT_STATUS.to_string()
}
