//! Seedport Domain Layer
//!
//! Core types shared by every other Seedport crate: the three seed record
//! kinds, the document value model used by destination stores, and the
//! trait that destination stores implement.
//!
//! ## Key Concepts
//!
//! - **Seed records**: users, cases and progress entries extracted from an
//!   Android database initializer
//! - **Enum tokens**: qualified constant references reduced to their last segment
//! - **Documents**: field maps with native timestamp values, keyed by identifier
//! - **Soft references**: identifiers naming other records by value, never checked
//!
//! ## Architecture
//!
//! - Pure data and conversions only, no I/O
//! - Infrastructure implementations (SQLite, in-memory) live in `seedport-store`
//! - Trait definitions for all destination interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod record;
pub mod timestamp;
pub mod token;
pub mod traits;

// Re-exports for convenience
pub use document::{new_document_id, Document, FieldValue, TIMESTAMP_FIELDS};
pub use record::{
    CaseRecord, ProgressRecord, RecordKind, SeedBundle, UserRecord, DEFAULT_DOCUMENT_STATUS,
};
pub use token::normalize_enum_token;
pub use traits::{DocumentStore, DocumentWrite};
