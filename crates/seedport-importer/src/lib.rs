//! Seedport Importer
//!
//! Writes seed records into a document store with upsert semantics.
//!
//! # Overview
//!
//! For each collection the Importer:
//! - **Deduplicates** by identifier, keeping the first occurrence
//! - **Batches** the remaining records into atomic write groups
//! - **Converts** `createdAt` / `updatedAt` strings into native timestamps
//! - **Upserts** each group, creating or fully overwriting documents
//!
//! Re-running an import with the same identifiers overwrites rather than
//! duplicates. Records without an identifier get a store-generated one on
//! every run.
//!
//! # Configuration
//!
//! ```toml
//! [import]
//! batch_size = 400
//! id_field = "id"
//! commit_retries = 0
//! retry_backoff_ms = 500
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod importer;
mod records;
mod report;

pub use config::ImportConfig;
pub use error::ImportError;
pub use importer::{dedup_by_id, document_id, Importer, KeyedRecord};
pub use records::RecordSet;
pub use report::{CollectionReport, ImportReport};
