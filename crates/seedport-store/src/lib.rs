//! Seedport Storage Layer
//!
//! Implements the [`DocumentStore`](seedport_domain::DocumentStore) trait.
//!
//! # Architecture
//!
//! - [`SqliteStore`]: persistent destination, one row per document, each
//!   write group committed in a single transaction
//! - [`MemoryStore`]: in-process destination for tests and dry runs
//!
//! Both cap a write group at [`MAX_BATCH_SIZE`] documents, the largest
//! atomic write Firestore accepts, so a batch plan that works here works
//! against the hosted store too.
//!
//! # Examples
//!
//! ```no_run
//! use seedport_store::SqliteStore;
//!
//! let store = SqliteStore::new("seed.sqlite3").unwrap();
//! // Store is now ready for document writes
//! ```

#![warn(missing_docs)]

mod error;
mod memory;
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Largest write group accepted in one atomic commit
pub const MAX_BATCH_SIZE: usize = 500;

pub(crate) fn check_batch_size(size: usize, max: usize) -> Result<(), StoreError> {
    if size > max {
        return Err(StoreError::BatchTooLarge { size, max });
    }
    Ok(())
}
