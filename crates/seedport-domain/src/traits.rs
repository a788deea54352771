//! Trait definitions for destination stores
//!
//! These traits define the boundary between the import pipeline and the
//! document database. Implementations live in `seedport-store`.

use crate::Document;

/// One upsert inside an atomic write group
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWrite {
    /// Target identifier; `None` asks the store to generate one
    pub id: Option<String>,

    /// Full document contents; replaces any existing document
    pub document: Document,
}

impl DocumentWrite {
    /// Upsert keyed by an explicit identifier
    pub fn keyed(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: Some(id.into()),
            document,
        }
    }

    /// Create with a store-generated identifier
    pub fn generated(document: Document) -> Self {
        Self { id: None, document }
    }
}

/// Trait for document databases that accept atomic write groups
///
/// Implemented by the infrastructure layer (seedport-store)
pub trait DocumentStore {
    /// Error type for store operations
    type Error;

    /// Largest write group the store accepts in one commit
    fn max_batch_size(&self) -> usize;

    /// Atomically apply a group of upserts to one collection.
    ///
    /// Either every write is applied or none is. Returns the identifier of
    /// each written document, in input order.
    fn commit(&mut self, collection: &str, writes: Vec<DocumentWrite>) -> Result<Vec<String>, Self::Error>;

    /// Get a document by identifier
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, Self::Error>;

    /// Number of documents in a collection
    fn count(&self, collection: &str) -> Result<usize, Self::Error>;

    /// All identifiers in a collection, sorted
    fn list_ids(&self, collection: &str) -> Result<Vec<String>, Self::Error>;
}
