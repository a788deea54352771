//! In-memory document store

use crate::{check_batch_size, StoreError, MAX_BATCH_SIZE};
use seedport_domain::{new_document_id, Document, DocumentStore, DocumentWrite};
use std::collections::{BTreeMap, HashMap};

/// In-memory implementation of DocumentStore
///
/// Used for dry runs and tests. Counts commits so callers can observe how a
/// run was split into write groups.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    collections: HashMap<String, BTreeMap<String, Document>>,
    max_batch_size: usize,
    commits: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            collections: HashMap::new(),
            max_batch_size: MAX_BATCH_SIZE,
            commits: 0,
        }
    }

    /// Lower the accepted write-group size
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Number of successful commits so far
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Names of collections holding at least one document
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    type Error = StoreError;

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    fn commit(&mut self, collection: &str, writes: Vec<DocumentWrite>) -> Result<Vec<String>, Self::Error> {
        check_batch_size(writes.len(), self.max_batch_size)?;

        let docs = self.collections.entry(collection.to_string()).or_default();
        let ids = writes
            .into_iter()
            .map(|write| {
                let id = write.id.unwrap_or_else(new_document_id);
                docs.insert(id.clone(), write.document);
                id
            })
            .collect();
        self.commits += 1;
        Ok(ids)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, Self::Error> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn count(&self, collection: &str) -> Result<usize, Self::Error> {
        Ok(self.collections.get(collection).map_or(0, BTreeMap::len))
    }

    fn list_ids(&self, collection: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }
}
