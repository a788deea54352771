//! SQLite-backed document store

use crate::{check_batch_size, StoreError, MAX_BATCH_SIZE};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use seedport_domain::{new_document_id, Document, DocumentStore, DocumentWrite};
use std::path::Path;
use tracing::debug;

/// SQLite-based implementation of DocumentStore
///
/// Documents are stored as JSON in the value-envelope encoding of
/// [`Document`], so native timestamps survive a round trip.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use seedport_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("seed.sqlite3").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a fresh in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn decode(data: &str) -> Result<Document, StoreError> {
        serde_json::from_str(data)
            .map_err(|e| StoreError::InvalidData(format!("Undecodable document: {}", e)))
    }
}

impl DocumentStore for SqliteStore {
    type Error = StoreError;

    fn max_batch_size(&self) -> usize {
        MAX_BATCH_SIZE
    }

    fn commit(&mut self, collection: &str, writes: Vec<DocumentWrite>) -> Result<Vec<String>, Self::Error> {
        check_batch_size(writes.len(), MAX_BATCH_SIZE)?;

        let written_at = Utc::now().timestamp_millis();
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(writes.len());
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO documents (collection, id, data, written_at) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (collection, id) DO UPDATE SET data = excluded.data, written_at = excluded.written_at",
            )?;
            for write in writes {
                let id = write.id.unwrap_or_else(new_document_id);
                let data = serde_json::to_string(&write.document)?;
                stmt.execute(params![collection, &id, data, written_at])?;
                ids.push(id);
            }
        }
        // Dropping an uncommitted transaction rolls it back, so an error above
        // leaves the collection untouched.
        tx.commit()?;

        debug!(collection, writes = ids.len(), "Committed write group");
        Ok(ids)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, Self::Error> {
        let data: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        data.as_deref().map(Self::decode).transpose()
    }

    fn count(&self, collection: &str) -> Result<usize, Self::Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn list_ids(&self, collection: &str) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM documents WHERE collection = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map(params![collection], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}
