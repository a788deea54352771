//! Core Importer implementation: deduplicate, batch, upsert

use crate::{CollectionReport, ImportConfig, ImportError, ImportReport, RecordSet};
use seedport_domain::{Document, DocumentStore, DocumentWrite, RecordKind};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, warn};

/// A record paired with the identifier it will be written under
pub type KeyedRecord<'a> = (Option<String>, &'a Map<String, Value>);

/// Importer writes record sets into a document store
///
/// Collections are written one after another and, within a collection,
/// write groups are committed sequentially. A failed group aborts the run;
/// groups committed before it are not rolled back.
///
/// # Examples
///
/// ```
/// use seedport_importer::{Importer, ImportConfig, RecordSet};
/// use seedport_store::MemoryStore;
/// use seedport_domain::DocumentStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let records = RecordSet::from_json_str(r#"{"users": [{"id": "u1"}, {"id": "u1"}]}"#)?;
/// let mut store = MemoryStore::new();
/// let importer = Importer::new(ImportConfig::default());
///
/// let report = importer.import(&mut store, &records)?;
/// assert_eq!(report.total_duplicates(), 1);
/// assert_eq!(store.count("users")?, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    /// Create a new Importer with the given configuration
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Create an Importer with default configuration
    pub fn default_config() -> Self {
        Self::new(ImportConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import users, then cases, then progress
    pub fn import<S>(&self, store: &mut S, records: &RecordSet) -> Result<ImportReport, ImportError>
    where
        S: DocumentStore,
        S::Error: std::fmt::Display,
    {
        let start = Instant::now();
        let mut report = ImportReport::default();

        for kind in RecordKind::ALL {
            let collection = self.import_collection(store, kind.collection(), records.records(kind))?;
            report.collections.push(collection);
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Deduplicate `records` and upsert them into `collection` in write groups
    pub fn import_collection<S>(
        &self,
        store: &mut S,
        collection: &str,
        records: &[Value],
    ) -> Result<CollectionReport, ImportError>
    where
        S: DocumentStore,
        S::Error: std::fmt::Display,
    {
        let objects = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record.as_object().ok_or_else(|| ImportError::InvalidRecord {
                    collection: collection.to_string(),
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let unique = dedup_by_id(objects, &self.config.id_field);
        let mut report = CollectionReport {
            collection: collection.to_string(),
            received: records.len(),
            duplicates: records.len() - unique.len(),
            ..CollectionReport::default()
        };

        info!("Importing {} docs into {} ...", unique.len(), collection);
        if report.duplicates > 0 {
            info!(collection, duplicates = report.duplicates, "Dropped duplicate identifiers");
        }

        let batch_size = self.config.batch_size.min(store.max_batch_size()).max(1);
        for (batch, chunk) in unique.chunks(batch_size).enumerate() {
            let writes: Vec<DocumentWrite> = chunk
                .iter()
                .map(|(id, object)| DocumentWrite {
                    id: id.clone(),
                    document: Document::from_json_object(object),
                })
                .collect();

            let ids = self.commit_with_retry(store, collection, batch, writes)?;

            report.written += ids.len();
            report.generated_ids += chunk.iter().filter(|(id, _)| id.is_none()).count();
            report.batches += 1;
            info!("  committed {}/{}", report.written, unique.len());
        }

        Ok(report)
    }

    fn commit_with_retry<S>(
        &self,
        store: &mut S,
        collection: &str,
        batch: usize,
        writes: Vec<DocumentWrite>,
    ) -> Result<Vec<String>, ImportError>
    where
        S: DocumentStore,
        S::Error: std::fmt::Display,
    {
        let mut attempt = 0;
        loop {
            match store.commit(collection, writes.clone()) {
                Ok(ids) => return Ok(ids),
                Err(e) if attempt < self.config.commit_retries => {
                    attempt += 1;
                    warn!(
                        collection,
                        batch,
                        attempt,
                        "Write group failed, retrying: {}",
                        e
                    );
                    std::thread::sleep(self.config.retry_backoff());
                }
                Err(e) => {
                    return Err(ImportError::Store {
                        collection: collection.to_string(),
                        batch,
                        message: e.to_string(),
                    })
                }
            }
        }
    }
}

/// Keep the first record for each identifier, in input order.
///
/// Records without an identifier are never merged with one another.
pub fn dedup_by_id<'a>(records: Vec<&'a Map<String, Value>>, id_field: &str) -> Vec<KeyedRecord<'a>> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|record| {
            let id = document_id(record, id_field);
            if let Some(key) = &id {
                if !seen.insert(key.clone()) {
                    return None;
                }
            }
            Some((id, record))
        })
        .collect()
}

/// Identifier of a record, or `None` when absent.
///
/// Missing, `null`, `""`, `0` and `false` count as absent; other numbers and
/// `true` are stringified. Arrays and objects are not identifiers.
pub fn document_id(record: &Map<String, Value>, id_field: &str) -> Option<String> {
    match record.get(id_field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_id(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Whole floats render without a fraction, so `1.0` and `1` share an id.
fn number_id(n: &Number) -> String {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn objects(values: &[Value]) -> Vec<&Map<String, Value>> {
        values.iter().map(|v| v.as_object().unwrap()).collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let values = vec![
            json!({"id": "u1", "name": "first"}),
            json!({"id": "u2"}),
            json!({"id": "u1", "name": "second"}),
        ];
        let unique = dedup_by_id(objects(&values), "id");

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].1["name"], "first");
        assert_eq!(unique[1].0.as_deref(), Some("u2"));
    }

    #[test]
    fn test_missing_ids_never_merge() {
        let values = vec![json!({"name": "a"}), json!({"id": null}), json!({"id": ""})];
        let unique = dedup_by_id(objects(&values), "id");
        assert_eq!(unique.len(), 3);
        assert!(unique.iter().all(|(id, _)| id.is_none()));
    }

    #[test]
    fn test_identifier_truthiness() {
        let id = |v: Value| document_id(v.as_object().unwrap(), "id");
        assert_eq!(id(json!({"id": 42})), Some("42".to_string()));
        assert_eq!(id(json!({"id": 0})), None);
        assert_eq!(id(json!({"id": false})), None);
        assert_eq!(id(json!({"id": true})), Some("true".to_string()));
        assert_eq!(id(json!({"id": ["a"]})), None);
    }

    #[test]
    fn test_numeric_and_string_ids_collide() {
        let values = vec![json!({"id": 7}), json!({"id": "7"})];
        assert_eq!(dedup_by_id(objects(&values), "id").len(), 1);
    }

    #[test]
    fn test_whole_float_ids_render_as_integers() {
        let id = |v: Value| document_id(v.as_object().unwrap(), "id");
        assert_eq!(id(json!({"id": 1.0})), Some("1".to_string()));
        assert_eq!(id(json!({"id": -3.0})), Some("-3".to_string()));
        assert_eq!(id(json!({"id": 2.5})), Some("2.5".to_string()));
        assert_eq!(id(json!({"id": 0.0})), None);

        let values = vec![json!({"id": 1.0, "n": "first"}), json!({"id": 1}), json!({"id": "1"})];
        let unique = dedup_by_id(objects(&values), "id");
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].1["n"], "first");
    }

    #[test]
    fn test_custom_id_field() {
        let values = vec![json!({"uid": "a", "id": "x"}), json!({"uid": "a", "id": "y"})];
        let unique = dedup_by_id(objects(&values), "uid");
        assert_eq!(unique.len(), 1);
    }
}
