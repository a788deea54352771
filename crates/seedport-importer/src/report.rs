//! Import reporting

use serde::Serialize;

/// Outcome of importing one collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    /// Destination collection
    pub collection: String,

    /// Records received
    pub received: usize,

    /// Records dropped because an earlier record had the same identifier
    pub duplicates: usize,

    /// Documents written
    pub written: usize,

    /// Documents written under a store-generated identifier
    pub generated_ids: usize,

    /// Write groups committed
    pub batches: usize,
}

/// Outcome of importing a full record set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Per-collection results, in import order
    pub collections: Vec<CollectionReport>,

    /// Wall-clock time of the import in milliseconds
    pub elapsed_ms: u64,
}

impl ImportReport {
    /// Total documents written
    pub fn total_written(&self) -> usize {
        self.collections.iter().map(|c| c.written).sum()
    }

    /// Total duplicates dropped
    pub fn total_duplicates(&self) -> usize {
        self.collections.iter().map(|c| c.duplicates).sum()
    }

    /// Total write groups committed
    pub fn total_batches(&self) -> usize {
        self.collections.iter().map(|c| c.batches).sum()
    }

    /// Report for one collection
    pub fn collection(&self, name: &str) -> Option<&CollectionReport> {
        self.collections.iter().find(|c| c.collection == name)
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Import Summary".to_string(),
            "==============".to_string(),
        ];
        for c in &self.collections {
            lines.push(format!(
                "{:<10} received {:>5}  written {:>5}  duplicates {:>4}  generated ids {:>4}  batches {:>3}",
                c.collection, c.received, c.written, c.duplicates, c.generated_ids, c.batches
            ));
        }
        lines.push(format!(
            "Total: {} written, {} duplicates dropped, {} batches in {} ms",
            self.total_written(),
            self.total_duplicates(),
            self.total_batches(),
            self.elapsed_ms
        ));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let report = ImportReport {
            collections: vec![
                CollectionReport {
                    collection: "users".to_string(),
                    received: 3,
                    duplicates: 1,
                    written: 2,
                    generated_ids: 0,
                    batches: 1,
                },
                CollectionReport {
                    collection: "cases".to_string(),
                    received: 5,
                    duplicates: 0,
                    written: 5,
                    generated_ids: 1,
                    batches: 2,
                },
            ],
            elapsed_ms: 12,
        };

        assert_eq!(report.total_written(), 7);
        assert_eq!(report.total_duplicates(), 1);
        assert_eq!(report.total_batches(), 3);
        assert_eq!(report.collection("cases").map(|c| c.generated_ids), Some(1));
        assert!(report.summary().contains("Total: 7 written"));
    }
}
