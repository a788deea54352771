//! Result types for extraction

use chrono::{DateTime, Utc};
use seedport_domain::{RecordKind, SeedBundle};
use std::fmt;

/// Result of an extraction run
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Records retained, in source order per kind
    pub bundle: SeedBundle,

    /// Call sites that did not yield a record
    pub skipped: Vec<SkippedOccurrence>,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

/// A constructor call that was found but not turned into a record
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedOccurrence {
    /// Which constructor was called
    pub kind: RecordKind,

    /// 1-based source line of the call
    pub line: usize,

    /// Why it was skipped
    pub reason: SkipReason,
}

/// Why an occurrence was skipped
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Mandatory fields were absent or empty
    MissingFields(Vec<&'static str>),

    /// The argument list could not be parsed
    Unparseable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFields(fields) => write!(f, "missing {}", fields.join(", ")),
            SkipReason::Unparseable(reason) => f.write_str(reason),
        }
    }
}

/// Metadata about an extraction run
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// The instant used for `now` in timestamp expressions and stamps
    pub extracted_at: DateTime<Utc>,

    /// Matching constructor calls found, retained or not
    pub call_sites: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
