//! Command implementations.

pub mod extract;
pub mod serve;
pub mod upsert;

pub use self::extract::execute_extract;
pub use self::serve::execute_serve;
pub use self::upsert::execute_upsert;

use seedport_extractor::ExtractionResult;
use tracing::warn;

/// Log constructor calls that did not become records.
fn log_skipped(result: &ExtractionResult) {
    for skipped in &result.skipped {
        warn!(
            kind = %skipped.kind,
            line = skipped.line,
            "Skipped {} call: {}",
            skipped.kind,
            skipped.reason
        );
    }
}
