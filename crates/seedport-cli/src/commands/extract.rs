//! Extract command implementation.

use super::log_skipped;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use seedport_extractor::{ExtractionResult, Extractor};
use std::fs;
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let result = run_extract(&args, config)?;
    println!("{}", formatter.format_extraction(&result, &args.output)?);
    Ok(())
}

/// Scan the input, write the JSON export and return what was found.
pub fn run_extract(args: &ExtractArgs, config: &Config) -> Result<ExtractionResult> {
    let extractor = Extractor::new(config.extractor.clone());
    let result = extractor.extract_file(&args.input)?;
    log_skipped(&result);

    let json = serde_json::to_string_pretty(&result.bundle)?;
    fs::write(&args.output, json)?;

    info!(
        users = result.bundle.users.len(),
        cases = result.bundle.cases.len(),
        progress = result.bundle.progress.len(),
        "Wrote {}",
        args.output.display()
    );
    Ok(result)
}
