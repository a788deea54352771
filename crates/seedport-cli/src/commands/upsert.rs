//! Upsert command implementation.

use super::log_skipped;
use crate::cli::UpsertArgs;
use crate::config::Config;
use crate::credentials::ServiceAccount;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use seedport_extractor::{Extractor, ExtractorConfig};
use seedport_importer::{ImportConfig, ImportReport, Importer, RecordSet};
use seedport_store::{MemoryStore, SqliteStore};
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the upsert command.
///
/// The import is synchronous and may sleep between retries, so it runs on
/// the blocking pool rather than a runtime worker.
pub async fn execute_upsert(args: UpsertArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let dry_run = args.dry_run;
    let config = config.clone();
    let report = tokio::task::spawn_blocking(move || run_upsert(&args, &config)).await??;
    println!("{}", formatter.format_import(&report, dry_run)?);
    Ok(())
}

/// Resolve the credential, load the input and import it.
///
/// The credential is resolved before the input is read so a missing key
/// fails the run before anything is written.
pub fn run_upsert(args: &UpsertArgs, config: &Config) -> Result<ImportReport> {
    let (key_path, account) = ServiceAccount::resolve(args.credentials.as_deref())?;
    info!(
        project = %account.project_id,
        "Using service account {} from {}",
        account.client_email,
        key_path.display()
    );

    let import_config = import_config(config, args.batch_size)?;
    let records = load_records(&args.input, &config.extractor)?;
    info!(
        users = records.users.len(),
        cases = records.cases.len(),
        progress = records.progress.len(),
        "Loaded {} record(s) from {}",
        records.len(),
        args.input.display()
    );

    let importer = Importer::new(import_config);

    if args.dry_run {
        let mut store = MemoryStore::new();
        return Ok(importer.import(&mut store, &records)?);
    }

    let db_path = config.database_path(&account.project_id, args.database.as_deref())?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    info!("Writing to {}", db_path.display());

    let mut store = SqliteStore::new(&db_path)?;
    Ok(importer.import(&mut store, &records)?)
}

/// Read records from a `.json` export, or extract them from source text.
pub fn load_records(input: &Path, extractor_config: &ExtractorConfig) -> Result<RecordSet> {
    let is_json = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let contents = fs::read_to_string(input)?;
        return Ok(RecordSet::from_json_str(&contents)?);
    }

    let result = Extractor::new(extractor_config.clone()).extract_file(input)?;
    log_skipped(&result);
    Ok(RecordSet::from_bundle(&result.bundle)?)
}

fn import_config(config: &Config, batch_size: Option<usize>) -> Result<ImportConfig> {
    let mut import = config.import.clone();
    if let Some(size) = batch_size {
        import.batch_size = size;
    }
    import.validate().map_err(CliError::InvalidInput)?;
    Ok(import)
}
