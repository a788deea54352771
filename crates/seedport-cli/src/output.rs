//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use seedport_domain::RecordKind;
use seedport_extractor::ExtractionResult;
use seedport_importer::ImportReport;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the outcome of an extract run.
    pub fn format_extraction(&self, result: &ExtractionResult, output: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "output": output.display().to_string(),
                    "users": result.bundle.count(RecordKind::User),
                    "cases": result.bundle.count(RecordKind::Case),
                    "progress": result.bundle.count(RecordKind::Progress),
                    "skipped": result.skipped.len(),
                    "callSites": result.metadata.call_sites,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Collection", "Records"]);
                for kind in RecordKind::ALL {
                    builder.push_record([
                        kind.collection().to_string(),
                        result.bundle.count(kind).to_string(),
                    ]);
                }
                builder.push_record(["(skipped)".to_string(), result.skipped.len().to_string()]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}",
                    self.success(&format!("Wrote {}", output.display())),
                    table
                ))
            }
            OutputFormat::Quiet => Ok(output.display().to_string()),
        }
    }

    /// Format an import report.
    pub fn format_import(&self, report: &ImportReport, dry_run: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "dryRun": dry_run,
                    "collections": report.collections,
                    "totalWritten": report.total_written(),
                    "elapsedMs": report.elapsed_ms,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Collection", "Received", "Duplicates", "Written", "Generated IDs", "Batches"]);

                for c in &report.collections {
                    builder.push_record([
                        c.collection.clone(),
                        c.received.to_string(),
                        c.duplicates.to_string(),
                        c.written.to_string(),
                        c.generated_ids.to_string(),
                        c.batches.to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let headline = if dry_run {
                    self.warning(&format!(
                        "Dry run: {} document(s) would be written",
                        report.total_written()
                    ))
                } else {
                    self.success(&format!(
                        "Import complete: {} document(s) written",
                        report.total_written()
                    ))
                };
                Ok(format!("{}\n{}", headline, table))
            }
            OutputFormat::Quiet => Ok(report.total_written().to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
