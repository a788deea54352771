//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::date_expr::evaluate_timestamp;
use crate::error::ExtractorError;
use crate::parser::{find_calls, ArgValue, CallExpr};
use crate::types::{ExtractionMetadata, ExtractionResult, SkipReason, SkippedOccurrence};
use chrono::{DateTime, Utc};
use seedport_domain::token::last_segment;
use seedport_domain::{CaseRecord, ProgressRecord, RecordKind, SeedBundle, UserRecord};
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// The Extractor turns seed source text into records
///
/// # Examples
///
/// ```
/// use seedport_extractor::Extractor;
///
/// let source = r#"
///     User(id = "u1", username = "alice", role = Role.ADMIN)
///     CaseEntity(id = "c1", title = "Intake", status = Status.OPEN, progressPercentage = 40)
/// "#;
///
/// let result = Extractor::default_config().extract(source);
/// assert_eq!(result.bundle.users[0].role.as_deref(), Some("ADMIN"));
/// assert_eq!(result.bundle.cases[0].progress_percentage, 40);
/// assert_eq!(result.bundle.cases[0].document_status, "NOT_UPLOADED");
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an Extractor with default configuration
    pub fn default_config() -> Self {
        Self::new(ExtractorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Read a source file and extract from it
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractorError> {
        let source = std::fs::read_to_string(path)?;
        Ok(self.extract(&source))
    }

    /// Extract records, using the current time for `now`
    pub fn extract(&self, source: &str) -> ExtractionResult {
        self.extract_at(source, Utc::now())
    }

    /// Extract records with an explicit `now`.
    ///
    /// Never fails: call sites that cannot be parsed or that lack mandatory
    /// fields are reported in [`ExtractionResult::skipped`].
    pub fn extract_at(&self, source: &str, now: DateTime<Utc>) -> ExtractionResult {
        let start = Instant::now();

        let callees: HashSet<&str> = [
            self.config.user_constructor.as_str(),
            self.config.case_constructor.as_str(),
            self.config.progress_constructor.as_str(),
        ]
        .into_iter()
        .collect();

        let sites = find_calls(source, &callees);
        debug!("Found {} constructor call sites", sites.len());

        let mut bundle = SeedBundle::default();
        let mut skipped = Vec::new();

        for site in &sites {
            let Some(kind) = self.kind_of(&site.callee) else {
                continue;
            };
            let call = match &site.call {
                Ok(call) => call,
                Err(e) => {
                    skipped.push(SkippedOccurrence {
                        kind,
                        line: site.line,
                        reason: SkipReason::Unparseable(e.to_string()),
                    });
                    continue;
                }
            };

            let outcome = match kind {
                RecordKind::User => self.user(call, now).map(|u| bundle.users.push(u)),
                RecordKind::Case => self.case(call, now).map(|c| bundle.cases.push(c)),
                RecordKind::Progress => self.progress(call, now).map(|p| bundle.progress.push(p)),
            };
            if let Err(missing) = outcome {
                skipped.push(SkippedOccurrence {
                    kind,
                    line: site.line,
                    reason: SkipReason::MissingFields(missing),
                });
            }
        }

        ExtractionResult {
            bundle,
            skipped,
            metadata: ExtractionMetadata {
                extracted_at: now,
                call_sites: sites.len(),
                processing_time_ms: start.elapsed().as_millis() as u64,
            },
        }
    }

    fn kind_of(&self, callee: &str) -> Option<RecordKind> {
        if callee == self.config.user_constructor {
            Some(RecordKind::User)
        } else if callee == self.config.case_constructor {
            Some(RecordKind::Case)
        } else if callee == self.config.progress_constructor {
            Some(RecordKind::Progress)
        } else {
            None
        }
    }

    fn user(&self, call: &CallExpr, now: DateTime<Utc>) -> Result<UserRecord, Vec<&'static str>> {
        let mut missing = Vec::new();
        let id = required(string_arg(call, "id"), "id", &mut missing);
        let username = required(string_arg(call, "username"), "username", &mut missing);
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(UserRecord {
            id,
            username,
            password: string_arg(call, "password"),
            role: enum_arg(call, "role"),
            name: string_arg(call, "name"),
            email: string_arg(call, "email"),
            created_at: now,
        })
    }

    fn case(&self, call: &CallExpr, now: DateTime<Utc>) -> Result<CaseRecord, Vec<&'static str>> {
        let mut missing = Vec::new();
        let id = required(string_arg(call, "id"), "id", &mut missing);
        let title = required(string_arg(call, "title"), "title", &mut missing);
        if !missing.is_empty() {
            return Err(missing);
        }

        let document_status = enum_arg(call, "documentStatus")
            .filter(|status| !status.is_empty())
            .unwrap_or_else(|| self.config.default_document_status.clone());

        Ok(CaseRecord {
            id,
            title,
            description: string_arg(call, "description"),
            status: enum_arg(call, "status"),
            assigned_to: string_arg(call, "assignedTo"),
            created_by: string_arg(call, "createdBy"),
            created_at: self.timestamp_arg(call, "createdAt", now),
            updated_at: self.timestamp_arg(call, "updatedAt", now),
            progress_percentage: int_arg(call, "progressPercentage"),
            document_status,
        })
    }

    fn progress(&self, call: &CallExpr, now: DateTime<Utc>) -> Result<ProgressRecord, Vec<&'static str>> {
        let mut missing = Vec::new();
        let id = required(string_arg(call, "id"), "id", &mut missing);
        let user_id = required(string_arg(call, "userId"), "userId", &mut missing);
        let case_id = required(string_arg(call, "caseId"), "caseId", &mut missing);
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(ProgressRecord {
            id,
            user_id,
            case_id,
            progress_percentage: int_arg(call, "progressPercentage"),
            notes: string_arg(call, "notes"),
            updated_at: self.timestamp_arg(call, "updatedAt", now),
        })
    }

    /// `name = Date(<expr>)`, evaluated; anything else is `now`.
    fn timestamp_arg(&self, call: &CallExpr, name: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        match call.named(name) {
            Some(ArgValue::Call(inner)) if inner.simple_name() == self.config.timestamp_wrapper => {
                evaluate_timestamp(&inner.inner_source, now)
            }
            _ => now,
        }
    }
}

/// Record a missing mandatory field; empty strings count as missing.
fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

/// Quoted string argument
fn string_arg(call: &CallExpr, name: &str) -> Option<String> {
    match call.named(name) {
        Some(ArgValue::Str(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Bare or dotted token argument, reduced to its last segment
fn enum_arg(call: &CallExpr, name: &str) -> Option<String> {
    match call.named(name) {
        Some(ArgValue::Path(token)) | Some(ArgValue::Number(token)) => Some(last_segment(token).to_string()),
        _ => None,
    }
}

/// Leading digits of an integer literal; 0 when absent or malformed
fn int_arg(call: &CallExpr, name: &str) -> i64 {
    match call.named(name) {
        Some(ArgValue::Number(raw)) => {
            let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}
