//! Seedport Extractor
//!
//! Pulls seed records out of an Android database initializer written in
//! Kotlin.
//!
//! # Overview
//!
//! Seed data for the mobile app lives in source code as constructor calls:
//!
//! ```text
//! User(id = "u1", username = "alice", role = UserRole.ADMIN, ...)
//! CaseEntity(id = "c1", title = "Intake", createdAt = Date(System.currentTimeMillis() - 86400000L), ...)
//! Progress(id = "p1", userId = "u1", caseId = "c1", progressPercentage = 40, ...)
//! ```
//!
//! The Extractor finds those calls and turns them into [`seedport_domain`]
//! records ready for export or import.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Call parser → Field mapping → SeedBundle
//!                                    ├─ enum tokens → last segment
//!                                    └─ Date(expr)  → safe evaluator
//! ```
//!
//! # Key Features
//!
//! - **Recursive-descent call parsing**: nested parentheses, strings containing
//!   parentheses and commented-out calls are all handled
//! - **Safe date evaluation**: a whitelist-gated arithmetic evaluator with
//!   a single `now` symbol, no dynamic code evaluation
//! - **Never fails**: unusable call sites are reported, not raised

#![warn(missing_docs)]

mod config;
mod date_expr;
mod error;
mod extractor;
mod lexer;
mod parser;
mod types;

pub use config::ExtractorConfig;
pub use date_expr::{evaluate_millis, evaluate_timestamp, CURRENT_TIME_CALL};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use types::{ExtractionMetadata, ExtractionResult, SkipReason, SkippedOccurrence};
