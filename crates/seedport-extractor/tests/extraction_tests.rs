//! Integration tests for extraction from a realistic initializer

use chrono::{Duration, TimeZone, Utc};
use seedport_extractor::{Extractor, SkipReason};
use std::io::Write;

const INITIALIZER: &str = include_str!("fixtures/DatabaseInitializer.kt");

fn now() -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

#[test]
fn test_initializer_users() {
    let result = Extractor::default_config().extract_at(INITIALIZER, now());
    let ids: Vec<_> = result.bundle.users.iter().map(|u| u.id.as_str()).collect();

    // The commented-out user is not extracted.
    assert_eq!(ids, vec!["admin-1", "officer-1"]);
    assert_eq!(result.bundle.users[1].role.as_deref(), Some("OFFICER"));
}

#[test]
fn test_initializer_cases() {
    let result = Extractor::default_config().extract_at(INITIALIZER, now());
    let cases = &result.bundle.cases;
    assert_eq!(cases.len(), 2);

    let first = &cases[0];
    assert_eq!(first.title, "Warehouse inspection (north)");
    assert_eq!(first.description.as_deref(), Some("Follow up on the \"loading bay\" report"));
    assert_eq!(first.status.as_deref(), Some("OPEN"));
    assert_eq!(first.assigned_to.as_deref(), Some("officer-1"));
    assert_eq!(first.progress_percentage, 40);
    assert_eq!(first.document_status, "NOT_UPLOADED");
    // `7 * DAY` references a constant, which is outside the whitelist.
    assert_eq!(first.created_at, now());
    assert_eq!(now() - first.updated_at, Duration::days(2));

    let second = &cases[1];
    assert_eq!(second.description, None);
    assert_eq!(second.document_status, "UPLOADED");
    assert_eq!(now() - second.created_at, Duration::days(30));
    assert_eq!(second.updated_at, now());
}

#[test]
fn test_initializer_skips_case_without_id() {
    let result = Extractor::default_config().extract_at(INITIALIZER, now());
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, SkipReason::MissingFields(vec!["id"]));
    assert_eq!(result.metadata.call_sites, 6);
}

#[test]
fn test_initializer_progress() {
    let result = Extractor::default_config().extract_at(INITIALIZER, now());
    let progress = &result.bundle.progress[0];
    assert_eq!(progress.user_id, "officer-1");
    assert_eq!(progress.case_id, "case-1");
    assert_eq!(progress.notes.as_deref(), Some("Site visit scheduled"));
    assert_eq!(now() - progress.updated_at, Duration::days(1));
}

#[test]
fn test_end_to_end_example() {
    let source = r#"
        User(id = "u1", username = "alice", password = "p", role = Role.ADMIN, name = "Alice", email = "a@x.com")
        CaseEntity(id = "c1", title = "T", status = Status.OPEN, assignedTo = "u1", createdBy = "u1", progressPercentage = 40)
    "#;
    let result = Extractor::default_config().extract_at(source, now());
    let json = serde_json::to_value(&result.bundle).unwrap();

    assert_eq!(json["users"][0]["id"], "u1");
    assert_eq!(json["users"][0]["username"], "alice");
    assert_eq!(json["users"][0]["role"], "ADMIN");
    assert_eq!(json["cases"][0]["id"], "c1");
    assert_eq!(json["cases"][0]["title"], "T");
    assert_eq!(json["cases"][0]["status"], "OPEN");
    assert_eq!(json["cases"][0]["progressPercentage"], 40);
    assert_eq!(json["cases"][0]["documentStatus"], "NOT_UPLOADED");
    assert_eq!(json["cases"][0]["createdAt"], "2023-11-14T22:13:20.000Z");
    assert_eq!(json["progress"], serde_json::json!([]));
}

#[test]
fn test_extraction_uses_current_time() {
    let before = Utc::now();
    let result = Extractor::default_config()
        .extract(r#"CaseEntity(id = "c1", title = "T", createdAt = Date(System.currentTimeMillis() + 60 * 1000))"#);
    let offset = result.bundle.cases[0].created_at - before;
    assert!(offset >= Duration::seconds(59) && offset <= Duration::seconds(61));
}

#[test]
fn test_extract_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(INITIALIZER.as_bytes()).unwrap();

    let result = Extractor::default_config().extract_file(file.path()).unwrap();
    assert_eq!(result.bundle.len(), 5);
}

#[test]
fn test_extract_missing_file_is_io_error() {
    let result = Extractor::default_config().extract_file("/nonexistent/DatabaseInitializer.kt");
    assert!(result.is_err());
}
