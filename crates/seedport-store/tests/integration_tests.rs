//! Integration tests for seedport-store
//!
//! These tests run the same upsert scenarios against both store
//! implementations.

use chrono::{TimeZone, Utc};
use seedport_domain::{Document, DocumentStore, DocumentWrite, FieldValue};
use seedport_store::{MemoryStore, SqliteStore, StoreError};

fn case_doc(title: &str, percentage: i64) -> Document {
    let mut doc = Document::new();
    doc.insert("title", FieldValue::String(title.to_string()));
    doc.insert("progressPercentage", FieldValue::Integer(percentage));
    doc.insert(
        "createdAt",
        FieldValue::Timestamp(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()),
    );
    doc
}

fn check_upsert_overwrites<S: DocumentStore<Error = StoreError>>(store: &mut S) {
    store
        .commit("cases", vec![DocumentWrite::keyed("c1", case_doc("First", 10))])
        .unwrap();

    let mut replacement = Document::new();
    replacement.insert("title", FieldValue::String("Second".to_string()));
    store
        .commit("cases", vec![DocumentWrite::keyed("c1", replacement.clone())])
        .unwrap();

    assert_eq!(store.count("cases").unwrap(), 1);
    // Full overwrite: fields absent from the new document are gone.
    assert_eq!(store.get("cases", "c1").unwrap(), Some(replacement));
}

fn check_round_trip_keeps_timestamps<S: DocumentStore<Error = StoreError>>(store: &mut S) {
    let doc = case_doc("T", 40);
    store
        .commit("cases", vec![DocumentWrite::keyed("c1", doc.clone())])
        .unwrap();

    let stored = store.get("cases", "c1").unwrap().unwrap();
    assert_eq!(stored, doc);
    assert!(stored.get("createdAt").and_then(FieldValue::as_timestamp).is_some());
}

fn check_collections_are_separate<S: DocumentStore<Error = StoreError>>(store: &mut S) {
    store
        .commit("users", vec![DocumentWrite::keyed("x", Document::new())])
        .unwrap();
    store
        .commit("cases", vec![DocumentWrite::keyed("x", case_doc("T", 0))])
        .unwrap();

    assert_eq!(store.count("users").unwrap(), 1);
    assert_eq!(store.count("cases").unwrap(), 1);
    assert_eq!(store.get("progress", "x").unwrap(), None);
}

fn check_ids_in_input_order<S: DocumentStore<Error = StoreError>>(store: &mut S) {
    let ids = store
        .commit(
            "users",
            vec![
                DocumentWrite::keyed("b", Document::new()),
                DocumentWrite::generated(Document::new()),
                DocumentWrite::keyed("a", Document::new()),
            ],
        )
        .unwrap();

    assert_eq!(ids[0], "b");
    assert_eq!(ids[2], "a");
    assert_eq!(store.count("users").unwrap(), 3);

    let listed = store.list_ids("users").unwrap();
    let mut sorted = listed.clone();
    sorted.sort();
    assert_eq!(listed, sorted);
}

#[test]
fn test_sqlite_upsert_overwrites() {
    check_upsert_overwrites(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn test_memory_upsert_overwrites() {
    check_upsert_overwrites(&mut MemoryStore::new());
}

#[test]
fn test_sqlite_round_trip_keeps_timestamps() {
    check_round_trip_keeps_timestamps(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn test_memory_round_trip_keeps_timestamps() {
    check_round_trip_keeps_timestamps(&mut MemoryStore::new());
}

#[test]
fn test_sqlite_collections_are_separate() {
    check_collections_are_separate(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn test_memory_collections_are_separate() {
    check_collections_are_separate(&mut MemoryStore::new());
}

#[test]
fn test_sqlite_ids_in_input_order() {
    check_ids_in_input_order(&mut SqliteStore::open_in_memory().unwrap());
}

#[test]
fn test_memory_ids_in_input_order() {
    check_ids_in_input_order(&mut MemoryStore::new());
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.sqlite3");

    {
        let mut store = SqliteStore::new(&path).unwrap();
        store
            .commit("cases", vec![DocumentWrite::keyed("c1", case_doc("T", 40))])
            .unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    assert_eq!(store.list_ids("cases").unwrap(), vec!["c1".to_string()]);
}
