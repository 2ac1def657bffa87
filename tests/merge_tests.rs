//! Tests for merge aggregation
//!
//! These tests verify:
//! - Composite keyed by file stem with parsed contents
//! - Exclusion of package-manager metadata and the output itself
//! - Fail-fast and skip-failures policies

use std::fs;

use jsonkv::oplog::OpLogReader;
use jsonkv::{Config, Engine, ErrorKind, MergePolicy, StoreError};
use serde_json::{json, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_engine(policy: MergePolicy) -> (TempDir, Engine) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .store_dir(temp_dir.path())
        .merge_policy(policy)
        .build();
    let engine = Engine::open(config).unwrap();
    (temp_dir, engine)
}

fn write_raw(temp: &TempDir, name: &str, text: &str) {
    fs::write(temp.path().join(name), text).unwrap();
}

fn read_output(temp: &TempDir) -> Value {
    let text = fs::read_to_string(temp.path().join("merged.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// =============================================================================
// Composite Tests
// =============================================================================

#[test]
fn test_merge_keys_by_stem() {
    let (temp, engine) = setup_temp_engine(MergePolicy::FailFast);
    write_raw(&temp, "scott.json", r#"{"a":1}"#);
    write_raw(&temp, "post.json", r#"{"b":2}"#);
    write_raw(&temp, "package.json", r#"{"name":"db"}"#);
    write_raw(&temp, "package-lock.json", r#"{"lockfileVersion":1}"#);

    let report = engine.merge_data().unwrap();

    let expected = json!({"post": {"b": 2}, "scott": {"a": 1}});
    assert_eq!(Value::Object(report.composite.clone()), expected);
    assert_eq!(report.merged, vec!["post.json", "scott.json"]);
    assert!(report.skipped.is_empty());
    assert_eq!(read_output(&temp), expected);
}

#[test]
fn test_merge_normalizes_source_formatting() {
    let (temp, engine) = setup_temp_engine(MergePolicy::FailFast);
    write_raw(&temp, "odd.json", "  {\n\"x\" :[1,\n 2]   }\n\n");

    engine.merge_data().unwrap();

    assert_eq!(read_output(&temp), json!({"odd": {"x": [1, 2]}}));
}

#[test]
fn test_merge_does_not_include_previous_output() {
    let (temp, engine) = setup_temp_engine(MergePolicy::FailFast);
    write_raw(&temp, "a.json", r#"{"k":"v"}"#);

    engine.merge_data().unwrap();
    let report = engine.merge_data().unwrap();

    assert_eq!(report.merged, vec!["a.json"]);
    assert_eq!(read_output(&temp), json!({"a": {"k": "v"}}));
}

#[test]
fn test_merge_empty_store() {
    let (temp, engine) = setup_temp_engine(MergePolicy::FailFast);

    let report = engine.merge_data().unwrap();

    assert!(report.composite.is_empty());
    assert_eq!(read_output(&temp), json!({}));
}

#[test]
fn test_merge_logs_completion() {
    let (temp, engine) = setup_temp_engine(MergePolicy::FailFast);
    write_raw(&temp, "a.json", "{}");
    write_raw(&temp, "b.json", "{}");

    engine.merge_data().unwrap();

    let entries = OpLogReader::read_all(engine.oplog().path()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "Merged 2 documents into merged.json");
}

// =============================================================================
// Failure Policy Tests
// =============================================================================

#[test]
fn test_fail_fast_aborts_and_writes_nothing() {
    let (temp, engine) = setup_temp_engine(MergePolicy::FailFast);
    write_raw(&temp, "a.json", r#"{"k":"v"}"#);
    write_raw(&temp, "broken.json", "{oops");

    let err = engine.merge_data().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AggregationError);
    match err {
        StoreError::Aggregation { name, source } => {
            assert_eq!(name, "broken.json");
            assert_eq!(source.kind(), ErrorKind::ParseError);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(!temp.path().join("merged.json").exists());
}

#[test]
fn test_skip_failures_reports_partial_result() {
    let (temp, engine) = setup_temp_engine(MergePolicy::SkipFailures);
    write_raw(&temp, "a.json", r#"{"k":"v"}"#);
    write_raw(&temp, "broken.json", "{oops");

    let report = engine.merge_data().unwrap();

    assert_eq!(report.merged, vec!["a.json"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "broken.json");
    assert_eq!(report.skipped[0].kind, ErrorKind::ParseError);
    assert_eq!(read_output(&temp), json!({"a": {"k": "v"}}));

    let entries = OpLogReader::read_all(engine.oplog().path()).unwrap();
    assert_eq!(
        entries.last().unwrap().message,
        "Merged 1 documents into merged.json, skipped 1"
    );
}

#[test]
fn test_custom_exclusions_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .store_dir(temp_dir.path())
        .merge_output("all.json")
        .exclude("tsconfig.json")
        .build();
    let engine = Engine::open(config).unwrap();
    fs::write(temp_dir.path().join("tsconfig.json"), "{}").unwrap();
    fs::write(temp_dir.path().join("user.json"), r#"{"u":1}"#).unwrap();

    let report = engine.merge_data().unwrap();

    assert_eq!(report.output, "all.json");
    assert_eq!(report.merged, vec!["user.json"]);
    assert!(temp_dir.path().join("all.json").exists());
}
