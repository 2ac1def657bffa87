//! Tests for the operation log
//!
//! These tests verify:
//! - Line format and file creation
//! - Append order and non-decreasing timestamps
//! - Continuing an existing log across reopen
//! - Truncation
//! - Reader tolerance of malformed lines

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use jsonkv::oplog::{LogEntry, OpLog, OpLogReader};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("log.txt");
    (temp_dir, log_path)
}

fn read_entries(path: &PathBuf) -> Vec<LogEntry> {
    OpLogReader::read_all(path).unwrap()
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_open_creates_file() {
    let (_temp, log_path) = setup_temp_log();
    assert!(!log_path.exists());

    let _log = OpLog::open(&log_path).unwrap();

    assert!(log_path.exists());
}

#[test]
fn test_append_line_format() {
    let (_temp, log_path) = setup_temp_log();
    let log = OpLog::open(&log_path).unwrap();

    let entry = log.append("user.json successfully deleted");

    let contents = fs::read_to_string(&log_path).unwrap();
    assert_eq!(
        contents,
        format!("user.json successfully deleted {}\n", entry.timestamp)
    );
}

#[test]
fn test_appends_keep_call_order() {
    let (_temp, log_path) = setup_temp_log();
    let log = OpLog::open(&log_path).unwrap();

    for i in 0..50 {
        log.append(format!("op {}", i));
    }

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 50);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.message, format!("op {}", i));
    }
    for pair in entries.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[test]
fn test_concurrent_appends_do_not_interleave() {
    let (_temp, log_path) = setup_temp_log();
    let log = Arc::new(OpLog::open(&log_path).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..25 {
                    log.append(format!("thread {} op {}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 100);
    assert!(entries.iter().all(|e| e.message.starts_with("thread ")));
    for pair in entries.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_reopen_continues_existing_log() {
    let (_temp, log_path) = setup_temp_log();

    {
        let log = OpLog::open(&log_path).unwrap();
        log.append("first");
        log.sync().unwrap();
    }

    let log = OpLog::open(&log_path).unwrap();
    log.append("second");

    let entries = read_entries(&log_path);
    let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);
}

#[test]
fn test_reopen_never_goes_back_in_time() {
    let (_temp, log_path) = setup_temp_log();
    let future = u64::MAX / 2;
    fs::write(&log_path, format!("from the future {}\n", future)).unwrap();

    let log = OpLog::open(&log_path).unwrap();
    let entry = log.append("now");

    assert_eq!(entry.timestamp, future);
}

#[test]
fn test_reopen_finds_last_entry_in_large_log() {
    let (_temp, log_path) = setup_temp_log();
    let mut contents = String::new();
    for i in 0..2_000u64 {
        contents.push_str(&format!("entry {} {}\n", i, 1_000 + i));
    }
    let long_message = "x".repeat(10_000);
    contents.push_str(&format!("{} {}\n", long_message, u64::MAX / 4));
    contents.push_str("trailing garbage without timestamp\n");
    fs::write(&log_path, contents).unwrap();

    let last = OpLogReader::last_entry(&log_path).unwrap().unwrap();
    assert_eq!(last.message, long_message);
    assert_eq!(last.timestamp, u64::MAX / 4);

    let log = OpLog::open(&log_path).unwrap();
    assert_eq!(log.append("next").timestamp, u64::MAX / 4);
}

#[test]
fn test_last_entry_of_empty_log() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, "").unwrap();

    assert!(OpLogReader::last_entry(&log_path).unwrap().is_none());
}

#[test]
fn test_truncate_empties_log() {
    let (_temp, log_path) = setup_temp_log();
    let log = OpLog::open(&log_path).unwrap();
    log.append("old entry");

    log.truncate().unwrap();
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "");

    log.append("fresh entry");
    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "fresh entry");
}

// =============================================================================
// Reader Tests
// =============================================================================

#[test]
fn test_reader_skips_malformed_lines() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, "good one 10\nno timestamp\n\nalso good 11\n").unwrap();

    let entries = read_entries(&log_path);

    assert_eq!(
        entries,
        vec![LogEntry::new("good one", 10), LogEntry::new("also good", 11)]
    );
}

#[test]
fn test_reader_missing_file_is_error() {
    let (_temp, log_path) = setup_temp_log();
    assert!(OpLogReader::open(&log_path).is_err());
}
