//! Tests for correlating input and output scans into a change set

use chrono::{DateTime, TimeZone, Utc};
use tidesync::diff::{classify, classify_indexes};
use tidesync::types::{FileIndex, FileRecord, SyncPolicy};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

fn last_run() -> DateTime<Utc> {
    Utc.timestamp_opt(10_000, 0).single().expect("valid timestamp")
}

fn input(rel: &str, mtime_secs: u64) -> FileRecord {
    let last_run = last_run();
    FileRecord::new(
        Path::new("/in").join(rel),
        UNIX_EPOCH + Duration::from_secs(mtime_secs),
        mtime_secs,
        Some(&last_run),
    )
}

fn output(rel: &str, mtime_secs: u64) -> FileRecord {
    FileRecord::new(
        Path::new("/out").join(rel),
        UNIX_EPOCH + Duration::from_secs(mtime_secs),
        1,
        None,
    )
}

fn rel_paths(files: &[tidesync::diff::PendingFile]) -> Vec<PathBuf> {
    files.iter().map(|f| f.relative_path.clone()).collect()
}

#[test]
fn test_empty_scans_produce_empty_change_set() {
    let changes = classify(
        Path::new("/in"),
        &[],
        Path::new("/out"),
        &[],
        SyncPolicy::Incremental,
    );

    assert!(changes.is_empty());
    assert_eq!(changes.unchanged, 0);
}

#[test]
fn test_orphans_are_output_only_paths() {
    let inputs = vec![input("keep.txt", 5_000)];
    let outputs = vec![
        output("keep.txt", 5_000),
        output("docs/gone.md", 5_000),
        output("stale.txt", 5_000),
    ];

    let changes = classify(
        Path::new("/in"),
        &inputs,
        Path::new("/out"),
        &outputs,
        SyncPolicy::Incremental,
    );

    assert_eq!(
        rel_paths(&changes.orphans),
        vec![PathBuf::from("docs/gone.md"), PathBuf::from("stale.txt")]
    );
    assert_eq!(
        changes.orphans[0].record.location,
        PathBuf::from("/out/docs/gone.md")
    );
}

#[test]
fn test_incremental_copies_only_files_newer_than_last_run() {
    let inputs = vec![
        input("old.txt", 9_000),
        input("boundary.txt", 10_000),
        input("fresh.txt", 10_001),
        input("missing_old.txt", 1_000),
    ];
    let outputs = vec![output("old.txt", 9_500)];

    let changes = classify(
        Path::new("/in"),
        &inputs,
        Path::new("/out"),
        &outputs,
        SyncPolicy::Incremental,
    );

    // Presence in the output does not matter, only the run boundary does.
    assert_eq!(rel_paths(&changes.to_copy), vec![PathBuf::from("fresh.txt")]);
    assert_eq!(changes.unchanged, 3);
    assert!(changes.orphans.is_empty());
}

#[test]
fn test_mtime_policy_copies_unless_output_is_newer() {
    let inputs = vec![
        input("a.txt", 1_000),
        input("b.txt", 2_000),
        input("c.txt", 3_000),
    ];
    let outputs = vec![output("a.txt", 1_500), output("b.txt", 2_000)];

    let changes = classify(
        Path::new("/in"),
        &inputs,
        Path::new("/out"),
        &outputs,
        SyncPolicy::ModTime,
    );

    assert_eq!(
        rel_paths(&changes.to_copy),
        vec![PathBuf::from("b.txt"), PathBuf::from("c.txt")]
    );
    assert_eq!(changes.unchanged, 1);
}

#[test]
fn test_to_copy_is_sorted_by_relative_path() {
    let inputs = vec![
        input("z.txt", 20_000),
        input("a/b.txt", 20_000),
        input("m.txt", 20_000),
    ];

    let changes = classify(
        Path::new("/in"),
        &inputs,
        Path::new("/out"),
        &[],
        SyncPolicy::Incremental,
    );

    assert_eq!(
        rel_paths(&changes.to_copy),
        vec![
            PathBuf::from("a/b.txt"),
            PathBuf::from("m.txt"),
            PathBuf::from("z.txt")
        ]
    );
    assert_eq!(changes.bytes_to_copy(), 60_000);
}

#[test]
fn test_duplicates_are_counted() {
    let inputs = vec![input("same.txt", 20_000), input("same.txt", 20_001)];

    let changes = classify(
        Path::new("/in"),
        &inputs,
        Path::new("/out"),
        &[],
        SyncPolicy::Incremental,
    );

    assert_eq!(changes.duplicates, 1);
    assert_eq!(changes.to_copy.len(), 1);
    assert_eq!(
        changes.to_copy[0].record.mod_time,
        UNIX_EPOCH + Duration::from_secs(20_001)
    );
}

#[test]
fn test_classify_indexes_matches_classify() {
    let inputs = vec![input("x.txt", 20_000)];
    let outputs = vec![output("y.txt", 1)];

    let input_index = FileIndex::from_records(Path::new("/in"), &inputs);
    let output_index = FileIndex::from_records(Path::new("/out"), &outputs);

    let from_indexes = classify_indexes(&input_index, &output_index, SyncPolicy::Incremental);
    let direct = classify(
        Path::new("/in"),
        &inputs,
        Path::new("/out"),
        &outputs,
        SyncPolicy::Incremental,
    );

    assert_eq!(from_indexes, direct);
}
