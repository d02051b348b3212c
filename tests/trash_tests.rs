//! Tests for relocating orphaned output files into the trash area

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use tidesync::diff::PendingFile;
use tidesync::errlog::ErrorLog;
use tidesync::executor::{
    archive_orphans, move_to_trash, trash_destination, ExecutionCallback, ExecutionEvent,
};
use tidesync::FileRecord;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;
use tempfile::TempDir;

fn run_start() -> DateTime<Local> {
    let naive = NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|d| d.and_hms_opt(13, 49, 0))
        .expect("valid date");
    Local
        .from_local_datetime(&naive)
        .earliest()
        .expect("representable local time")
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write file");
}

fn orphan(root: &Path, relative: &str) -> PendingFile {
    PendingFile::new(
        PathBuf::from(relative),
        FileRecord::new(root.join(relative), SystemTime::now(), 0, None),
    )
}

#[test]
fn test_move_to_trash_creates_directories() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let source = temp_dir.path().join("old.txt");
    write_file(&source, b"old content");
    let destination = temp_dir.path().join("trash/deep/old.20261016134900.txt");

    move_to_trash(&source, &destination).expect("move should succeed");

    assert!(!source.exists());
    assert_eq!(fs::read(&destination).expect("read trashed"), b"old content");
}

#[test]
fn test_move_to_trash_missing_source_fails() {
    let temp_dir = TempDir::new().expect("create temp dir");

    let result = move_to_trash(
        &temp_dir.path().join("gone.txt"),
        &temp_dir.path().join("trash/gone.txt"),
    );

    assert!(result.is_err());
}

#[test]
fn test_archive_orphans_preserves_content_and_layout() {
    let output = TempDir::new().expect("create output");
    let root = output.path();
    write_file(&root.join("a.txt"), b"top level");
    write_file(&root.join("docs/report.pdf"), b"%PDF");

    let orphans = vec![orphan(root, "a.txt"), orphan(root, "docs/report.pdf")];
    let mut log = ErrorLog::new(Vec::new());

    let stats = archive_orphans(&orphans, root, &run_start(), &mut log, None);

    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.bytes, 0);
    assert!(!root.join("a.txt").exists());
    assert!(!root.join("docs/report.pdf").exists());
    assert_eq!(
        fs::read(root.join("trash/a.20261016134900.txt")).expect("read trashed a"),
        b"top level"
    );
    assert_eq!(
        fs::read(root.join("trash/docs/report.20261016134900.pdf")).expect("read trashed report"),
        b"%PDF"
    );
    assert_eq!(log.recorded(), 0);
}

#[test]
fn test_archive_orphans_logs_failure_and_continues() {
    let output = TempDir::new().expect("create output");
    let root = output.path();
    write_file(&root.join("keep/second.txt"), b"second");

    let orphans = vec![orphan(root, "vanished.log"), orphan(root, "keep/second.txt")];
    let mut log = ErrorLog::new(Vec::new());

    let stats = archive_orphans(&orphans, root, &run_start(), &mut log, None);

    assert_eq!(stats.completed, 1);
    assert_eq!(stats.failed, 1);
    assert!(root.join("trash/keep/second.20261016134900.txt").exists());

    assert_eq!(log.recorded(), 1);
    let text = String::from_utf8(log.into_inner()).expect("utf8 log");
    assert!(text.contains("Failed moving file to trash: vanished.log"));
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_archive_orphans_emits_events_in_order() {
    let output = TempDir::new().expect("create output");
    let root = output.path();
    write_file(&root.join("one.txt"), b"1");

    let orphans = vec![orphan(root, "one.txt"), orphan(root, "missing.txt")];
    let mut log = ErrorLog::new(Vec::new());
    let seen = Mutex::new(Vec::new());
    let record_event = |event: &ExecutionEvent| {
        let tag = match event {
            ExecutionEvent::ActionStart { index, .. } => format!("start{}", index),
            ExecutionEvent::ActionSuccess { index, .. } => format!("ok{}", index),
            ExecutionEvent::ActionError { index, .. } => format!("err{}", index),
        };
        seen.lock().expect("lock events").push(tag);
    };
    let on_event: &ExecutionCallback = &record_event;

    archive_orphans(&orphans, root, &run_start(), &mut log, Some(on_event));

    assert_eq!(
        seen.into_inner().expect("events"),
        vec!["start1", "ok1", "start2", "err2"]
    );
}

#[test]
fn test_trash_destination_matches_archive_location() {
    let output = TempDir::new().expect("create output");
    let root = output.path();
    write_file(&root.join("x/.env"), b"SECRET=1");

    let orphans = vec![orphan(root, "x/.env")];
    let mut log = ErrorLog::new(Vec::new());
    archive_orphans(&orphans, root, &run_start(), &mut log, None);

    let expected = trash_destination(root, Path::new("x/.env"), &run_start());
    assert_eq!(expected, root.join("trash/x/.20261016134900.env"));
    assert!(expected.exists());
}
