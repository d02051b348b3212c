//! Sequential directory walker

use crate::types::{FileRecord, SyncError};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the reserved trash directory, excluded from every scan
pub const TRASH_DIR_NAME: &str = "trash";

/// Callback for reporting scan progress
///
/// Arguments:
/// - `files_scanned`: Total number of files scanned so far
/// - `bytes_scanned`: Total bytes scanned so far
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Scan a directory tree and collect its regular files
///
/// Every directory below `root_path` whose base name is `trash` is skipped
/// together with its contents. The root itself is always walked.
///
/// # Arguments
/// * `root_path` - The root directory to scan
/// * `last_run` - Start of the last completed run; files modified strictly
///   after it (or every file, when `None`) are tagged `is_new`
/// * `on_progress` - Optional callback for progress updates (files_scanned, bytes_scanned)
///
/// # Errors
/// * Missing or inaccessible root returns `SyncError::ScanRoot`
/// * A root that is not a directory returns `SyncError::NotADirectory`
/// * Entries that fail below the root are logged and skipped
pub fn scan_tree(
    root_path: &Path,
    last_run: Option<&DateTime<Utc>>,
    on_progress: Option<&ProgressCallback>,
) -> Result<Vec<FileRecord>, SyncError> {
    let root_metadata = fs::metadata(root_path).map_err(|source| SyncError::ScanRoot {
        path: root_path.to_path_buf(),
        source,
    })?;
    if !root_metadata.is_dir() {
        return Err(SyncError::NotADirectory {
            path: root_path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    let mut scanned_count: u64 = 0;
    let mut scanned_bytes: u64 = 0;

    // Every entry counts: no hidden-file or ignore-file filtering.
    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| !is_trash_dir(entry))
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("failed accessing a path during scan: {}", e);
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        if file_type.is_dir() {
            continue;
        }

        if !file_type.is_file() {
            debug!(path = %entry.path().display(), "skipping non-regular file");
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!("failed accessing the path {}: {}", entry.path().display(), e);
                continue;
            }
        };

        let mod_time = match metadata.modified() {
            Ok(t) => t,
            Err(e) => {
                warn!(
                    "failed reading modification time of {}: {}",
                    entry.path().display(),
                    e
                );
                continue;
            }
        };

        let record = FileRecord::new(entry.into_path(), mod_time, metadata.len(), last_run);

        scanned_count += 1;
        scanned_bytes += record.size;
        records.push(record);

        if let Some(callback) = on_progress {
            callback(scanned_count, scanned_bytes);
        }
    }

    debug!(
        root = %root_path.display(),
        files = scanned_count,
        bytes = scanned_bytes,
        "scan complete"
    );

    Ok(records)
}

fn is_trash_dir(entry: &ignore::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|ft| ft.is_dir())
        && entry.file_name() == TRASH_DIR_NAME
}
