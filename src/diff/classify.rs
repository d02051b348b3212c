//! Change classification between the input and output scans

use crate::diff::{should_copy, ChangeSet, PendingFile};
use crate::types::{FileIndex, FileRecord, SyncPolicy};
use std::path::Path;

/// Correlate the two scans by relative path and build the change set
///
/// Orphans are output keys absent from the input. The copy set is every input
/// entry the policy selects; everything else is left untouched.
///
/// # Example
/// ```
/// use tidesync::diff::classify;
/// use tidesync::types::{FileRecord, SyncPolicy};
/// use std::path::{Path, PathBuf};
/// use std::time::UNIX_EPOCH;
///
/// let input = vec![FileRecord::new(PathBuf::from("/in/new.txt"), UNIX_EPOCH, 4, None)];
/// let output = vec![FileRecord::new(PathBuf::from("/out/stale.txt"), UNIX_EPOCH, 2, None)];
///
/// let changes = classify(
///     Path::new("/in"),
///     &input,
///     Path::new("/out"),
///     &output,
///     SyncPolicy::Incremental,
/// );
/// assert_eq!(changes.to_copy.len(), 1);
/// assert_eq!(changes.orphans[0].relative_path, PathBuf::from("stale.txt"));
/// ```
pub fn classify(
    input_root: &Path,
    input_records: &[FileRecord],
    output_root: &Path,
    output_records: &[FileRecord],
    policy: SyncPolicy,
) -> ChangeSet {
    let input_by_rel_path = FileIndex::from_records(input_root, input_records);
    let output_by_rel_path = FileIndex::from_records(output_root, output_records);

    classify_indexes(&input_by_rel_path, &output_by_rel_path, policy)
}

/// Classify two prebuilt relative-path indexes
pub fn classify_indexes(input: &FileIndex, output: &FileIndex, policy: SyncPolicy) -> ChangeSet {
    let mut changes = ChangeSet::new();
    changes.duplicates = input.duplicates + output.duplicates;

    for (path, record) in output.iter() {
        if !input.contains(path) {
            changes
                .orphans
                .push(PendingFile::new(path.clone(), record.clone()));
        }
    }

    for (path, record) in input.iter() {
        if should_copy(record, output.get(path), policy) {
            changes
                .to_copy
                .push(PendingFile::new(path.clone(), record.clone()));
        } else {
            changes.unchanged += 1;
        }
    }

    tracing::debug!(
        orphans = changes.orphans.len(),
        to_copy = changes.to_copy.len(),
        unchanged = changes.unchanged,
        "classified scans"
    );

    changes
}
