//! Per-file copy decision

use crate::types::{FileRecord, SyncPolicy};

/// Decide whether an input file must be written to the output tree
///
/// * `Incremental`: copy when the scan tagged the input as new.
/// * `ModTime`: copy unless the output counterpart exists and is strictly
///   newer than the input.
pub fn should_copy(input: &FileRecord, output: Option<&FileRecord>, policy: SyncPolicy) -> bool {
    match policy {
        SyncPolicy::Incremental => input.is_new,
        SyncPolicy::ModTime => match output {
            None => true,
            Some(output) => output.mod_time <= input.mod_time,
        },
    }
}
