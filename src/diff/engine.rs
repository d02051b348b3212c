//! Change set types produced by the classifier

use crate::types::FileRecord;
use std::path::PathBuf;

/// A record selected for an action, with its tree-relative path
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFile {
    /// Path relative to the tree the record was scanned from
    pub relative_path: PathBuf,
    pub record: FileRecord,
}

impl PendingFile {
    pub fn new(relative_path: PathBuf, record: FileRecord) -> Self {
        Self {
            relative_path,
            record,
        }
    }
}

/// Orphans to archive and input files to copy, both in relative-path order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Output files with no input counterpart
    pub orphans: Vec<PendingFile>,

    /// Input files to (re)write into the output tree
    pub to_copy: Vec<PendingFile>,

    /// Input files left untouched this run
    pub unchanged: usize,

    /// Relative-path collisions collapsed while indexing both scans
    pub duplicates: usize,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes the copy phase will read
    pub fn bytes_to_copy(&self) -> u64 {
        self.to_copy.iter().map(|f| f.record.size).sum()
    }

    /// Whether the run has nothing to archive or copy
    pub fn is_empty(&self) -> bool {
        self.orphans.is_empty() && self.to_copy.is_empty()
    }
}
