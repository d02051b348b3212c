//! FileIndex - Relative-path correlation index for one scanned tree

use super::FileRecord;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Records of one tree keyed by their path relative to the tree root
#[derive(Debug, Clone, PartialEq)]
pub struct FileIndex {
    /// Map: relative_path → FileRecord
    entries: BTreeMap<PathBuf, FileRecord>,

    /// Records that replaced an earlier record under the same key
    pub duplicates: usize,

    /// Records skipped because they do not live under `root_path`
    pub outside_root: usize,

    /// Aggregate size of indexed records
    pub total_size: u64,

    pub root_path: PathBuf,
}

impl FileIndex {
    /// Create a new empty index
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            entries: BTreeMap::new(),
            duplicates: 0,
            outside_root: 0,
            total_size: 0,
            root_path,
        }
    }

    /// Build an index from a scan result
    ///
    /// Duplicate relative paths resolve last-write-wins: the record that comes
    /// later in `records` replaces the earlier one and `duplicates` is bumped.
    pub fn from_records(root_path: &Path, records: &[FileRecord]) -> Self {
        let mut index = Self::new(root_path.to_path_buf());

        for record in records {
            match record.relative_to(root_path) {
                Some(relative_path) => {
                    if let Some(replaced) = index.insert(relative_path, record.clone()) {
                        tracing::warn!(
                            path = %replaced.location.display(),
                            "duplicate relative path in scan, keeping the later record"
                        );
                    }
                }
                None => {
                    tracing::warn!(
                        path = %record.location.display(),
                        root = %root_path.display(),
                        "record is not under its scan root, skipping"
                    );
                    index.outside_root += 1;
                }
            }
        }

        index
    }

    /// Insert a record, returning the one it replaced
    ///
    /// Updates aggregate statistics. A replaced record counts as a duplicate.
    pub fn insert(&mut self, path: PathBuf, record: FileRecord) -> Option<FileRecord> {
        self.total_size += record.size;
        let replaced = self.entries.insert(path, record);

        if let Some(old) = &replaced {
            self.total_size = self.total_size.saturating_sub(old.size);
            self.duplicates += 1;
        }

        replaced
    }

    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over (relative path, record) pairs in path order
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &FileRecord)> {
        self.entries.iter()
    }

    /// Iterator over just the relative paths
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }
}
