//! FileRecord - A single regular file discovered by a tree scan

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents one regular file found under a scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base file name
    pub name: String,

    /// Path of the file, rooted at the scanned root as it was given
    pub location: PathBuf,

    /// Last modification time
    pub mod_time: SystemTime,

    /// File size in bytes
    pub size: u64,

    /// Modified after the last recorded run (or no run recorded).
    /// Only meaningful for input-tree scans.
    pub is_new: bool,
}

impl FileRecord {
    /// Create a record, tagging it against the last recorded run
    pub fn new(
        location: PathBuf,
        mod_time: SystemTime,
        size: u64,
        last_run: Option<&DateTime<Utc>>,
    ) -> Self {
        let name = location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            is_new: is_modified_after(mod_time, last_run),
            location,
            mod_time,
            size,
        }
    }

    /// Path of this record relative to `root`, if it lives under it
    pub fn relative_to(&self, root: &Path) -> Option<PathBuf> {
        self.location
            .strip_prefix(root)
            .ok()
            .filter(|rel| !rel.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

/// `true` when there is no prior run or `mod_time` is strictly after it
pub fn is_modified_after(mod_time: SystemTime, last_run: Option<&DateTime<Utc>>) -> bool {
    match last_run {
        None => true,
        Some(last_run) => DateTime::<Utc>::from(mod_time) > *last_run,
    }
}
