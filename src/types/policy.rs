//! SyncPolicy - How the classifier decides which input files to copy

use serde::{Deserialize, Serialize};

/// Copy policy selected by the `policy` field of the paths file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Copy input files modified after the last recorded run
    #[default]
    Incremental,

    /// Copy unless the output copy is strictly newer than the input file.
    /// The run state is not consulted for classification.
    #[serde(rename = "mtime")]
    ModTime,
}

impl SyncPolicy {
    /// Whether scans should be tagged against the last recorded run
    pub fn uses_run_state(&self) -> bool {
        matches!(self, SyncPolicy::Incremental)
    }
}
