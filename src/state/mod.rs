//! Run state persistence
//!
//! The run state is the start time of the last completed run, stored as a
//! single RFC 3339 string. A missing or unparsable file means "no prior run".

use crate::types::SyncError;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-backed store for the last run timestamp
#[derive(Debug, Clone)]
pub struct RunStateStore {
    path: PathBuf,
}

impl RunStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last run timestamp
    ///
    /// Never fails: an unreadable or malformed file is treated as no prior run.
    pub fn load(&self) -> Option<DateTime<Utc>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), "no run state loaded: {}", e);
                return None;
            }
        };

        match DateTime::parse_from_rfc3339(content.trim()) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    "ignoring unparsable run state, treating every file as new: {}",
                    e
                );
                None
            }
        }
    }

    /// Persist `run_start` as the last completed run
    ///
    /// Writes a sibling temp file and renames it over the state file.
    pub fn save(&self, run_start: &DateTime<Local>) -> Result<(), SyncError> {
        let value = run_start.to_rfc3339_opts(SecondsFormat::Nanos, false);
        let tmp_path = self.tmp_path()?;

        let result = fs::write(&tmp_path, value.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path));

        result.map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            SyncError::StatePersist {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn tmp_path(&self) -> Result<PathBuf, SyncError> {
        let file_name = self.path.file_name().ok_or_else(|| SyncError::StatePersist {
            path: self.path.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "run state path has no file name",
            ),
        })?;
        Ok(self
            .path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}
