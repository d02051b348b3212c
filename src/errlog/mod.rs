//! Append-only log of per-file failures
//!
//! Each line is `YYYY/MM/DD hh:mm:ss <description>: <file name>`.

use crate::types::SyncError;
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Recoverable per-file failure recorded in the error log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An orphan could not be relocated into the trash area
    TrashMove,
    /// An input file could not be copied into the output tree
    Copy,
}

impl FailureKind {
    pub fn description(&self) -> &'static str {
        match self {
            FailureKind::TrashMove => "Failed moving file to trash",
            FailureKind::Copy => "Failed copying file",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Timestamp-prefixed failure log
pub struct ErrorLog<W: Write = File> {
    writer: W,
    recorded: usize,
}

impl ErrorLog<File> {
    /// Open (or create) the log at `path` in append mode
    pub fn open(path: &Path) -> Result<Self, SyncError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SyncError::ErrorLogOpen {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ErrorLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            recorded: 0,
        }
    }

    /// Record a failure for the file called `name`, stamped with the current time
    pub fn record(&mut self, kind: FailureKind, name: &str) {
        self.record_at(&Local::now(), kind, name);
    }

    /// Record a failure with an explicit timestamp
    ///
    /// A failure to write the line is reported on the diagnostic stream only.
    pub fn record_at(&mut self, at: &DateTime<Local>, kind: FailureKind, name: &str) {
        self.recorded += 1;

        let line = format!("{} {}: {}\n", at.format("%Y/%m/%d %H:%M:%S"), kind, name);
        let written = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.flush());

        if let Err(e) = written {
            tracing::warn!("failed writing error log entry for {}: {}", name, e);
        }
    }

    /// Number of failures recorded through this handle
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
