//! Executor module for file operations

pub mod copy;
pub mod trash;

use crate::types::SyncError;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Outcome counters for one phase (archive or copy).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseStats {
    /// Number of files handed to the phase.
    pub total: usize,
    /// Number of files processed successfully.
    pub completed: usize,
    /// Number of files that failed and were logged.
    pub failed: usize,
    /// Bytes written by the phase (copy only).
    pub bytes: u64,
}

/// Events emitted while a phase runs.
#[derive(Debug)]
pub enum ExecutionEvent {
    /// Action execution started.
    ActionStart {
        index: usize,
        total: usize,
        action: &'static str,
        path: PathBuf,
    },
    /// Action execution succeeded.
    ActionSuccess {
        index: usize,
        total: usize,
        action: &'static str,
        path: PathBuf,
        bytes_copied: u64,
    },
    /// Action execution failed but the phase continued.
    ActionError {
        index: usize,
        total: usize,
        action: &'static str,
        path: PathBuf,
        error: String,
    },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent) + Send + Sync + 'a;

pub use copy::{copy_file_atomic, copy_files};
pub use trash::{archive_orphans, move_to_trash, trash_destination, trash_file_name};

fn emit_event(on_event: Option<&ExecutionCallback>, event: ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

fn map_file_error(path: &Path, error: Error) -> SyncError {
    if matches!(error.kind(), ErrorKind::PermissionDenied) {
        SyncError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else if matches!(error.kind(), ErrorKind::StorageFull)
        || matches!(error.raw_os_error(), Some(28 | 122))
    {
        SyncError::DiskFull {
            path: path.to_path_buf(),
        }
    } else {
        SyncError::Io(error)
    }
}
