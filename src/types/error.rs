//! Error types for tidesync

use std::path::PathBuf;
use thiserror::Error;

/// Error types for tidesync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Paths file could not be read
    #[error("Failed reading config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Paths file is not valid JSON for the expected shape
    #[error("Failed parsing config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A scan root is missing or inaccessible
    #[error("Unable to gather files from {path}: {source}")]
    ScanRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A scan root exists but is not a directory
    #[error("Scan root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Output or trash root could not be created
    #[error("Failed creating directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Error log could not be opened for appending
    #[error("Failed opening error log {path}: {source}")]
    ErrorLogOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Run state could not be written at the end of a run
    #[error("Failed updating run state {path}: {source}")]
    StatePersist {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Permission denied for specific path
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Disk full error
    #[error("Disk full while writing {path}")]
    DiskFull { path: PathBuf },

    /// Scheduler or runtime failure
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl SyncError {
    /// Check if this error comes from configuration or CLI validation
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::Config(_) | SyncError::ConfigRead { .. } | SyncError::ConfigParse { .. }
        )
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        match self {
            SyncError::PermissionDenied { .. } => true,
            SyncError::Io(e)
            | SyncError::ConfigRead { source: e, .. }
            | SyncError::ScanRoot { source: e, .. }
            | SyncError::CreateDir { source: e, .. }
            | SyncError::ErrorLogOpen { source: e, .. }
            | SyncError::StatePersist { source: e, .. } => {
                e.kind() == std::io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }

    /// Check if this error is related to disk space
    pub fn is_disk_space_error(&self) -> bool {
        matches!(self, SyncError::DiskFull { .. })
    }
}
