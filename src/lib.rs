//! # tidesync - One-way directory mirroring
//!
//! Copies an input tree into an output tree, moves output files that no
//! longer have an input counterpart into a timestamped trash area, and only
//! recopies input files modified since the last completed run.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod errlog;
pub mod executor;
pub mod logging;
pub mod scanner;
pub mod schedule;
pub mod state;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use commands::{run_once, RunReport};
pub use config::{PathsConfig, RunSettings, Settings};
pub use types::{FileIndex, FileRecord, SyncError, SyncPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
