//! Configuration management
//!
//! Two layers: command-line [`Cli`] arguments validated into [`Settings`], and
//! the JSON paths file ([`PathsConfig`]) re-read at the start of every run.

use crate::types::{SyncError, SyncPolicy};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default scheduling interval between runs (seconds)
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tidesync",
    version,
    about = "Mirror an input directory into an output directory, keeping removed files in a timestamped trash"
)]
pub struct Cli {
    /// JSON file with inputPath and outputPath
    #[arg(short, long, value_name = "FILE", default_value = "./path.json")]
    pub config: PathBuf,

    /// File holding the start time of the last completed run
    #[arg(short, long, value_name = "FILE", default_value = "./time.txt")]
    pub state_file: PathBuf,

    /// Append-only log of per-file failures
    #[arg(short, long, value_name = "FILE", default_value = "./file_error.log")]
    pub error_log: PathBuf,

    /// Seconds between scheduled runs
    #[arg(short, long, value_name = "SECONDS", default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,

    /// Run once and exit instead of looping
    #[arg(long)]
    pub once: bool,

    /// Hide progress bars
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resources one run works with
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Paths file, re-read at the start of each run
    pub config_file: PathBuf,

    /// Run state file
    pub state_file: PathBuf,

    /// Error log file
    pub error_log: PathBuf,

    /// Draw progress bars
    pub show_progress: bool,
}

impl RunSettings {
    /// Settings rooted at `dir`, using the default file names
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            config_file: dir.join("path.json"),
            state_file: dir.join("time.txt"),
            error_log: dir.join("file_error.log"),
            show_progress: false,
        }
    }
}

/// Validated process configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub run: RunSettings,

    /// Interval between scheduled runs
    pub interval: Duration,

    /// Run once and exit
    pub once: bool,

    /// Debug-level diagnostics
    pub verbose: bool,
}

impl TryFrom<Cli> for Settings {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.interval == 0 {
            return Err(SyncError::Config(
                "Interval must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            run: RunSettings {
                config_file: cli.config,
                state_file: cli.state_file,
                error_log: cli.error_log,
                show_progress: !cli.quiet,
            },
            interval: Duration::from_secs(cli.interval),
            once: cli.once,
            verbose: cli.verbose,
        })
    }
}

/// Input and output roots for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PathsConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    #[serde(default)]
    pub policy: SyncPolicy,
}

impl PathsConfig {
    /// Read and validate the paths file
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let data = fs::read_to_string(path).map_err(|source| SyncError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: PathsConfig =
            serde_json::from_str(&data).map_err(|source| SyncError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(SyncError::Config("inputPath must not be empty".to_string()));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(SyncError::Config("outputPath must not be empty".to_string()));
        }

        if self.input_path == self.output_path {
            return Err(SyncError::Config(
                "inputPath and outputPath cannot be the same".to_string(),
            ));
        }

        // Component-wise, so `/data/in` does not contain `/data/inbox`.
        if self.input_path.starts_with(&self.output_path) {
            return Err(SyncError::Config(
                "inputPath cannot be inside outputPath".to_string(),
            ));
        }

        if self.output_path.starts_with(&self.input_path) {
            return Err(SyncError::Config(
                "outputPath cannot be inside inputPath".to_string(),
            ));
        }

        Ok(())
    }

    /// Root of the trash area inside the output tree
    pub fn trash_root(&self) -> PathBuf {
        self.output_path.join(crate::scanner::TRASH_DIR_NAME)
    }
}
