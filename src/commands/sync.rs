//! Main sync command: one complete mirroring run

use crate::config::{PathsConfig, RunSettings};
use crate::diff::classify;
use crate::errlog::ErrorLog;
use crate::executor::{archive_orphans, copy_files, ExecutionCallback, ExecutionEvent};
use crate::scanner::{scan_tree, ProgressCallback};
use crate::state::RunStateStore;
use crate::types::{FileRecord, SyncError};
use crate::ui::ProgressReporter;
use chrono::{DateTime, Local, Utc};
use indicatif::HumanBytes;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Statistics of one completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Regular files found under the input root
    pub input_files: usize,
    /// Regular files found under the output root (trash excluded)
    pub output_files: usize,
    /// Output files with no input counterpart
    pub orphans: usize,
    /// Orphans relocated into the trash area
    pub trashed: usize,
    /// Orphans that could not be relocated
    pub trash_failures: usize,
    /// Input files selected for copying
    pub to_copy: usize,
    /// Input files copied
    pub copied: usize,
    /// Input files that could not be copied
    pub copy_failures: usize,
    /// Bytes written into the output tree
    pub bytes_copied: u64,
    /// Relative-path collisions collapsed while indexing
    pub duplicates: usize,
    /// Whether a previous run state was found
    pub had_prior_run: bool,
}

impl RunReport {
    /// Number of per-file failures written to the error log
    pub fn failures(&self) -> usize {
        self.trash_failures + self.copy_failures
    }
}

/// Run the mirroring pipeline once
///
/// `run_start` is captured by the caller before anything is scanned and is
/// what gets persisted as the new run state, so files modified during the run
/// are picked up by the next one.
///
/// Per-file failures are recorded in the error log and reflected in the
/// report; every returned error is fatal.
pub fn run_once(
    settings: &RunSettings,
    run_start: DateTime<Local>,
) -> Result<RunReport, SyncError> {
    let paths = PathsConfig::load(&settings.config_file)?;
    let mut error_log = ErrorLog::open(&settings.error_log)?;

    ensure_dir(&paths.output_path)?;
    ensure_dir(&paths.trash_root())?;

    let store = RunStateStore::new(&settings.state_file);
    let last_run = store.load();
    let scan_since: Option<&DateTime<Utc>> = if paths.policy.uses_run_state() {
        last_run.as_ref()
    } else {
        None
    };

    info!(
        input = %paths.input_path.display(),
        output = %paths.output_path.display(),
        policy = ?paths.policy,
        last_run = ?last_run,
        "starting run"
    );

    let reporter = Arc::new(Mutex::new(ProgressReporter::new(settings.show_progress)));

    let input_records = scan_with_progress(&reporter, "input", &paths.input_path, scan_since)?;
    let output_records = scan_with_progress(&reporter, "output", &paths.output_path, None)?;
    if let Ok(progress) = reporter.lock() {
        progress.end_scans(format!(
            "Scanned {} input and {} output files",
            input_records.len(),
            output_records.len()
        ));
    }

    let changes = classify(
        &paths.input_path,
        &input_records,
        &paths.output_path,
        &output_records,
        paths.policy,
    );
    info!(
        orphans = changes.orphans.len(),
        to_copy = changes.to_copy.len(),
        unchanged = changes.unchanged,
        bytes = changes.bytes_to_copy(),
        "classified changes"
    );

    if let Ok(mut progress) = reporter.lock() {
        progress.start_transfer((changes.orphans.len() + changes.to_copy.len()) as u64);
    }
    let progress_cb = {
        let reporter = Arc::clone(&reporter);
        move |event: &ExecutionEvent| match event {
            ExecutionEvent::ActionStart { action, path, .. } => {
                if let Ok(progress) = reporter.lock() {
                    progress.set_current_file(action, path);
                }
            }
            ExecutionEvent::ActionSuccess { bytes_copied, .. } => {
                if let Ok(mut progress) = reporter.lock() {
                    progress.complete_action(*bytes_copied);
                }
            }
            ExecutionEvent::ActionError {
                action,
                path,
                error,
                ..
            } => {
                if let Ok(progress) = reporter.lock() {
                    progress.action_error(action, path, error);
                }
            }
        }
    };
    let on_event: &ExecutionCallback = &progress_cb;

    let trash_stats = archive_orphans(
        &changes.orphans,
        &paths.output_path,
        &run_start,
        &mut error_log,
        Some(on_event),
    );
    let copy_stats = copy_files(
        &changes.to_copy,
        &paths.output_path,
        &mut error_log,
        Some(on_event),
    );

    if let Ok(progress) = reporter.lock() {
        progress.finish_transfer(
            trash_stats.completed,
            copy_stats.completed,
            trash_stats.failed + copy_stats.failed,
        );
    }

    store.save(&run_start)?;

    let report = RunReport {
        input_files: input_records.len(),
        output_files: output_records.len(),
        orphans: changes.orphans.len(),
        trashed: trash_stats.completed,
        trash_failures: trash_stats.failed,
        to_copy: changes.to_copy.len(),
        copied: copy_stats.completed,
        copy_failures: copy_stats.failed,
        bytes_copied: copy_stats.bytes,
        duplicates: changes.duplicates,
        had_prior_run: last_run.is_some(),
    };
    info!("{}", format_run_summary(&report));

    Ok(report)
}

fn scan_with_progress(
    reporter: &Arc<Mutex<ProgressReporter>>,
    label: &'static str,
    root: &Path,
    last_run: Option<&DateTime<Utc>>,
) -> Result<Vec<FileRecord>, SyncError> {
    if let Ok(progress) = reporter.lock() {
        progress.start_scan(label);
    }
    let on_progress: ProgressCallback = {
        let reporter = Arc::clone(reporter);
        Box::new(move |files: u64, bytes: u64| {
            if let Ok(progress) = reporter.lock() {
                progress.update_scan(label, files, bytes);
            }
        })
    };

    let records = scan_tree(root, last_run, Some(&on_progress))?;

    if let Ok(progress) = reporter.lock() {
        progress.finish_scan(label, records.len());
    }
    Ok(records)
}

fn ensure_dir(path: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(path).map_err(|source| SyncError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// One-line human summary of a run
pub fn format_run_summary(report: &RunReport) -> String {
    let mut summary = format!(
        "Run complete: {} copied ({}), {} trashed, {} failed | scanned {} input, {} output",
        report.copied,
        HumanBytes(report.bytes_copied),
        report.trashed,
        report.failures(),
        report.input_files,
        report.output_files
    );
    if !report.had_prior_run {
        summary.push_str(" | first run");
    }
    summary
}
