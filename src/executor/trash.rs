//! Trash-based relocation of orphaned output files
//!
//! Orphans are renamed into `<output>/trash/<relative dir>/` with the run
//! start time spliced in before the extension, e.g.
//! `docs/report.pdf` → `trash/docs/report.20261016134900.pdf`.

use crate::diff::PendingFile;
use crate::errlog::{ErrorLog, FailureKind};
use crate::executor::{emit_event, map_file_error, ExecutionCallback, ExecutionEvent, PhaseStats};
use crate::scanner::TRASH_DIR_NAME;
use crate::types::SyncError;
use chrono::{DateTime, Local};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Fixed-width run timestamp used in trashed file names
const TRASH_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Build the trashed file name for `name`
///
/// The extension is everything from the last dot, so a leading-dot name such
/// as `.env` is all extension and becomes `.<stamp>.env`. Names are kept as
/// raw OS strings.
pub fn trash_file_name(name: &OsStr, run_start: &DateTime<Local>) -> OsString {
    let stamp = run_start.format(TRASH_STAMP_FORMAT).to_string();
    let path = Path::new(name);

    let mut renamed = OsString::with_capacity(name.len() + stamp.len() + 1);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => {
            renamed.push(stem);
            renamed.push(".");
            renamed.push(&stamp);
            renamed.push(".");
            renamed.push(ext);
        }
        _ if name.as_encoded_bytes().first() == Some(&b'.') => {
            renamed.push(".");
            renamed.push(&stamp);
            renamed.push(name);
        }
        _ => {
            renamed.push(name);
            renamed.push(".");
            renamed.push(&stamp);
        }
    }
    renamed
}

/// Destination of an orphan inside the trash area
///
/// `relative_path` is the orphan's path relative to `output_root`; its
/// directory structure is kept under `<output_root>/trash`.
pub fn trash_destination(
    output_root: &Path,
    relative_path: &Path,
    run_start: &DateTime<Local>,
) -> PathBuf {
    let name = relative_path.file_name().unwrap_or_default();

    let mut destination = output_root.join(TRASH_DIR_NAME);
    if let Some(parent) = relative_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        destination.push(parent);
    }
    destination.push(trash_file_name(name, run_start));
    destination
}

/// Move a single file to `destination`, creating parent directories
///
/// The move is one `rename`; the original is never deleted on failure.
pub fn move_to_trash(source: &Path, destination: &Path) -> Result<(), SyncError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| map_file_error(parent, e))?;
    }

    fs::rename(source, destination).map_err(|e| map_file_error(source, e))
}

/// Relocate every orphan into the trash area
///
/// Failures are written to `error_log` by file name and never stop the
/// remaining orphans from being processed.
pub fn archive_orphans<W: Write>(
    orphans: &[PendingFile],
    output_root: &Path,
    run_start: &DateTime<Local>,
    error_log: &mut ErrorLog<W>,
    on_event: Option<&ExecutionCallback>,
) -> PhaseStats {
    let mut stats = PhaseStats {
        total: orphans.len(),
        ..Default::default()
    };

    for (idx, orphan) in orphans.iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            ExecutionEvent::ActionStart {
                index,
                total: stats.total,
                action: "Trash",
                path: orphan.relative_path.clone(),
            },
        );

        let destination = trash_destination(output_root, &orphan.relative_path, run_start);

        match move_to_trash(&orphan.record.location, &destination) {
            Ok(()) => {
                stats.completed += 1;
                debug!(
                    from = %orphan.record.location.display(),
                    to = %destination.display(),
                    "moved orphan to trash"
                );
                emit_event(
                    on_event,
                    ExecutionEvent::ActionSuccess {
                        index,
                        total: stats.total,
                        action: "Trash",
                        path: orphan.relative_path.clone(),
                        bytes_copied: 0,
                    },
                );
            }
            Err(err) => {
                stats.failed += 1;
                warn!(
                    path = %orphan.record.location.display(),
                    "failed moving file to trash: {}",
                    err
                );
                error_log.record(FailureKind::TrashMove, &orphan.record.name);
                emit_event(
                    on_event,
                    ExecutionEvent::ActionError {
                        index,
                        total: stats.total,
                        action: "Trash",
                        path: orphan.relative_path.clone(),
                        error: err.to_string(),
                    },
                );
            }
        }
    }

    stats
}
