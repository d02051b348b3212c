//! Atomic file copy implementation

use crate::diff::PendingFile;
use crate::errlog::{ErrorLog, FailureKind};
use crate::executor::{emit_event, map_file_error, ExecutionCallback, ExecutionEvent, PhaseStats};
use crate::types::SyncError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

const PART_PREFIX: &str = ".tidesync-";
const PART_SUFFIX: &str = ".part";

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Create missing parent directories of `dest`
/// 2. Stream `src` into a fresh temporary file next to `dest`
/// 3. Flush and sync to disk
/// 4. Rename over `dest`, replacing any previous content
///
/// The temporary file gets a random name and is created exclusively, so it
/// never reuses an existing file in the output tree. Permissions and
/// timestamps are not carried over. On failure the temporary file is removed
/// and `dest` is left as it was.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - IO error or other failure
///
/// # Example
/// ```no_run
/// use tidesync::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("out/dest.txt"))?;
/// # Ok::<(), tidesync::types::SyncError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| map_file_error(parent, e))?;

    let mut src_file = File::open(src).map_err(|e| map_file_error(src, e))?;

    // Dropped (and deleted) on every early return below.
    let mut part_file = tempfile::Builder::new()
        .prefix(PART_PREFIX)
        .suffix(PART_SUFFIX)
        .tempfile_in(parent)
        .map_err(|e| map_file_error(parent, e))?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file
            .read(&mut buffer)
            .map_err(|e| map_file_error(src, e))?;

        if bytes_read == 0 {
            break;
        }

        part_file
            .write_all(&buffer[0..bytes_read])
            .map_err(|e| map_file_error(part_file.path(), e))?;
        total_bytes += bytes_read as u64;
    }

    part_file
        .as_file()
        .sync_all()
        .map_err(|e| map_file_error(part_file.path(), e))?;

    part_file
        .persist(dest)
        .map_err(|e| map_file_error(dest, e.error))?;

    Ok(total_bytes)
}

/// Copy every selected input file to `<output_root>/<relative path>`
///
/// Failures are written to `error_log` by file name and never stop the
/// remaining files from being copied.
pub fn copy_files<W: Write>(
    to_copy: &[PendingFile],
    output_root: &Path,
    error_log: &mut ErrorLog<W>,
    on_event: Option<&ExecutionCallback>,
) -> PhaseStats {
    let mut stats = PhaseStats {
        total: to_copy.len(),
        ..Default::default()
    };

    for (idx, file) in to_copy.iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            ExecutionEvent::ActionStart {
                index,
                total: stats.total,
                action: "Copy",
                path: file.relative_path.clone(),
            },
        );

        let destination = output_root.join(&file.relative_path);

        match copy_file_atomic(&file.record.location, &destination) {
            Ok(bytes) => {
                stats.completed += 1;
                stats.bytes += bytes;
                debug!(
                    from = %file.record.location.display(),
                    to = %destination.display(),
                    bytes,
                    "copied file"
                );
                emit_event(
                    on_event,
                    ExecutionEvent::ActionSuccess {
                        index,
                        total: stats.total,
                        action: "Copy",
                        path: file.relative_path.clone(),
                        bytes_copied: bytes,
                    },
                );
            }
            Err(err) => {
                stats.failed += 1;
                warn!(
                    path = %file.record.location.display(),
                    "failed copying file: {}",
                    err
                );
                error_log.record(FailureKind::Copy, &file.record.name);
                emit_event(
                    on_event,
                    ExecutionEvent::ActionError {
                        index,
                        total: stats.total,
                        action: "Copy",
                        path: file.relative_path.clone(),
                        error: err.to_string(),
                    },
                );
            }
        }
    }

    stats
}
