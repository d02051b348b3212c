//! Progress reporting

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

/// Progress reporter for one sync run
///
/// A hidden reporter keeps all counters but draws nothing.
pub struct ProgressReporter {
    scan_bar: ProgressBar,
    transfer_bar: ProgressBar,
    transfer_started_at: Option<Instant>,
    transferred_bytes: u64,
}

impl ProgressReporter {
    /// Create a reporter; `visible = false` suppresses all drawing
    pub fn new(visible: bool) -> Self {
        let (scan_bar, transfer_bar) = if visible {
            (ProgressBar::new_spinner(), ProgressBar::new(0))
        } else {
            (ProgressBar::hidden(), ProgressBar::hidden())
        };

        if visible {
            scan_bar.enable_steady_tick(std::time::Duration::from_millis(120));
        }
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            scan_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        if let Ok(style) =
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            transfer_bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            scan_bar,
            transfer_bar,
            transfer_started_at: None,
            transferred_bytes: 0,
        }
    }

    /// Mark start of a scanning phase.
    pub fn start_scan(&self, label: &str) {
        self.scan_bar.set_message(format!("Scanning {}...", label));
    }

    /// Update scanning progress counters.
    pub fn update_scan(&self, label: &str, files: u64, bytes: u64) {
        self.scan_bar.set_message(format!(
            "Scanning {}... {} files | {}",
            label,
            files,
            HumanBytes(bytes)
        ));
    }

    /// Mark completion of a scanning phase.
    pub fn finish_scan(&self, label: &str, files: usize) {
        self.scan_bar
            .set_message(format!("Scanned {}: {} files", label, files));
    }

    /// Stop the scan spinner once both trees are scanned.
    pub fn end_scans(&self, message: String) {
        self.scan_bar.finish_with_message(message);
    }

    /// Initialize transfer phase progress: trash moves plus copies.
    pub fn start_transfer(&mut self, total_actions: u64) {
        self.transfer_started_at = Some(Instant::now());
        self.transferred_bytes = 0;
        self.transfer_bar.set_length(total_actions);
        self.transfer_bar.set_position(0);
        self.transfer_bar
            .set_message("Starting transfer...".to_string());
    }

    /// Update current file/action indicator.
    pub fn set_current_file(&self, action: &str, path: &Path) {
        self.transfer_bar
            .set_message(format!("{} {}", action, path.display()));
    }

    /// Mark one action complete and refresh throughput display.
    pub fn complete_action(&mut self, bytes: u64) {
        self.transferred_bytes = self.transferred_bytes.saturating_add(bytes);
        self.transfer_bar.inc(1);

        let throughput = self.current_throughput_bps();
        self.transfer_bar.set_message(format!(
            "{} transferred | {}/s",
            HumanBytes(self.transferred_bytes),
            HumanBytes(throughput)
        ));
    }

    /// Surface a failed action; it still counts toward the bar.
    pub fn action_error(&self, action: &str, path: &Path, err: &str) {
        self.transfer_bar.inc(1);
        self.transfer_bar
            .println(format!("ERROR {} {}: {}", action, path.display(), err));
    }

    /// Finalize transfer phase.
    pub fn finish_transfer(&self, trashed: usize, copied: usize, failed: usize) {
        self.transfer_bar.finish_with_message(format!(
            "{} trashed, {} copied, {} failed | {}",
            trashed,
            copied,
            failed,
            HumanBytes(self.transferred_bytes)
        ));
    }

    fn current_throughput_bps(&self) -> u64 {
        match self.transfer_started_at {
            Some(started) => {
                let secs = started.elapsed().as_secs_f64();
                if secs > 0.0 {
                    (self.transferred_bytes as f64 / secs) as u64
                } else {
                    0
                }
            }
            None => 0,
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true)
    }
}
