//! Batch scheduler.
//!
//! Runs a list of conversion jobs sequentially, combining per-file progress
//! into an overall percentage and keeping separate success/failure/skip
//! counts. Individual encoder failures are logged and counted; they never
//! abort the batch. Cancellation stops after the current file.

use crate::config::CoreConfig;
use crate::control::ControlFlags;
use crate::discovery::output_path_for;
use crate::error::CoreResult;
use crate::external::{check_dependency, probe_streams};
use crate::planning::build_plan;
use crate::processing::conversion::{run_conversion, JobOutcome};

use std::path::{Path, PathBuf};

/// Final tally for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// True if the batch stopped early because cancellation was requested.
    pub cancelled: bool,
}

/// Receives progress and status callbacks during a batch run.
///
/// All methods have no-op defaults so observers implement only what they
/// display. Implementations must be thread-safe; a batch may run on a worker
/// thread while the observer renders elsewhere.
pub trait BatchObserver: Send + Sync {
    /// Percent (0..=100) for the file currently converting. `file_index` is
    /// zero-based within the batch.
    fn on_file_progress(&self, _file_index: usize, _percent: f64) {}

    /// Percent (0..=100) across the whole batch.
    fn on_overall_progress(&self, _percent: f64) {}

    /// Human-readable status line (current file, completion).
    fn on_status(&self, _message: &str) {}
}

/// Observer that discards all callbacks.
#[derive(Debug, Default)]
pub struct NullObserver;

impl BatchObserver for NullObserver {}

/// Executes one conversion job. The production implementation shells out to
/// ffprobe and ffmpeg; tests substitute scripted runners.
pub trait JobRunner {
    fn run(
        &self,
        input: &Path,
        output: &Path,
        config: &CoreConfig,
        controls: &ControlFlags,
        on_progress: &mut dyn FnMut(f64),
    ) -> CoreResult<JobOutcome>;
}

/// Probe, plan, then hand off to the conversion controller.
#[derive(Debug, Default)]
pub struct FfmpegJobRunner;

impl JobRunner for FfmpegJobRunner {
    fn run(
        &self,
        input: &Path,
        output: &Path,
        config: &CoreConfig,
        controls: &ControlFlags,
        on_progress: &mut dyn FnMut(f64),
    ) -> CoreResult<JobOutcome> {
        let streams = probe_streams(input);
        let plan = build_plan(&streams, config);
        run_conversion(&plan, input, output, config, controls, on_progress)
    }
}

/// Converts the given files in order, reporting progress to `observer`.
///
/// # Errors
///
/// Returns `CoreError::DependencyNotFound` if ffmpeg or ffprobe is missing,
/// or a systemic error from the controller (job-level encoder failures are
/// counted in the summary instead).
pub fn run_batch(
    files: &[PathBuf],
    config: &CoreConfig,
    controls: &ControlFlags,
    observer: &dyn BatchObserver,
) -> CoreResult<BatchSummary> {
    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    run_batch_with(&FfmpegJobRunner, files, config, controls, observer)
}

/// Batch loop with an injectable job runner.
pub fn run_batch_with(
    runner: &dyn JobRunner,
    files: &[PathBuf],
    config: &CoreConfig,
    controls: &ControlFlags,
    observer: &dyn BatchObserver,
) -> CoreResult<BatchSummary> {
    let mut summary = BatchSummary {
        total: files.len(),
        ..BatchSummary::default()
    };
    if files.is_empty() {
        observer.on_overall_progress(100.0);
        return Ok(summary);
    }
    let total = files.len();

    for (index, input) in files.iter().enumerate() {
        if controls.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        controls.wait_while_paused();
        if controls.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        observer.on_status(&format!("Converting {}/{total}: {name}", index + 1));
        log::info!("Converting {}/{total}: {}", index + 1, input.display());

        let output = output_path_for(input);
        // completed-file count is fixed for the lifetime of this job's
        // callback; a stale closure over a shared counter would misreport
        let completed = index as f64;
        let mut on_progress = |percent: f64| {
            if controls.is_cancelled() {
                return;
            }
            observer.on_file_progress(index, percent);
            observer.on_overall_progress((completed + percent / 100.0) / total as f64 * 100.0);
        };

        match runner.run(input, &output, config, controls, &mut on_progress)? {
            JobOutcome::Done => {
                summary.succeeded += 1;
                observer.on_file_progress(index, 100.0);
            }
            JobOutcome::Skipped => {
                summary.skipped += 1;
                observer.on_file_progress(index, 100.0);
            }
            JobOutcome::Cancelled => {
                summary.cancelled = true;
                break;
            }
            JobOutcome::Failed(stderr_tail) => {
                summary.failed += 1;
                log::error!("Conversion failed for {}: {stderr_tail}", input.display());
            }
        }
    }

    if !summary.cancelled {
        observer.on_overall_progress(100.0);
        observer.on_status("Batch complete");
    }
    Ok(summary)
}
