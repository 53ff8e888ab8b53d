//! Single-file conversion controller.
//!
//! Runs one ffmpeg job to completion while honoring the shared pause and
//! cancel flags. Pause is cooperative: the subprocess keeps encoding, only
//! the stderr drain (and therefore progress reporting) suspends. Cancel
//! kills the subprocess; latency is bounded by one stderr line plus one
//! pause-poll interval.

use crate::config::{CoreConfig, OverwritePolicy};
use crate::control::ControlFlags;
use crate::error::{CoreError, CoreResult};
use crate::planning::ConversionPlan;
use crate::progress::ProgressParser;

use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};

/// Number of trailing stderr lines kept for failure diagnostics.
const STDERR_TAIL_LINES: usize = 40;

/// Terminal state of one conversion job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// The encoder exited successfully.
    Done,
    /// The output already existed and the overwrite policy left it alone.
    Skipped,
    /// Cancellation was requested; the encoder was killed.
    Cancelled,
    /// The encoder exited nonzero. Carries the stderr tail.
    Failed(String),
}

/// Runs one conversion job.
///
/// Job-level encoder failures are reported as `Ok(JobOutcome::Failed(_))` so
/// a batch can log them and move on; `Err` is reserved for systemic problems
/// such as ffmpeg not starting at all.
///
/// # Errors
///
/// Returns `CoreError::CommandStart` if ffmpeg cannot be spawned and
/// `CoreError::Io` if reading its stderr or reaping it fails.
pub fn run_conversion(
    plan: &ConversionPlan,
    input: &Path,
    output: &Path,
    config: &CoreConfig,
    controls: &ControlFlags,
    mut on_progress: impl FnMut(f64),
) -> CoreResult<JobOutcome> {
    if config.overwrite == OverwritePolicy::SkipExisting && output.exists() {
        log::info!("Output already exists, skipping: {}", output.display());
        return Ok(JobOutcome::Skipped);
    }
    if controls.is_cancelled() {
        return Ok(JobOutcome::Cancelled);
    }

    let args = plan.to_args(input, output);
    log::debug!("Running: ffmpeg {}", args.join(" "));

    let mut child = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CoreError::CommandStart("ffmpeg".to_string(), e))?;

    // spawn() with Stdio::piped guarantees the handle is present
    let stderr = match child.stderr.take() {
        Some(stderr) => stderr,
        None => {
            let _ = child.kill();
            child.wait()?;
            return Ok(JobOutcome::Failed("ffmpeg stderr unavailable".to_string()));
        }
    };

    let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);

    match drain_stderr(BufReader::new(stderr), controls, &mut tail, &mut on_progress) {
        DrainOutcome::Cancelled => {
            log::info!("Cancelling conversion of {}", input.display());
            let _ = child.kill();
            child.wait()?;
            return Ok(JobOutcome::Cancelled);
        }
        DrainOutcome::ReadError(e) => {
            // the child must not outlive a broken stderr pipe
            let _ = child.kill();
            let _ = child.wait();
            return Err(e.into());
        }
        DrainOutcome::Finished => {}
    }

    let status = child.wait()?;
    if status.success() {
        on_progress(100.0);
        Ok(JobOutcome::Done)
    } else {
        let stderr_tail = tail.iter().cloned().collect::<Vec<_>>().join("\n");
        log::warn!(
            "ffmpeg exited with {status} for {}:\n{stderr_tail}",
            input.display()
        );
        Ok(JobOutcome::Failed(stderr_tail))
    }
}

/// How the stderr drain loop ended.
enum DrainOutcome {
    /// Stream reached EOF; the child can be waited on normally.
    Finished,
    /// Cancellation was observed; the caller kills the child.
    Cancelled,
    /// Reading stderr failed; the caller must still kill and reap the child.
    ReadError(std::io::Error),
}

fn drain_stderr(
    reader: impl BufRead,
    controls: &ControlFlags,
    tail: &mut VecDeque<String>,
    on_progress: &mut impl FnMut(f64),
) -> DrainOutcome {
    let mut parser = ProgressParser::new();

    for line in reader.lines() {
        if controls.is_cancelled() {
            return DrainOutcome::Cancelled;
        }
        controls.wait_while_paused();
        if controls.is_cancelled() {
            return DrainOutcome::Cancelled;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => return DrainOutcome::ReadError(e),
        };
        if tail.len() == STDERR_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(line.clone());

        if let Some(percent) = parser.on_line(&line) {
            on_progress(percent);
        }
    }
    DrainOutcome::Finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::build_plan;
    use std::fs::File;

    #[test]
    fn test_existing_output_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mkv");
        let output = dir.path().join("in.mp4");
        File::create(&input).unwrap();
        File::create(&output).unwrap();

        let config = CoreConfig::default();
        let plan = build_plan(&[], &config);
        let mut emissions = Vec::new();
        let outcome = run_conversion(
            &plan,
            &input,
            &output,
            &config,
            &ControlFlags::new(),
            |p| emissions.push(p),
        )
        .unwrap();
        assert_eq!(outcome, JobOutcome::Skipped);
        assert!(emissions.is_empty());
    }

    #[test]
    fn test_drain_reports_read_error_after_partial_progress() {
        // Invalid UTF-8 on stderr surfaces as a line read error; progress
        // seen before it must already have been forwarded.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"  Duration: 00:01:40.00, start: 0.000000\n");
        bytes.extend_from_slice(b"frame=1 time=00:00:50.00 speed=1x\n");
        bytes.extend_from_slice(b"\xff\xfe broken\n");

        let mut tail = VecDeque::new();
        let mut emissions = Vec::new();
        let outcome = drain_stderr(
            std::io::Cursor::new(bytes),
            &ControlFlags::new(),
            &mut tail,
            &mut |p| emissions.push(p),
        );
        assert!(matches!(outcome, DrainOutcome::ReadError(_)));
        assert_eq!(emissions, vec![50.0]);
        assert_eq!(tail.len(), 2);
    }

    #[test]
    fn test_drain_finishes_at_eof_keeping_tail() {
        let bytes = b"Stream mapping:\nPress [q] to stop\n".to_vec();
        let mut tail = VecDeque::new();
        let outcome = drain_stderr(
            std::io::Cursor::new(bytes),
            &ControlFlags::new(),
            &mut tail,
            &mut |_| {},
        );
        assert!(matches!(outcome, DrainOutcome::Finished));
        assert_eq!(tail.back().map(String::as_str), Some("Press [q] to stop"));
    }

    #[test]
    fn test_overwrite_policy_does_not_skip_on_precancel() {
        // With Overwrite set, an existing output is no longer a skip;
        // a pre-set cancel flag must still short-circuit before spawning.
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mkv");
        let output = dir.path().join("in.mp4");
        File::create(&input).unwrap();
        File::create(&output).unwrap();

        let config = CoreConfig {
            overwrite: OverwritePolicy::Overwrite,
            ..CoreConfig::default()
        };
        let plan = build_plan(&[], &config);
        let controls = ControlFlags::new();
        controls.cancel();
        let outcome =
            run_conversion(&plan, &input, &output, &config, &controls, |_| {}).unwrap();
        assert_eq!(outcome, JobOutcome::Cancelled);
    }
}
