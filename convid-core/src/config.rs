//! Core configuration for conversion runs.

/// Default CRF for transcoded video streams.
pub const DEFAULT_CRF: u8 = 18;

/// Default x264 preset for transcoded video streams.
pub const DEFAULT_PRESET: &str = "slow";

/// What to do when a job's output file already exists.
///
/// Historically the batch path skipped existing outputs while the single-file
/// command always passed `-y` to the encoder. One policy is now honored
/// uniformly by the conversion controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Treat the job as already done without invoking the encoder.
    #[default]
    SkipExisting,
    /// Re-encode and replace the existing output.
    Overwrite,
}

/// Configuration shared by the planner, controller and batch scheduler.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Quality (CRF) applied to video streams that need transcoding.
    pub crf: u8,
    /// x264 preset applied to video streams that need transcoding.
    pub preset: String,
    /// Existing-output handling, applied identically to single-file and
    /// batch conversions.
    pub overwrite: OverwritePolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            crf: DEFAULT_CRF,
            preset: DEFAULT_PRESET.to_string(),
            overwrite: OverwritePolicy::default(),
        }
    }
}

impl CoreConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
