//! Progress parsing for ffmpeg stderr output.
//!
//! ffmpeg announces the input duration once near the start of its stderr
//! stream and then emits `time=` status lines while encoding. The parser
//! turns that stream into clamped, monotonically non-decreasing percentages.

use crate::utils::parse_ffmpeg_time;

/// Stateful parser fed one stderr line at a time.
#[derive(Debug, Default)]
pub struct ProgressParser {
    duration_secs: Option<f64>,
    last_percent: f64,
}

impl ProgressParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The parsed input duration, once seen.
    #[must_use]
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    /// Consumes one stderr line, returning a percentage when the line
    /// advances progress.
    ///
    /// The first `Duration:` line fixes the total duration; later ones are
    /// ignored (concat inputs repeat it). `time=` lines before the duration
    /// is known, and malformed captures, emit nothing.
    pub fn on_line(&mut self, line: &str) -> Option<f64> {
        if self.duration_secs.is_none() {
            if let Some(rest) = line.trim_start().strip_prefix("Duration: ") {
                let time = rest.split(',').next().unwrap_or("");
                if let Some(secs) = parse_ffmpeg_time(time.trim()) {
                    if secs > 0.0 {
                        self.duration_secs = Some(secs);
                    }
                }
            }
            return None;
        }
        let duration = self.duration_secs?;

        let start = line.find("time=")? + "time=".len();
        let time = line[start..].split_whitespace().next()?;
        let elapsed = parse_ffmpeg_time(time)?;

        let percent = (elapsed / duration * 100.0)
            .min(100.0)
            .max(self.last_percent);
        self.last_percent = percent;
        Some(percent)
    }
}
