// Terminal progress display built on indicatif.
//
// Renders two bars: one for the batch and one for the file currently
// converting, fed by the core's BatchObserver callbacks.

use convid_core::BatchObserver;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Two stacked progress bars driven by batch callbacks.
pub struct ProgressBars {
    _multi: MultiProgress,
    overall: ProgressBar,
    file: ProgressBar,
}

impl ProgressBars {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(100));
        overall.set_style(bar_style(
            "Overall [{bar:40.cyan/blue}] {pos:>3}% {wide_msg}",
        ));
        let file = multi.add(ProgressBar::new(100));
        file.set_style(bar_style("File    [{bar:40.green/blue}] {pos:>3}%"));
        Self {
            _multi: multi,
            overall,
            file,
        }
    }

    /// Finishes both bars, leaving them at their final positions.
    pub fn finish(&self) {
        self.file.finish();
        self.overall.finish();
    }
}

impl Default for ProgressBars {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchObserver for ProgressBars {
    fn on_file_progress(&self, _file_index: usize, percent: f64) {
        self.file.set_position(percent.round() as u64);
    }

    fn on_overall_progress(&self, percent: f64) {
        self.overall.set_position(percent.round() as u64);
    }

    fn on_status(&self, message: &str) {
        self.overall.set_message(message.to_string());
    }
}
