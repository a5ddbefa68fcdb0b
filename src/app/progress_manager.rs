//! Progress UI (bar) for download runs.

use indicatif::{ProgressBar, ProgressStyle};

/// Per-avatar progress: a bar on stderr plus one stdout line per finished avatar.
///
/// When the bar is disabled the lines are still printed.
pub(crate) struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub(crate) fn new(show_bar: bool, total: usize) -> Self {
        if !show_bar {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} avatars {elapsed_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }

    /// Prints a finished avatar's line without tearing the bar.
    pub(crate) fn line(&self, text: &str) {
        self.bar.suspend(|| println!("{text}"));
        self.bar.inc(1);
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
