//! Result aggregation and console report formatting.
//!
//! The [`Summary`] is owned by whoever drains the result channel and is
//! never shared with workers, so it needs no synchronization.

use std::fmt;

use tokio::sync::mpsc;
use tracing::info;

use crate::download::AvatarResult;

/// Message printed when the input holds no usable identifier.
pub const NO_INPUT_MESSAGE: &str = "No valid avatar IDs found.";

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every model was fetched (preview failures do not count).
    Clean,
    /// At least one model could not be fetched.
    PartialFailure,
}

/// Running totals across all avatars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Models present after the run.
    pub models_ok: usize,
    /// Models that could not be fetched.
    pub models_failed: usize,
    /// Previews present after the run.
    pub images_ok: usize,
    /// Previews that could not be fetched.
    pub images_failed: usize,
}

impl Summary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one avatar's outcome to the totals.
    pub fn record(&mut self, result: &AvatarResult) {
        if result.model_succeeded() {
            self.models_ok += 1;
        } else {
            self.models_failed += 1;
        }
        self.images_ok += result.images_ok;
        self.images_failed += result.images_failed;
    }

    /// Number of avatars recorded.
    #[must_use]
    pub fn avatars(&self) -> usize {
        self.models_ok + self.models_failed
    }

    /// Clean if no model failed.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        if self.models_failed == 0 {
            RunStatus::Clean
        } else {
            RunStatus::PartialFailure
        }
    }
}

impl fmt::Display for Summary {
    /// Multi-line summary block printed at the end of a run.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SUMMARY ===")?;
        writeln!(
            f,
            "GLB ok: {} | GLB failed: {}",
            self.models_ok, self.models_failed
        )?;
        write!(
            f,
            "PNG ok: {} | PNG failed: {}",
            self.images_ok, self.images_failed
        )
    }
}

/// Drains the result stream, calling `on_result` for each avatar as it completes.
///
/// Returns once the dispatcher has closed the channel.
pub async fn aggregate<F>(mut results: mpsc::Receiver<AvatarResult>, mut on_result: F) -> Summary
where
    F: FnMut(&AvatarResult),
{
    let mut summary = Summary::new();
    while let Some(result) = results.recv().await {
        summary.record(&result);
        on_result(&result);
    }

    info!(
        models_ok = summary.models_ok,
        models_failed = summary.models_failed,
        images_ok = summary.images_ok,
        images_failed = summary.images_failed,
        "batch finished"
    );

    summary
}

/// One line per completed avatar.
///
/// `[<id>] GLB FAILED (<reason>)` or `[<id>] GLB <reason> | PNG ok=<n> fail=<m>`.
#[must_use]
pub fn progress_line(result: &AvatarResult) -> String {
    if result.model_succeeded() {
        format!(
            "[{}] GLB {} | PNG ok={} fail={}",
            result.id,
            result.model_reason(),
            result.images_ok,
            result.images_failed
        )
    } else {
        format!("[{}] GLB FAILED ({})", result.id, result.model_reason())
    }
}

/// Line printed before dispatch.
#[must_use]
pub fn startup_line(avatars: usize, threads: usize, bad_lines: usize) -> String {
    format!("Avatars: {avatars} | Threads: {threads} | Bad lines: {bad_lines}")
}
