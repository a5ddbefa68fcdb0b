//! Download engine for running avatar tasks concurrently.
//!
//! This module provides the `DownloadEngine` which runs one
//! [avatar task](super::run_avatar_task) per identifier using a
//! semaphore-based concurrency limit, and hands results back over a channel
//! in completion order.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use avatar_downloader::download::{AvatarTaskConfig, DownloadEngine, HttpClient};
//! use avatar_downloader::parser::parse_input;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ids = parse_input("abc123\ndef456\n").ids;
//! let engine = DownloadEngine::new(8)?;
//! let config = Arc::new(AvatarTaskConfig::new("./avatars"));
//! let mut results = engine.dispatch(ids, HttpClient::new(), config);
//! while let Some(result) = results.recv().await {
//!     println!("{} model={}", result.id, result.model_reason());
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, instrument, warn};

use super::task::{AvatarResult, AvatarTaskConfig, run_avatar_task};
use super::{DownloadError, HttpClient};
use crate::parser::AvatarId;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 64;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Error type for download engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Download engine for concurrent avatar tasks.
///
/// # Concurrency Model
///
/// - Each avatar runs in its own Tokio task
/// - A semaphore permit is acquired before a task is spawned, so at most
///   `concurrency` tasks run at once and the rest wait their turn
/// - Permits are released automatically when tasks complete (RAII)
/// - Workers share nothing but the HTTP connection pool; every result is
///   sent by value over a channel and tallied by the single consumer
///
/// There is no retry and no cancellation: every submitted task runs to completion.
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new download engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-64).
    ///
    /// # Example
    ///
    /// ```
    /// use avatar_downloader::download::DownloadEngine;
    ///
    /// let engine = DownloadEngine::new(8).unwrap();
    /// assert_eq!(engine.concurrency(), 8);
    /// ```
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Starts one avatar task per identifier and returns the result stream.
    ///
    /// Results arrive in completion order, not submission order. The channel
    /// closes once every task has reported, so draining it until `None`
    /// waits for the whole batch. Exactly one result is produced per
    /// identifier; a task that panics is reported as a model failure.
    ///
    /// Must be called from within a Tokio runtime.
    #[instrument(skip(self, ids, client, config), fields(avatars = ids.len(), output_root = %config.output_root.display()))]
    pub fn dispatch(
        &self,
        ids: Vec<AvatarId>,
        client: HttpClient,
        config: Arc<AvatarTaskConfig>,
    ) -> mpsc::Receiver<AvatarResult> {
        // Room for every result, so workers never wait on a slow consumer while holding a permit.
        let (tx, rx) = mpsc::channel(ids.len().max(1));
        let semaphore = Arc::clone(&self.semaphore);

        info!(avatars = ids.len(), concurrency = self.concurrency, "starting batch");

        tokio::spawn(async move {
            let mut handles = Vec::with_capacity(ids.len());

            for id in ids {
                // Acquire semaphore permit (waits if at concurrency limit)
                // The semaphore is never closed, so the else branch is unreachable;
                // it still reports the avatar so every ID gets exactly one result.
                let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                    warn!(avatar = %id, "semaphore closed, avatar not started");
                    let _ = tx
                        .send(AvatarResult::model_failed(
                            id,
                            DownloadError::aborted("worker pool closed"),
                        ))
                        .await;
                    continue;
                };

                let client = client.clone();
                let config = Arc::clone(&config);
                let tx = tx.clone();
                let task_id = id.clone();

                handles.push((
                    task_id,
                    tokio::spawn(async move {
                        // Permit is dropped when this block exits (RAII)
                        let _permit = permit;
                        let result = run_avatar_task(&client, id, &config).await;
                        // Receiver gone means nobody is listening any more
                        let _ = tx.send(result).await;
                    }),
                ));
            }

            debug!(
                task_count = handles.len(),
                "all avatars started, waiting for completion"
            );

            for (id, handle) in handles {
                if let Err(e) = handle.await {
                    warn!(avatar = %id, error = %e, "avatar task panicked");
                    let _ = tx
                        .send(AvatarResult::model_failed(
                            id,
                            DownloadError::aborted(e.to_string()),
                        ))
                        .await;
                }
            }

            debug!("batch complete");
        });

        rx
    }
}
