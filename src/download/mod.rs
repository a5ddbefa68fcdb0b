//! Concurrent batch fetch engine.
//!
//! # Features
//!
//! - Idempotent single-resource fetch (existing non-empty files are skipped)
//! - Streaming downloads through a `.part` temp file renamed into place
//! - Per-avatar task: model first, then four pose previews
//! - Bounded worker pool with results streamed in completion order
//!
//! # Example
//!
//! ```no_run
//! use avatar_downloader::download::HttpClient;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let outcome = client
//!     .fetch(
//!         "https://api.readyplayer.me/v1/avatars/abc123.glb",
//!         Path::new("./abc123.glb"),
//!         Duration::from_secs(60),
//!     )
//!     .await?;
//! println!("model: {}", outcome.reason());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod engine;
mod error;
mod task;

pub use client::{Fetched, HttpClient, temp_path_for};
pub use constants::DEFAULT_TIMEOUT_SECS;
pub use engine::{DEFAULT_CONCURRENCY, DownloadEngine, EngineError};
pub use error::DownloadError;
pub use task::{AvatarResult, AvatarTaskConfig, run_avatar_task};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
