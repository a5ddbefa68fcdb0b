//! Avatar Downloader Core Library
//!
//! This library provides the core functionality for the avatar downloader,
//! which bulk-fetches avatar models and rendered pose previews for a list of
//! avatar identifiers.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Identifier extraction from input files
//! - [`avatar`] - Service endpoints, render parameters and output layout
//! - [`download`] - Resource fetcher, per-avatar task and concurrent engine
//! - [`report`] - Result aggregation and console report lines

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod avatar;
pub mod download;
pub mod parser;
pub mod report;
mod user_agent;

// Re-export commonly used types
pub use avatar::{CameraMode, Pose, RenderParams, ServiceEndpoints};
pub use download::{
    AvatarResult, AvatarTaskConfig, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS, DownloadEngine,
    DownloadError, EngineError, Fetched, HttpClient, run_avatar_task,
};
pub use parser::{AvatarId, ParseResult, parse_input};
pub use report::{RunStatus, Summary, aggregate};
