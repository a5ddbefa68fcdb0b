//! HTTP client wrapper for fetching single resources to disk.
//!
//! This module provides the `HttpClient` struct which performs idempotent,
//! interruption-safe downloads: existing non-empty files are never fetched
//! again, and bodies are written to a `.part` sibling that is renamed into
//! place only once complete.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CHUNK_SIZE, CONNECT_TIMEOUT_SECS, TEMP_SUFFIX};
use super::error::DownloadError;
use crate::user_agent;

/// Successful outcome of a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    /// Destination already existed with non-zero size; no request was made.
    AlreadyPresent,
    /// Body was downloaded and moved into place.
    Downloaded {
        /// Bytes written to the destination.
        bytes: u64,
    },
}

impl Fetched {
    /// Short reason used in progress lines.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AlreadyPresent => "exists",
            Self::Downloaded { .. } => "downloaded",
        }
    }
}

/// HTTP client for downloading files with streaming support.
///
/// Created once per run and cloned into each worker; clones share the
/// underlying connection pool. Each call writes to its own temp path, so
/// concurrent calls for different destinations need no coordination.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Gzip decompression: enabled
    /// - User-Agent: `avatar-downloader/<version>`
    ///
    /// The overall request timeout is supplied per call to [`fetch`](Self::fetch).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches `url` into `destination`.
    ///
    /// - If `destination` exists with non-zero size, returns
    ///   [`Fetched::AlreadyPresent`] without touching the network.
    /// - Otherwise issues a GET bounded by `timeout`, streams the body to
    ///   a fresh `<destination>.<pid>-<seq>.part`, and renames it over `destination`.
    ///
    /// On any failure the temp file is removed and `destination` is left
    /// untouched, so it never holds partial data.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server answers with anything but 200
    /// - Writing or renaming the file fails
    #[instrument(skip(self, timeout), fields(url = %url, path = %destination.display()))]
    pub async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        timeout: Duration,
    ) -> Result<Fetched, DownloadError> {
        if is_present(destination).await {
            debug!("destination already present, skipping request");
            return Ok(Fetched::AlreadyPresent);
        }

        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self.send_request(url, timeout).await?;

        let temp_path = temp_path_for(destination);
        let bytes = match write_temp_file(response, url, &temp_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                discard_temp_file(&temp_path).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&temp_path, destination).await {
            discard_temp_file(&temp_path).await;
            // A concurrent fetch of the same resource finished first.
            if is_present(destination).await {
                debug!(error = %e, "rename lost to a concurrent fetch, keeping existing file");
                return Ok(Fetched::AlreadyPresent);
            }
            return Err(DownloadError::io(destination, e));
        }

        debug!(bytes, "download complete");
        Ok(Fetched::Downloaded { bytes })
    }

    async fn send_request(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }
}

/// Per-process sequence for temp file names.
static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Fresh temp path next to `destination`: `a.glb` → `a.glb.<pid>-<seq>.part`.
///
/// Every call returns a new name, so concurrent fetches of the same
/// destination never write to the same file.
#[must_use]
pub fn temp_path_for(destination: &Path) -> PathBuf {
    let seq = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut name = OsString::from(destination.as_os_str());
    name.push(format!(".{}-{seq}{TEMP_SUFFIX}", std::process::id()));
    PathBuf::from(name)
}

/// Existing regular file with at least one byte.
async fn is_present(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file() && meta.len() > 0)
}

/// Streams the response body into `temp_path`, returning bytes written.
async fn write_temp_file(
    response: reqwest::Response,
    url: &str,
    temp_path: &Path,
) -> Result<u64, DownloadError> {
    let file = File::create(temp_path)
        .await
        .map_err(|e| DownloadError::io(temp_path, e))?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(temp_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed before the rename
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(temp_path, e))?;

    Ok(bytes_written)
}

async fn discard_temp_file(temp_path: &Path) {
    match tokio::fs::remove_file(temp_path).await {
        Ok(()) => debug!(path = %temp_path.display(), "removed partial temp file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => debug!(path = %temp_path.display(), error = %e, "could not remove temp file"),
    }
}
