//! Error types for the download module.
//!
//! A failed fetch never escapes as a panic or aborts the batch; it is carried
//! as a [`DownloadError`] value and summarized with [`DownloadError::reason`]
//! in progress output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a single resource.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, body decode, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Any response other than 200 OK.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error (create directory, create temp file, write, rename).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The worker running the fetch stopped before reporting an outcome.
    #[error("download task aborted: {detail}")]
    Aborted {
        /// What stopped the worker.
        detail: String,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::timeout(url);
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an aborted-task error.
    pub fn aborted(detail: impl Into<String>) -> Self {
        Self::Aborted {
            detail: detail.into(),
        }
    }

    /// Short machine-friendly reason used in progress lines.
    ///
    /// `http_<status>` for status failures, `error_<kind>` for everything else.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::HttpStatus { status, .. } => format!("http_{status}"),
            Self::Timeout { .. } => "error_timeout".to_string(),
            Self::Network { source, .. } if source.is_connect() => "error_connect".to_string(),
            Self::Network { source, .. } if source.is_body() || source.is_decode() => {
                "error_body".to_string()
            }
            Self::Network { .. } => "error_network".to_string(),
            Self::Io { .. } => "error_io".to_string(),
            Self::InvalidUrl { .. } => "error_invalid_url".to_string(),
            Self::Aborted { .. } => "error_task_panic".to_string(),
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the url or path
// the source error does not carry, so the constructors above are used instead.
