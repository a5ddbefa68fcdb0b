//! Constants for the download module (timeouts, buffering, concurrency).

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP connect timeout (30 seconds). The per-request timeout still applies on top.
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Write buffer size while streaming a response body to disk (256 KiB).
pub const CHUNK_SIZE: usize = 256 * 1024;

/// Suffix of the per-fetch temp file a body is written to.
pub const TEMP_SUFFIX: &str = ".part";
