//! User-Agent string sent with every request.

/// Default User-Agent for model and preview requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("avatar-downloader/{version}")
}
