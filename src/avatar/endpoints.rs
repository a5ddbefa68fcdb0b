//! Remote service endpoints for model downloads and preview renders.

use thiserror::Error;
use url::Url;

use super::layout::{IMAGE_EXTENSION, MODEL_EXTENSION};
use super::render::{EXPRESSION, Pose, RenderParams};
use crate::parser::AvatarId;

/// Base path of the model download endpoint.
pub const DEFAULT_MODEL_BASE_URL: &str = "https://api.readyplayer.me/v1/avatars/";

/// Base path of the 2D render endpoint.
pub const DEFAULT_RENDER_BASE_URL: &str = "https://models.readyplayer.me";

/// Errors raised when configuring endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Base URL could not be parsed or is not http/https.
    #[error("invalid {which} base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Which endpoint was being configured
        which: &'static str,
        /// The rejected value
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

/// The two endpoints the downloader talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    model_base: Url,
    render_base: Url,
}

impl Default for ServiceEndpoints {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_BASE_URL, DEFAULT_RENDER_BASE_URL)
            .expect("default endpoints are valid") // Static URLs, safe to panic
    }
}

impl ServiceEndpoints {
    /// Creates endpoints from two base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidBaseUrl`] if either value is not an
    /// absolute http or https URL.
    pub fn new(model_base: &str, render_base: &str) -> Result<Self, EndpointError> {
        Ok(Self {
            model_base: parse_base("model", model_base)?,
            render_base: parse_base("render", render_base)?,
        })
    }

    /// Model download URL: `<model_base>/<id>.glb`.
    #[must_use]
    pub fn model_url(&self, id: &AvatarId) -> Url {
        resource_url(&self.model_base, &format!("{id}.{MODEL_EXTENSION}"))
    }

    /// Preview render URL for one pose.
    ///
    /// Query parameters are appended in a fixed order: size, camera,
    /// background, expression, pose.
    #[must_use]
    pub fn image_url(&self, id: &AvatarId, params: &RenderParams, pose: Pose) -> Url {
        let mut url = resource_url(&self.render_base, &format!("{id}.{IMAGE_EXTENSION}"));
        url.query_pairs_mut()
            .append_pair("size", &params.size().to_string())
            .append_pair("camera", params.camera().as_str())
            .append_pair("background", params.background())
            .append_pair("expression", EXPRESSION)
            .append_pair("pose", pose.as_str());
        url
    }
}

fn parse_base(which: &'static str, raw: &str) -> Result<Url, EndpointError> {
    let invalid = |reason: String| EndpointError::InvalidBaseUrl {
        which,
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("scheme '{}' is not supported", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("base URL must not carry a query or fragment".to_string()));
    }
    Ok(url)
}

/// Appends a file name as the last path segment of `base`.
fn resource_url(base: &Url, file_name: &str) -> Url {
    let mut url = base.clone();
    // http(s) URLs always have a path, so this only fails for cannot-be-a-base URLs.
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(file_name);
    }
    url
}
