//! Per-avatar work unit: one model fetch, then one fetch per pose.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::constants::DEFAULT_TIMEOUT_SECS;
use super::{DownloadError, Fetched, HttpClient};
use crate::avatar::{Pose, RenderParams, ServiceEndpoints, layout};
use crate::parser::AvatarId;

/// Settings shared by every avatar task in a run.
#[derive(Debug, Clone)]
pub struct AvatarTaskConfig {
    /// Root under which per-avatar directories are created.
    pub output_root: PathBuf,
    /// Remote endpoints.
    pub endpoints: ServiceEndpoints,
    /// Preview render parameters.
    pub render: RenderParams,
    /// Timeout applied to each individual request.
    pub timeout: Duration,
}

impl AvatarTaskConfig {
    /// Creates a config with default endpoints, render parameters and timeout.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            endpoints: ServiceEndpoints::default(),
            render: RenderParams::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Outcome of one avatar task.
///
/// When the model fetch fails, `images_ok` and `images_failed` are both zero:
/// previews are never requested for an avatar without a model.
#[derive(Debug)]
pub struct AvatarResult {
    /// Avatar this result belongs to.
    pub id: AvatarId,
    /// Model fetch outcome.
    pub model: Result<Fetched, DownloadError>,
    /// Previews present after the task (fetched or already on disk).
    pub images_ok: usize,
    /// Previews that could not be fetched.
    pub images_failed: usize,
}

impl AvatarResult {
    /// Result for an avatar whose model could not be fetched.
    #[must_use]
    pub fn model_failed(id: AvatarId, error: DownloadError) -> Self {
        Self {
            id,
            model: Err(error),
            images_ok: 0,
            images_failed: 0,
        }
    }

    /// True if the model is present on disk.
    #[must_use]
    pub fn model_succeeded(&self) -> bool {
        self.model.is_ok()
    }

    /// Number of preview fetches attempted.
    #[must_use]
    pub fn image_attempts(&self) -> usize {
        self.images_ok + self.images_failed
    }

    /// Short reason describing the model outcome (`exists`, `downloaded`, `http_404`, ...).
    #[must_use]
    pub fn model_reason(&self) -> String {
        match &self.model {
            Ok(fetched) => fetched.reason().to_string(),
            Err(e) => e.reason(),
        }
    }
}

/// Runs the full fetch sequence for one avatar.
///
/// 1. Ensures `<root>/<id>` exists.
/// 2. Fetches the model; on failure returns immediately with zero preview attempts.
/// 3. Fetches each pose preview once, in [`Pose::ALL`] order. A failed pose
///    does not stop the remaining ones.
///
/// Never fails: every error is captured in the returned [`AvatarResult`].
#[instrument(skip(client, config), fields(avatar = %id))]
pub async fn run_avatar_task(
    client: &HttpClient,
    id: AvatarId,
    config: &AvatarTaskConfig,
) -> AvatarResult {
    let dir = layout::avatar_dir(&config.output_root, &id);
    if let Err(e) = tokio::fs::create_dir_all(&dir).await {
        let error = DownloadError::io(dir, e);
        warn!(error = %error, "could not create avatar directory");
        return AvatarResult::model_failed(id, error);
    }

    let model_url = config.endpoints.model_url(&id);
    let model_path = layout::model_path(&config.output_root, &id);
    let model = match client
        .fetch(model_url.as_str(), &model_path, config.timeout)
        .await
    {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!(error = %e, "model fetch failed, skipping previews");
            return AvatarResult::model_failed(id, e);
        }
    };
    debug!(outcome = model.reason(), "model ready");

    let mut images_ok = 0;
    let mut images_failed = 0;
    for pose in Pose::ALL {
        let url = config.endpoints.image_url(&id, &config.render, pose);
        let path = layout::image_path(&config.output_root, &id, pose);
        match client.fetch(url.as_str(), &path, config.timeout).await {
            Ok(fetched) => {
                debug!(%pose, outcome = fetched.reason(), "preview ready");
                images_ok += 1;
            }
            Err(e) => {
                warn!(%pose, error = %e, "preview fetch failed");
                images_failed += 1;
            }
        }
    }

    AvatarResult {
        id,
        model: Ok(model),
        images_ok,
        images_failed,
    }
}
