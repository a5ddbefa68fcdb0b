//! Render parameters for the 2D preview endpoint.

use std::fmt;
use std::str::FromStr;

/// Smallest accepted render size in pixels.
pub const MIN_RENDER_SIZE: u16 = 1;

/// Largest accepted render size in pixels.
pub const MAX_RENDER_SIZE: u16 = 1024;

/// Default background color (`r,g,b`).
pub const DEFAULT_BACKGROUND: &str = "0,0,0";

/// Facial expression requested for every preview.
pub const EXPRESSION: &str = "happy";

/// Camera framing requested from the render endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Head and shoulders
    #[default]
    Portrait,
    /// Whole body
    Fullbody,
    /// Framed to fit the avatar bounds
    Fit,
}

impl CameraMode {
    /// Returns the query parameter value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Fullbody => "fullbody",
            Self::Fit => "fit",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CameraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "fullbody" => Ok(Self::Fullbody),
            "fit" => Ok(Self::Fit),
            other => Err(format!(
                "unknown camera mode '{other}' (expected portrait, fullbody or fit)"
            )),
        }
    }
}

/// Poses rendered for every avatar, in fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    PowerStance,
    Relaxed,
    Standing,
    ThumbsUp,
}

impl Pose {
    /// All poses, in the order they are fetched.
    pub const ALL: [Pose; 4] = [
        Pose::PowerStance,
        Pose::Relaxed,
        Pose::Standing,
        Pose::ThumbsUp,
    ];

    /// Returns the service name of the pose.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PowerStance => "power-stance",
            Self::Relaxed => "relaxed",
            Self::Standing => "standing",
            Self::ThumbsUp => "thumbs-up",
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters shared by every preview request in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams {
    size: u16,
    camera: CameraMode,
    background: String,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            size: MAX_RENDER_SIZE,
            camera: CameraMode::default(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl RenderParams {
    /// Creates render parameters, clamping `size` into `1..=1024`.
    #[must_use]
    pub fn new(size: i64, camera: CameraMode, background: impl Into<String>) -> Self {
        let clamped = size.clamp(i64::from(MIN_RENDER_SIZE), i64::from(MAX_RENDER_SIZE));
        Self {
            size: u16::try_from(clamped).unwrap_or(MAX_RENDER_SIZE),
            camera,
            background: background.into(),
        }
    }

    /// Render size in pixels.
    #[must_use]
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Camera framing.
    #[must_use]
    pub fn camera(&self) -> CameraMode {
        self.camera
    }

    /// Background color, passed through verbatim.
    #[must_use]
    pub fn background(&self) -> &str {
        &self.background
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_params_default() {
        let params = RenderParams::default();
        assert_eq!(params.size(), 1024);
        assert_eq!(params.camera(), CameraMode::Portrait);
        assert_eq!(params.background(), "0,0,0");
    }

    #[test]
    fn test_render_params_clamps_size() {
        assert_eq!(RenderParams::new(0, CameraMode::Fit, "1,2,3").size(), 1);
        assert_eq!(RenderParams::new(-50, CameraMode::Fit, "1,2,3").size(), 1);
        assert_eq!(RenderParams::new(4096, CameraMode::Fit, "1,2,3").size(), 1024);
        assert_eq!(RenderParams::new(512, CameraMode::Fit, "1,2,3").size(), 512);
    }

    #[test]
    fn test_camera_mode_from_str() {
        assert_eq!("portrait".parse::<CameraMode>().unwrap(), CameraMode::Portrait);
        assert_eq!("FullBody".parse::<CameraMode>().unwrap(), CameraMode::Fullbody);
        assert_eq!(" fit ".parse::<CameraMode>().unwrap(), CameraMode::Fit);
        assert!("closeup".parse::<CameraMode>().is_err());
    }

    #[test]
    fn test_pose_order_is_fixed() {
        let names: Vec<&str> = Pose::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            names,
            vec!["power-stance", "relaxed", "standing", "thumbs-up"]
        );
    }
}
