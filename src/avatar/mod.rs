//! Avatar-specific knowledge: where resources live remotely and where they land on disk.

mod endpoints;
pub mod layout;
mod render;

pub use endpoints::{
    DEFAULT_MODEL_BASE_URL, DEFAULT_RENDER_BASE_URL, EndpointError, ServiceEndpoints,
};
pub use render::{
    CameraMode, DEFAULT_BACKGROUND, EXPRESSION, MAX_RENDER_SIZE, MIN_RENDER_SIZE, Pose,
    RenderParams,
};
