//! Output directory layout.
//!
//! Every path is derived from the identifier alone (plus pose and expression
//! for previews), so concurrent tasks never write to the same file.

use std::path::{Path, PathBuf};

use super::render::{EXPRESSION, Pose};
use crate::parser::AvatarId;

/// Extension of the downloaded model file.
pub const MODEL_EXTENSION: &str = "glb";

/// Extension of rendered previews.
pub const IMAGE_EXTENSION: &str = "png";

/// `<root>/<id>`
#[must_use]
pub fn avatar_dir(root: &Path, id: &AvatarId) -> PathBuf {
    root.join(id.as_str())
}

/// `<root>/<id>/<id>.glb`
#[must_use]
pub fn model_path(root: &Path, id: &AvatarId) -> PathBuf {
    avatar_dir(root, id).join(format!("{id}.{MODEL_EXTENSION}"))
}

/// `<root>/<id>/<id>__pose-<pose>__expr-<expression>.png`
#[must_use]
pub fn image_path(root: &Path, id: &AvatarId, pose: Pose) -> PathBuf {
    avatar_dir(root, id).join(format!(
        "{id}__pose-{pose}__expr-{EXPRESSION}.{IMAGE_EXTENSION}"
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_model_path() {
        let id = AvatarId::parse("abc123").unwrap();
        assert_eq!(
            model_path(Path::new("/out"), &id),
            PathBuf::from("/out/abc123/abc123.glb")
        );
    }

    #[test]
    fn test_image_path() {
        let id = AvatarId::parse("abc123").unwrap();
        assert_eq!(
            image_path(Path::new("/out"), &id, Pose::PowerStance),
            PathBuf::from("/out/abc123/abc123__pose-power-stance__expr-happy.png")
        );
    }

    #[test]
    fn test_all_five_paths_are_distinct() {
        let id = AvatarId::parse("abc123").unwrap();
        let root = Path::new("out");
        let mut paths: HashSet<PathBuf> = Pose::ALL
            .iter()
            .map(|pose| image_path(root, &id, *pose))
            .collect();
        paths.insert(model_path(root, &id));
        assert_eq!(paths.len(), 5);
    }
}
