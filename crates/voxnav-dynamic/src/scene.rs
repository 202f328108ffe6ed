//! JSON scene files describing a bake and its static colliders

use serde::{Deserialize, Serialize};
use std::path::Path;
use voxnav::{BakeConfig, BakeContext, VoxelGrid};
use voxnav_common::{Error, Result};

use crate::colliders::{ColliderSet, SerializableCollider};

/// Bake parameters plus the static geometry sampled during the bake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub bake: BakeConfig,
    #[serde(default)]
    pub colliders: Vec<SerializableCollider>,
    /// Corner budget for queries on this scene, if it differs from the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_corners: Option<usize>,
}

impl SceneFile {
    pub fn new(bake: BakeConfig) -> Self {
        Self {
            bake,
            colliders: Vec::new(),
            max_corners: None,
        }
    }

    pub fn with_collider(mut self, collider: SerializableCollider) -> Self {
        self.colliders.push(collider);
        self
    }

    /// Occupancy sampler built from the scene colliders
    pub fn collider_set(&self) -> ColliderSet {
        ColliderSet::from_serializable(self.colliders.clone())
    }

    /// Bakes the scene
    pub fn bake(&self) -> Result<VoxelGrid> {
        VoxelGrid::bake(self.bake, &self.collider_set())
    }

    /// Bakes the scene, recording diagnostics into `context`
    pub fn bake_with_context(&self, context: &mut BakeContext) -> Result<VoxelGrid> {
        VoxelGrid::bake_with_context(self.bake, &self.collider_set(), context)
    }

    /// Parses and validates a scene
    pub fn from_json(json: &str) -> Result<Self> {
        let scene: SceneFile = serde_json::from_str(json)
            .map_err(|e| Error::Serialization(format!("invalid scene file: {}", e)))?;
        scene.bake.validate()?;
        if scene.max_corners == Some(0) {
            return Err(Error::InvalidParameter(
                "max_corners must be at least 1".to_string(),
            ));
        }
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colliders::{BoxCollider, SphereCollider};
    use glam::Vec3;
    use tempfile::NamedTempFile;

    fn scene() -> SceneFile {
        SceneFile::new(BakeConfig::new(Vec3::new(6.0, 3.0, 6.0), Vec3::ZERO, 1.0))
            .with_collider(SerializableCollider::Box(BoxCollider::from_bounds(
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(3.0, 3.0, 6.0),
            )))
            .with_collider(SerializableCollider::Sphere(SphereCollider::new(
                Vec3::new(5.5, 2.5, 5.5),
                0.3,
            )))
    }

    #[test]
    fn test_scene_bake() {
        let grid = scene().bake().unwrap();
        assert_eq!(grid.dims(), [6, 3, 6]);
        // Wall slab x = 2 is 3x6 cells, the sphere blocks one more
        assert_eq!(grid.blocked_count(), 18 + 1);
        assert!(grid.lookup(2, 1, 3).unwrap().static_blocked);
        assert!(!grid.lookup(1, 1, 3).unwrap().static_blocked);
    }

    #[test]
    fn test_scene_file_round_trip() {
        let mut scene = scene();
        scene.max_corners = Some(200);
        let file = NamedTempFile::new().unwrap();
        scene.save(file.path()).unwrap();
        assert_eq!(SceneFile::load(file.path()).unwrap(), scene);
    }

    #[test]
    fn test_minimal_json() {
        let json = r#"{ "bake": { "size": [4.0, 4.0, 4.0], "origin": [-2.0, -2.0, -2.0], "cell_size": 0.5 } }"#;
        let scene = SceneFile::from_json(json).unwrap();
        assert!(scene.colliders.is_empty());
        assert_eq!(scene.max_corners, None);
        assert_eq!(scene.bake().unwrap().cell_count(), 512);
    }

    #[test]
    fn test_rejects_invalid_scene() {
        assert!(matches!(
            SceneFile::from_json("{ not json"),
            Err(Error::Serialization(_))
        ));

        let zero_cell = r#"{ "bake": { "size": [4.0, 4.0, 4.0], "origin": [0.0, 0.0, 0.0], "cell_size": 0.0 } }"#;
        assert!(matches!(
            SceneFile::from_json(zero_cell),
            Err(Error::InvalidParameter(_))
        ));

        let zero_budget = r#"{ "bake": { "size": [4.0, 4.0, 4.0], "origin": [0.0, 0.0, 0.0], "cell_size": 1.0 }, "max_corners": 0 }"#;
        assert!(matches!(
            SceneFile::from_json(zero_budget),
            Err(Error::InvalidParameter(_))
        ));
    }
}
