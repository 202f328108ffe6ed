//! Configuration for the voxel grid baking process

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxnav_common::{Error, Result};

/// Parameters describing the volume covered by a voxel grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BakeConfig {
    /// Extent of the baked volume along each axis
    pub size: Vec3,
    /// Minimum corner of the baked volume
    pub origin: Vec3,
    /// Edge length of a single cubic cell
    pub cell_size: f32,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self::centered(Vec3::splat(10.0), 1.0)
    }
}

impl BakeConfig {
    /// Creates a configuration from explicit size, origin and cell size
    pub fn new(size: Vec3, origin: Vec3, cell_size: f32) -> Self {
        Self {
            size,
            origin,
            cell_size,
        }
    }

    /// Creates a configuration whose volume is centered on the world origin
    pub fn centered(size: Vec3, cell_size: f32) -> Self {
        Self::new(size, -size / 2.0, cell_size)
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        // Written as negated comparisons so NaN is rejected too.
        if !(self.cell_size > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }

        if !(self.size.x > 0.0 && self.size.y > 0.0 && self.size.z > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "grid size must be positive on every axis, got {:?}",
                self.size
            )));
        }

        Ok(())
    }

    /// Number of cells along each axis, `floor(size / cell_size)`
    pub fn grid_dims(&self) -> [usize; 3] {
        let dims = (self.size / self.cell_size).floor();
        [dims.x as usize, dims.y as usize, dims.z as usize]
    }

    /// Total number of cells the grid will allocate
    pub fn cell_count(&self) -> usize {
        let [x, y, z] = self.grid_dims();
        x * y * z
    }

    /// Maximum corner of the baked volume
    pub fn max_bounds(&self) -> Vec3 {
        self.origin + self.size
    }

    /// Serializes the configuration to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parses a configuration from JSON and validates it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
