//! Bake-then-query driver for a single voxel grid
//!
//! [`NavMesh3d`] owns one grid together with the query scratch that runs on
//! it. Re-baking replaces the grid as a whole; `&mut self` on both baking and
//! path queries keeps the two from overlapping.

use glam::Vec3;
use voxnav::{
    grid_header_to_bytes, read_grid_header, BakeConfig, BakeContext, OccupancySampler, VoxelGrid,
};

use crate::nav_grid_query::NavGridQuery;
use crate::status::{Result, Status};

/// A voxel navigation grid plus its path query
#[derive(Debug, Default)]
pub struct NavMesh3d {
    grid: Option<VoxelGrid>,
    query: NavGridQuery,
}

impl NavMesh3d {
    /// Creates an empty driver; nothing can be queried until a bake
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already baked grid
    pub fn from_grid(grid: VoxelGrid) -> Self {
        Self {
            grid: Some(grid),
            query: NavGridQuery::new(),
        }
    }

    /// Bakes a new grid, replacing the current one on success
    pub fn bake<S>(&mut self, config: BakeConfig, sampler: &S) -> voxnav_common::Result<()>
    where
        S: OccupancySampler + ?Sized,
    {
        self.grid = Some(VoxelGrid::bake(config, sampler)?);
        Ok(())
    }

    /// Bakes a new grid while recording diagnostics into `context`
    pub fn bake_with_context<S>(
        &mut self,
        config: BakeConfig,
        sampler: &S,
        context: &mut BakeContext,
    ) -> voxnav_common::Result<()>
    where
        S: OccupancySampler + ?Sized,
    {
        self.grid = Some(VoxelGrid::bake_with_context(config, sampler, context)?);
        Ok(())
    }

    /// Bakes a grid of `size` centered on the world origin
    pub fn bake_centered<S>(
        &mut self,
        size: Vec3,
        cell_size: f32,
        sampler: &S,
    ) -> voxnav_common::Result<()>
    where
        S: OccupancySampler + ?Sized,
    {
        self.bake(BakeConfig::centered(size, cell_size), sampler)
    }

    /// Re-bakes from an encoded grid header
    pub fn load_header<S>(&mut self, data: &[u8], sampler: &S) -> voxnav_common::Result<()>
    where
        S: OccupancySampler + ?Sized,
    {
        let config = read_grid_header(data)?;
        self.bake(config, sampler)
    }

    /// Encodes the header of the current grid
    pub fn save_header(&self) -> voxnav_common::Result<Vec<u8>> {
        let config = self.bake_config().ok_or(Status::NotBaked)?;
        grid_header_to_bytes(config)
    }

    pub fn is_baked(&self) -> bool {
        self.grid.is_some()
    }

    pub fn grid(&self) -> Option<&VoxelGrid> {
        self.grid.as_ref()
    }

    /// Mutable grid access, used to update dynamic occupancy between queries
    pub fn grid_mut(&mut self) -> Option<&mut VoxelGrid> {
        self.grid.as_mut()
    }

    pub fn bake_config(&self) -> Option<&BakeConfig> {
        self.grid.as_ref().map(|grid| grid.config())
    }

    pub fn cell_count(&self) -> usize {
        self.grid.as_ref().map_or(0, |grid| grid.cell_count())
    }

    pub fn max_corners(&self) -> usize {
        self.query.max_corners()
    }

    /// Sets the corner budget; zero is ignored
    pub fn set_max_corners(&mut self, max_corners: usize) {
        self.query.set_max_corners(max_corners);
    }

    /// Finds a path between two world points
    pub fn get_path(&mut self, start: Vec3, end: Vec3) -> Result<Vec<Vec3>> {
        let grid = self.grid.as_ref().ok_or(Status::NotBaked)?;
        self.query.find_path(grid, start, end)
    }

    /// Finds a path into a caller-owned buffer, returning the corner count
    pub fn get_path_into(
        &mut self,
        start: Vec3,
        end: Vec3,
        corners: &mut Vec<Vec3>,
    ) -> Result<usize> {
        let grid = self.grid.as_ref().ok_or(Status::NotBaked)?;
        self.query.find_path_into(grid, start, end, corners)
    }
}
