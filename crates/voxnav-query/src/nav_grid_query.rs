//! Path queries over a baked voxel grid
//!
//! A query resolves both endpoints to cells, grows a raw node sequence with
//! [`GreedyPathGrower`] and reduces it with [`PathOptimizer`]. Scratch
//! buffers live in the query object and are reused between calls, so a
//! query object serves one path request at a time.

use glam::Vec3;
use voxnav::{CellRef, VoxelGrid};

use crate::greedy_grower::GreedyPathGrower;
use crate::path_node::PathNodePool;
use crate::path_optimizer::PathOptimizer;
use crate::status::{Result, Status};

/// Default limit on grown nodes per query
pub const DEFAULT_MAX_CORNERS: usize = 1000;

/// Reusable path query state
#[derive(Debug)]
pub struct NavGridQuery {
    pool: PathNodePool,
    optimizer: PathOptimizer,
    max_corners: usize,
}

impl Default for NavGridQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl NavGridQuery {
    /// Creates a query with the default corner budget
    pub fn new() -> Self {
        Self {
            pool: PathNodePool::new(Self::pool_size(DEFAULT_MAX_CORNERS)),
            optimizer: PathOptimizer::new(),
            max_corners: DEFAULT_MAX_CORNERS,
        }
    }

    /// Creates a query with an explicit corner budget
    pub fn with_max_corners(max_corners: usize) -> Result<Self> {
        if max_corners == 0 {
            return Err(Status::InvalidParam);
        }
        let mut query = Self::new();
        query.set_max_corners(max_corners);
        Ok(query)
    }

    pub fn max_corners(&self) -> usize {
        self.max_corners
    }

    /// Sets the corner budget; zero is ignored
    pub fn set_max_corners(&mut self, max_corners: usize) {
        if max_corners == 0 {
            log::warn!("Ignoring corner budget of 0, keeping {}", self.max_corners);
            return;
        }
        if max_corners != self.max_corners {
            self.max_corners = max_corners;
            self.pool = PathNodePool::new(Self::pool_size(max_corners));
        }
    }

    /// The grown budget plus the destination node
    fn pool_size(max_corners: usize) -> usize {
        max_corners.saturating_add(1)
    }

    /// Finds a path between two world points
    ///
    /// Returns the cell centers to visit, from the cell `start` resolves to
    /// through the cell `end` resolves to.
    pub fn find_path(&mut self, grid: &VoxelGrid, start: Vec3, end: Vec3) -> Result<Vec<Vec3>> {
        let mut corners = Vec::new();
        let count = self.find_path_into(grid, start, end, &mut corners)?;
        corners.truncate(count);
        Ok(corners)
    }

    /// Finds a path, writing corners into a caller-owned buffer
    ///
    /// The buffer is overwritten from the front and grown when needed but
    /// never truncated; only the first `count` entries belong to this path.
    pub fn find_path_into(
        &mut self,
        grid: &VoxelGrid,
        start: Vec3,
        end: Vec3,
        corners: &mut Vec<Vec3>,
    ) -> Result<usize> {
        let origin = Self::resolve(grid, start, "start")?;
        let target = Self::resolve(grid, end, "end")?;
        self.find_path_between(grid, origin, target, corners)
    }

    /// Finds a path between two cells
    pub fn find_path_between(
        &mut self,
        grid: &VoxelGrid,
        origin: CellRef,
        target: CellRef,
        corners: &mut Vec<Vec3>,
    ) -> Result<usize> {
        if grid.get_cell(origin).is_none() || grid.get_cell(target).is_none() {
            return Err(Status::InvalidParam);
        }
        if grid.cell(target).is_blocked() {
            log::debug!("No path: destination cell {} is blocked", target.id());
            return Err(Status::NoPath);
        }

        self.pool.clear();
        let mut grower = GreedyPathGrower::new(origin, target, self.max_corners);
        if let Err(status) = grower.run(grid, &mut self.pool) {
            log::debug!(
                "Path growth from cell {} to cell {} failed after {} nodes: {}",
                origin.id(),
                target.id(),
                grower.grown_count(),
                status
            );
            return Err(status);
        }

        let count = self
            .optimizer
            .optimize(grid, &mut self.pool, target, corners)?;
        log::debug!(
            "Found path from cell {} to cell {}: {} nodes grown, {} corners",
            origin.id(),
            target.id(),
            grower.grown_count(),
            count
        );
        Ok(count)
    }

    fn resolve(grid: &VoxelGrid, point: Vec3, label: &str) -> Result<CellRef> {
        grid.cell_ref_at_point(point).ok_or_else(|| {
            log::debug!("Path {} point {} is outside the grid", label, point);
            Status::OutOfBounds
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnav::{BakeConfig, OpenSpace};

    #[test]
    fn test_budget_configuration() {
        let mut query = NavGridQuery::new();
        assert_eq!(query.max_corners(), DEFAULT_MAX_CORNERS);

        query.set_max_corners(0);
        assert_eq!(query.max_corners(), DEFAULT_MAX_CORNERS);

        query.set_max_corners(16);
        assert_eq!(query.max_corners(), 16);

        assert!(matches!(
            NavGridQuery::with_max_corners(0),
            Err(Status::InvalidParam)
        ));
        assert_eq!(NavGridQuery::with_max_corners(3).unwrap().max_corners(), 3);
    }

    #[test]
    fn test_reuses_buffer_without_truncating() {
        let config = BakeConfig::new(Vec3::new(4.0, 1.0, 1.0), Vec3::ZERO, 1.0);
        let grid = VoxelGrid::bake(config, &OpenSpace).unwrap();
        let mut query = NavGridQuery::new();

        let mut corners = vec![Vec3::splat(99.0); 8];
        let start = grid.cell(CellRef::new(0)).center;
        let count = query
            .find_path_into(&grid, start, start, &mut corners)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(corners.len(), 8);
        assert_eq!(corners[0], start);
        assert_eq!(corners[1], Vec3::splat(99.0));
    }

    #[test]
    fn test_rejects_foreign_cells() {
        let config = BakeConfig::new(Vec3::splat(2.0), Vec3::ZERO, 1.0);
        let grid = VoxelGrid::bake(config, &OpenSpace).unwrap();
        let mut query = NavGridQuery::new();
        let mut corners = Vec::new();
        assert_eq!(
            query.find_path_between(&grid, CellRef::new(0), CellRef::new(8), &mut corners),
            Err(Status::InvalidParam)
        );
    }
}
