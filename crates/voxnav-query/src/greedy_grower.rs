//! Greedy forward growth of a raw node sequence toward the destination
//!
//! Each step picks the cheapest open node as the frontier and appends the
//! neighbor cell that best trades distance against deviation from the
//! straight line. Nodes with nothing left to explore are closed, which is
//! how the search backs out of dead ends.

use glam::Vec3;
use voxnav::{CellRef, VoxelGrid};
use voxnav_common::angle_deg;

use crate::path_node::{NodeFlags, NodeIndex, PathNodePool};
use crate::status::{Result, Status};

/// Outcome of a single growth step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowStep {
    /// A node was appended; call again
    Continue,
    /// The destination has been added to the sequence
    Complete,
    /// Every node is closed and the destination was not reached
    Stalled,
}

/// Cost of stepping to `candidate` from `from` while heading for `target`
pub fn growth_cost(from: Vec3, candidate: Vec3, target: Vec3, cell_size: f32) -> f32 {
    let deviation = angle_deg(candidate - from, target - from);
    candidate.distance(target) + deviation / 90.0 * cell_size
}

/// Grows a node sequence from `origin` to `target`
#[derive(Debug, Clone)]
pub struct GreedyPathGrower {
    origin: CellRef,
    target: CellRef,
    max_corners: usize,
    grown: usize,
}

impl GreedyPathGrower {
    /// Creates a grower that may grow at most `max_corners` nodes
    pub fn new(origin: CellRef, target: CellRef, max_corners: usize) -> Self {
        Self {
            origin,
            target,
            max_corners,
            grown: 0,
        }
    }

    pub fn origin(&self) -> CellRef {
        self.origin
    }

    pub fn target(&self) -> CellRef {
        self.target
    }

    /// Number of nodes grown so far, excluding the destination node
    pub fn grown_count(&self) -> usize {
        self.grown
    }

    /// Runs growth to completion
    ///
    /// Fails with [`Status::NoPath`] if the search stalls and with
    /// [`Status::CornerBudgetExceeded`] if it outgrows the budget.
    pub fn run(&mut self, grid: &VoxelGrid, pool: &mut PathNodePool) -> Result<()> {
        loop {
            match self.grow(grid, pool)? {
                GrowStep::Continue => {}
                GrowStep::Complete => return Ok(()),
                GrowStep::Stalled => return Err(Status::NoPath),
            }
        }
    }

    /// Performs one growth step
    pub fn grow(&mut self, grid: &VoxelGrid, pool: &mut PathNodePool) -> Result<GrowStep> {
        if self.origin == self.target {
            if pool.is_empty() {
                self.append(pool, self.origin, 0.0)?;
            }
            return Ok(GrowStep::Complete);
        }

        let target_center = grid.cell(self.target).center;

        if pool.is_empty() {
            let weight = grid.cell(self.origin).center.distance(target_center);
            self.append(pool, self.origin, weight)?;
            return Ok(GrowStep::Continue);
        }

        let Some(frontier) = self.select_frontier(grid, pool) else {
            return Ok(GrowStep::Stalled);
        };
        let frontier_cell = grid.cell(pool.node(frontier).cell);

        if frontier_cell.is_neighbor(self.target) {
            pool.push(self.target, 0.0).ok_or_else(|| self.budget_exceeded())?;
            return Ok(GrowStep::Complete);
        }

        let from = frontier_cell.center;
        let cell_size = grid.cell_size();
        let mut best: Option<(CellRef, f32)> = None;
        for candidate in frontier_cell.neighbor_refs() {
            if !Self::is_live(grid, pool, candidate) {
                continue;
            }
            let cost = growth_cost(from, grid.cell(candidate).center, target_center, cell_size);
            if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((candidate, cost));
            }
        }

        match best {
            Some((cell, weight)) => {
                self.append(pool, cell, weight)?;
                Ok(GrowStep::Continue)
            }
            // Unreachable while select_frontier only returns nodes with a live neighbor
            None => Ok(GrowStep::Stalled),
        }
    }

    /// Finds the open node with the lowest weight, closing exhausted nodes
    /// on the way. Ties keep the earlier node.
    fn select_frontier(&self, grid: &VoxelGrid, pool: &mut PathNodePool) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, f32)> = None;

        for idx in 0..pool.len() as NodeIndex {
            let node = pool.node(idx);
            if node.is_closed() {
                continue;
            }
            if let Some((_, best_weight)) = best {
                if node.weight >= best_weight {
                    continue;
                }
            }

            let (cell, weight) = (node.cell, node.weight);
            if grid
                .cell(cell)
                .neighbor_refs()
                .any(|n| Self::is_live(grid, pool, n))
            {
                best = Some((idx, weight));
            } else {
                pool.node_mut(idx).flags.insert(NodeFlags::CLOSED);
            }
        }

        best.map(|(idx, _)| idx)
    }

    /// A cell growth may still step into
    fn is_live(grid: &VoxelGrid, pool: &PathNodePool, cell: CellRef) -> bool {
        !grid.cell(cell).is_blocked() && !pool.contains_cell(cell)
    }

    fn append(&mut self, pool: &mut PathNodePool, cell: CellRef, weight: f32) -> Result<NodeIndex> {
        self.grown += 1;
        if self.grown > self.max_corners {
            return Err(self.budget_exceeded());
        }
        pool.push(cell, weight).ok_or_else(|| self.budget_exceeded())
    }

    fn budget_exceeded(&self) -> Status {
        log::error!(
            "Path growth from cell {} to cell {} exceeded the corner budget of {}",
            self.origin.id(),
            self.target.id(),
            self.max_corners
        );
        Status::CornerBudgetExceeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnav::{BakeConfig, OpenSpace};

    fn line_grid(len: f32) -> VoxelGrid {
        let config = BakeConfig::new(Vec3::new(len, 1.0, 1.0), Vec3::ZERO, 1.0);
        VoxelGrid::bake(config, &OpenSpace).unwrap()
    }

    #[test]
    fn test_growth_cost_prefers_straight_line() {
        let from = Vec3::ZERO;
        let target = Vec3::new(4.0, 0.0, 0.0);
        let straight = growth_cost(from, Vec3::X, target, 1.0);
        let diagonal = growth_cost(from, Vec3::new(1.0, 1.0, 0.0), target, 1.0);
        assert!((straight - 3.0).abs() < 1e-5);
        assert!(diagonal > straight);
    }

    #[test]
    fn test_same_cell_completes_immediately() {
        let grid = line_grid(3.0);
        let cell = CellRef::new(1);
        let mut pool = PathNodePool::new(4);
        let mut grower = GreedyPathGrower::new(cell, cell, 4);
        assert_eq!(grower.grow(&grid, &mut pool), Ok(GrowStep::Complete));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.node(0).weight, 0.0);
    }

    #[test]
    fn test_grows_along_corridor() {
        let grid = line_grid(5.0);
        let mut pool = PathNodePool::new(8);
        let mut grower = GreedyPathGrower::new(CellRef::new(0), CellRef::new(4), 8);

        assert_eq!(grower.grow(&grid, &mut pool), Ok(GrowStep::Continue));
        assert_eq!(pool.node(0).weight, 4.0);

        grower.run(&grid, &mut pool).unwrap();
        let cells: Vec<u32> = pool.nodes().iter().map(|n| n.cell.id()).collect();
        assert_eq!(cells, vec![0, 1, 2, 3, 4]);
        assert_eq!(grower.grown_count(), 4);
    }

    #[test]
    fn test_stalls_when_walled_off() {
        let config = BakeConfig::new(Vec3::new(3.0, 1.0, 1.0), Vec3::ZERO, 1.0);
        let wall = |c: Vec3, _h: Vec3| (c.x - 1.5).abs() < 0.1;
        let grid = VoxelGrid::bake(config, &wall).unwrap();

        let mut pool = PathNodePool::new(8);
        let mut grower = GreedyPathGrower::new(CellRef::new(0), CellRef::new(2), 8);
        assert_eq!(grower.run(&grid, &mut pool), Err(Status::NoPath));
        assert!(pool.node(0).is_closed());
    }

    #[test]
    fn test_budget_exceeded() {
        let grid = line_grid(6.0);
        let mut pool = PathNodePool::new(16);
        let mut grower = GreedyPathGrower::new(CellRef::new(0), CellRef::new(5), 2);
        assert_eq!(
            grower.run(&grid, &mut pool),
            Err(Status::CornerBudgetExceeded)
        );
    }

    #[test]
    fn test_budget_counts_seed_but_not_destination() {
        // Cells 0..=3 are grown, the destination node is free
        let grid = line_grid(5.0);
        let (origin, target) = (CellRef::new(0), CellRef::new(4));

        let mut pool = PathNodePool::new(5);
        let mut grower = GreedyPathGrower::new(origin, target, 4);
        assert_eq!(grower.run(&grid, &mut pool), Ok(()));
        assert_eq!(grower.grown_count(), 4);
        assert_eq!(pool.len(), 5);

        let mut pool = PathNodePool::new(4);
        let mut grower = GreedyPathGrower::new(origin, target, 3);
        assert_eq!(
            grower.run(&grid, &mut pool),
            Err(Status::CornerBudgetExceeded)
        );
    }

    #[test]
    fn test_backs_out_of_dead_end() {
        // A 4x1x3 slab with a wall at x=2 leaving only the top-z row open
        let config = BakeConfig::new(Vec3::new(4.0, 1.0, 3.0), Vec3::ZERO, 1.0);
        let wall = |c: Vec3, _h: Vec3| (c.x - 2.5).abs() < 0.1 && c.z < 2.0;
        let grid = VoxelGrid::bake(config, &wall).unwrap();

        let origin = grid.cell_ref_at(0, 0, 0).unwrap();
        let target = grid.cell_ref_at(3, 0, 0).unwrap();
        let mut pool = PathNodePool::new(32);
        let mut grower = GreedyPathGrower::new(origin, target, 32);
        grower.run(&grid, &mut pool).unwrap();

        let last = pool.nodes().last().unwrap();
        assert_eq!(last.cell, target);
        for node in pool.nodes() {
            assert!(!grid.cell(node.cell).is_blocked());
        }
    }
}
