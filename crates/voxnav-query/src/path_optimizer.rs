//! Waypoint reduction over a grown node sequence
//!
//! The grown nodes are linked wherever their cells are grid neighbors, hop
//! counts to the destination are computed breadth-first, and the path is
//! read off by always stepping to the neighbor closest to the destination.

use std::collections::VecDeque;

use glam::Vec3;
use voxnav::{CellRef, VoxelGrid};

use crate::path_node::{NodeFlags, NodeIndex, PathNodePool};
use crate::status::{Result, Status};

/// Reduces grown node sequences to waypoint lists
#[derive(Debug, Default)]
pub struct PathOptimizer {
    queue: VecDeque<NodeIndex>,
}

impl PathOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the reduced path from the first node to `destination` into
    /// `corners`, returning the corner count
    ///
    /// `corners` is overwritten from the front and only grows; entries past
    /// the returned count are left untouched.
    pub fn optimize(
        &mut self,
        grid: &VoxelGrid,
        pool: &mut PathNodePool,
        destination: CellRef,
        corners: &mut Vec<Vec3>,
    ) -> Result<usize> {
        if pool.is_empty() {
            return Err(Status::NoPath);
        }
        let goal = pool.find(destination).ok_or(Status::NoPath)?;

        pool.reset_for_optimization();
        Self::link_adjacent(grid, pool);
        self.compute_steps(pool, goal);

        let mut count = 0;
        let mut current: NodeIndex = 0;
        if pool.node(current).steps.is_none() {
            return Err(Status::NoPath);
        }
        loop {
            Self::write_corner(corners, count, grid.cell(pool.node(current).cell).center);
            count += 1;
            if current == goal {
                break;
            }
            match Self::descend(pool, current) {
                Some(next) => current = next,
                None => {
                    log::warn!(
                        "Path backtrace stopped at cell {} before the destination",
                        pool.node(current).cell.id()
                    );
                    return Err(Status::NoPath);
                }
            }
        }

        Ok(count)
    }

    /// Links every pair of nodes whose cells are grid neighbors
    fn link_adjacent(grid: &VoxelGrid, pool: &mut PathNodePool) {
        let count = pool.len() as NodeIndex;
        for a in 0..count {
            let cell = grid.cell(pool.node(a).cell);
            for b in (a + 1)..count {
                if cell.is_neighbor(pool.node(b).cell) {
                    pool.link(a, b);
                }
            }
        }
    }

    /// Breadth-first hop counts from `goal`
    fn compute_steps(&mut self, pool: &mut PathNodePool, goal: NodeIndex) {
        self.queue.clear();
        pool.node_mut(goal).steps = Some(0);
        self.queue.push_back(goal);

        while let Some(idx) = self.queue.pop_front() {
            let node = pool.node_mut(idx);
            if node.is_checked() {
                continue;
            }
            node.flags.insert(NodeFlags::CHECKED);
            let next_steps = node.steps.unwrap_or(0) + 1;

            let count = pool.node(idx).neighbors().len();
            for i in 0..count {
                let neighbor = pool.node(idx).neighbors()[i];
                let other = pool.node_mut(neighbor);
                if other.steps.is_none() {
                    other.steps = Some(next_steps);
                    self.queue.push_back(neighbor);
                }
            }
        }
    }

    /// Neighbor with the smallest hop count below the current one
    fn descend(pool: &PathNodePool, current: NodeIndex) -> Option<NodeIndex> {
        let mut best = pool.node(current).steps?;
        let mut next = None;
        for &neighbor in pool.node(current).neighbors() {
            if let Some(steps) = pool.node(neighbor).steps {
                if steps < best {
                    best = steps;
                    next = Some(neighbor);
                }
            }
        }
        next
    }

    fn write_corner(corners: &mut Vec<Vec3>, index: usize, corner: Vec3) {
        if index < corners.len() {
            corners[index] = corner;
        } else {
            corners.push(corner);
        }
    }
}
