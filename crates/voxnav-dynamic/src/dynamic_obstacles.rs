//! Runtime obstacles that toggle the dynamic occupancy of grid cells
//!
//! Adding or removing a collider only queues a job. [`DynamicObstacles::update`]
//! applies the queue between path queries and recomputes `dynamic_blocked`
//! for the cells the changed colliders cover.

use glam::Vec3;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use voxnav::{CellRef, VoxelGrid};
use voxnav_common::{Error, Result};

use crate::colliders::{bounds_overlap_box, Collider};

/// Queued change to the obstacle set
pub enum ObstacleJob {
    Add {
        collider_id: u64,
        collider: Arc<dyn Collider>,
    },
    Remove {
        collider_id: u64,
    },
}

impl ObstacleJob {
    /// Get a description of this job for debugging
    pub fn description(&self) -> String {
        match self {
            ObstacleJob::Add { collider_id, .. } => format!("Add collider {}", collider_id),
            ObstacleJob::Remove { collider_id } => format!("Remove collider {}", collider_id),
        }
    }
}

/// Registry of dynamic colliders and their pending jobs
pub struct DynamicObstacles {
    colliders: HashMap<u64, Arc<dyn Collider>>,
    job_queue: Vec<ObstacleJob>,
    next_collider_id: u64,
    /// Update counter for change tracking
    update_counter: u64,
}

impl Default for DynamicObstacles {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicObstacles {
    pub fn new() -> Self {
        Self {
            colliders: HashMap::new(),
            job_queue: Vec::new(),
            next_collider_id: 1,
            update_counter: 0,
        }
    }

    /// Queues a collider for addition and returns its id
    pub fn add_collider(&mut self, collider: Arc<dyn Collider>) -> u64 {
        let collider_id = self.next_collider_id;
        self.next_collider_id += 1;
        self.job_queue.push(ObstacleJob::Add {
            collider_id,
            collider,
        });
        collider_id
    }

    /// Queues removal of a collider
    ///
    /// Fails if the id was never handed out by [`DynamicObstacles::add_collider`].
    pub fn remove_collider(&mut self, collider_id: u64) -> Result<()> {
        if collider_id == 0 || collider_id >= self.next_collider_id {
            return Err(Error::InvalidParameter(format!(
                "unknown collider id {}",
                collider_id
            )));
        }
        self.job_queue.push(ObstacleJob::Remove { collider_id });
        Ok(())
    }

    /// Number of colliders applied to the grid
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn collider(&self, collider_id: u64) -> Option<&Arc<dyn Collider>> {
        self.colliders.get(&collider_id)
    }

    pub fn has_pending_updates(&self) -> bool {
        !self.job_queue.is_empty()
    }

    pub fn pending_job_count(&self) -> usize {
        self.job_queue.len()
    }

    pub fn update_counter(&self) -> u64 {
        self.update_counter
    }

    /// Applies queued jobs and refreshes the cells they touch
    ///
    /// Returns whether any cell changed its dynamic occupancy.
    pub fn update(&mut self, grid: &mut VoxelGrid) -> Result<bool> {
        if self.job_queue.is_empty() {
            return Ok(false);
        }

        let mut affected = BTreeSet::new();
        for job in std::mem::take(&mut self.job_queue) {
            log::debug!("{}", job.description());
            match job {
                ObstacleJob::Add {
                    collider_id,
                    collider,
                } => {
                    affected.extend(Self::cells_under(grid, collider.as_ref()));
                    self.colliders.insert(collider_id, collider);
                }
                ObstacleJob::Remove { collider_id } => {
                    match self.colliders.remove(&collider_id) {
                        Some(collider) => {
                            affected.extend(Self::cells_under(grid, collider.as_ref()))
                        }
                        None => log::warn!("Collider {} was already removed", collider_id),
                    }
                }
            }
        }

        let mut changed = 0usize;
        for cell in affected {
            let blocked = self.is_covered(grid, cell);
            if grid.set_dynamic_blocked(cell, blocked)? {
                changed += 1;
            }
        }

        self.update_counter += 1;
        log::debug!(
            "Obstacle update {} changed {} cells, {} colliders active",
            self.update_counter,
            changed,
            self.colliders.len()
        );
        Ok(changed > 0)
    }

    /// Recomputes dynamic occupancy of every cell from the applied colliders
    ///
    /// Needed after a re-bake, which starts with all dynamic flags cleared.
    pub fn rebuild(&self, grid: &mut VoxelGrid) -> Result<()> {
        grid.clear_dynamic_blocked();
        for collider in self.colliders.values() {
            for cell in Self::cells_under(grid, collider.as_ref()) {
                if self.is_covered(grid, cell) {
                    grid.set_dynamic_blocked(cell, true)?;
                }
            }
        }
        Ok(())
    }

    /// Candidate cells whose boxes may intersect the collider bounds
    fn cells_under(grid: &VoxelGrid, collider: &dyn Collider) -> Vec<CellRef> {
        let (min, max) = collider.bounds();
        grid.cells_in_bounds(min, max)
    }

    fn is_covered(&self, grid: &VoxelGrid, cell: CellRef) -> bool {
        let center = grid.cell(cell).center;
        let half_extents = Vec3::splat(grid.cell_size() * 0.5);
        self.colliders.values().any(|collider| {
            bounds_overlap_box(collider.as_ref(), center, half_extents)
                && collider.overlaps_box(center, half_extents)
        })
    }
}
