//! Dense voxel grid with 26-connected adjacency

use glam::Vec3;
use voxnav_common::{round_half_even, Error, Result};

use crate::cell::{Cell, CellRef};
use crate::config::BakeConfig;
use crate::context::{BakeContext, TimerCategory};
use crate::neighbors::{FORWARD_SLOTS, NEIGHBOR_OFFSETS, OPPOSITE_SLOT};
use crate::occupancy::OccupancySampler;

/// Allocation, occupancy sampling and neighbor wiring
const BAKE_STAGES: usize = 3;

/// A baked grid of cells covering `config.size` from `config.origin`
///
/// Dimensions are fixed at bake time; changing them requires a new bake.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    config: BakeConfig,
    dims: [usize; 3],
    cells: Vec<Cell>,
}

impl VoxelGrid {
    /// Bakes a grid, sampling occupancy once per cell
    pub fn bake<S>(config: BakeConfig, sampler: &S) -> Result<Self>
    where
        S: OccupancySampler + ?Sized,
    {
        let mut context = BakeContext::new();
        context.set_timing_enabled(false);
        Self::bake_with_context(config, sampler, &mut context)
    }

    /// Bakes a grid, recording timings and diagnostics into `context`
    pub fn bake_with_context<S>(
        config: BakeConfig,
        sampler: &S,
        context: &mut BakeContext,
    ) -> Result<Self>
    where
        S: OccupancySampler + ?Sized,
    {
        if let Err(e) = config.validate() {
            context.log_error(format!("Rejected bake parameters: {}", e));
            return Err(e);
        }

        let dims = config.grid_dims();
        let count = dims[0]
            .checked_mul(dims[1])
            .and_then(|c| c.checked_mul(dims[2]))
            .filter(|c| *c <= u32::MAX as usize)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "grid of {}x{}x{} cells is too large",
                    dims[0], dims[1], dims[2]
                ))
            })?;

        if count == 0 {
            context.log_warning(format!(
                "Grid size {:?} is smaller than one cell of {}; the grid is empty",
                config.size, config.cell_size
            ));
        }

        context.start_timer(TimerCategory::Total);

        context.set_progress(1, BAKE_STAGES, "allocating cells");
        context.start_timer(TimerCategory::Allocation);
        let mut grid = Self {
            config,
            dims,
            cells: Vec::with_capacity(count),
        };
        for x in 0..dims[0] {
            for y in 0..dims[1] {
                for z in 0..dims[2] {
                    let index = CellRef::new(grid.cells.len() as u32);
                    let center = grid.cell_center(x, y, z);
                    grid.cells.push(Cell::new(index, center));
                }
            }
        }
        context.stop_timer(TimerCategory::Allocation);
        context.log_debug(format!("Allocated {} cells", count));

        context.set_progress(2, BAKE_STAGES, "sampling occupancy");
        context.start_timer(TimerCategory::Occupancy);
        let half_extents = Vec3::splat(config.cell_size * 0.5);
        let mut blocked = 0usize;
        for cell in &mut grid.cells {
            cell.static_blocked = sampler.is_blocked(cell.center, half_extents);
            if cell.static_blocked {
                blocked += 1;
            }
        }
        context.stop_timer(TimerCategory::Occupancy);
        context.log_debug(format!("Sampled occupancy, {} cells blocked", blocked));

        context.set_progress(3, BAKE_STAGES, "wiring neighbors");
        context.start_timer(TimerCategory::Adjacency);
        grid.wire_neighbors();
        context.stop_timer(TimerCategory::Adjacency);

        context.stop_timer(TimerCategory::Total);

        context.log_info(format!(
            "Baked voxel grid {}x{}x{} ({} cells, {} blocked, cell size {})",
            dims[0], dims[1], dims[2], count, blocked, config.cell_size
        ));

        Ok(grid)
    }

    /// World-space center of the cell at integer grid coordinates
    fn cell_center(&self, x: usize, y: usize, z: usize) -> Vec3 {
        let cs = self.config.cell_size;
        self.config.origin + (Vec3::new(x as f32, y as f32, z as f32) + 0.5) * cs
    }

    /// Links each cell to its forward neighbors and mirrors the link back
    fn wire_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let this = self.cells[i].index;
            let [x, y, z] = self.coords_of_index(i);
            for slot in FORWARD_SLOTS {
                let [dx, dy, dz] = NEIGHBOR_OFFSETS[slot];
                let Some(other) = self.cell_ref_at(x as i32 + dx, y as i32 + dy, z as i32 + dz)
                else {
                    continue;
                };
                self.cells[i].neighbors[slot] = Some(other);
                self.cells[other.index()].neighbors[OPPOSITE_SLOT[slot]] = Some(this);
            }
        }
    }

    fn coords_of_index(&self, index: usize) -> [usize; 3] {
        let [_, ny, nz] = self.dims;
        [index / (ny * nz), (index / nz) % ny, index % nz]
    }

    /// Gets the configuration the grid was baked with
    pub fn config(&self) -> &BakeConfig {
        &self.config
    }

    pub fn size(&self) -> Vec3 {
        self.config.size
    }

    pub fn origin(&self) -> Vec3 {
        self.config.origin
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    /// Number of cells along x, y and z
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells with either occupancy flag set
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Gets a cell by reference
    ///
    /// References handed out by this grid are always valid.
    #[inline]
    pub fn cell(&self, cell: CellRef) -> &Cell {
        &self.cells[cell.index()]
    }

    /// Gets a cell by reference, returning `None` for foreign references
    pub fn get_cell(&self, cell: CellRef) -> Option<&Cell> {
        self.cells.get(cell.index())
    }

    /// Integer grid coordinates of a cell
    pub fn cell_coords(&self, cell: CellRef) -> [usize; 3] {
        self.coords_of_index(cell.index())
    }

    /// Reference to the cell at integer grid coordinates
    pub fn cell_ref_at(&self, x: i32, y: i32, z: i32) -> Option<CellRef> {
        let [nx, ny, nz] = self.dims;
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= nx || y >= ny || z >= nz {
            return None;
        }
        Some(CellRef::new((x * ny * nz + y * nz + z) as u32))
    }

    /// Cell at integer grid coordinates, or `None` when out of bounds
    pub fn lookup(&self, x: i32, y: i32, z: i32) -> Option<&Cell> {
        self.cell_ref_at(x, y, z).map(|r| self.cell(r))
    }

    /// Grid coordinates a world point resolves to
    ///
    /// Each axis of `(point - origin) / cell_size` is rounded to the nearest
    /// integer with exact halves going to the even neighbor. Points near a
    /// cell boundary may therefore resolve to either adjacent cell.
    pub fn point_to_coords(&self, point: Vec3) -> [i32; 3] {
        let local = (point - self.config.origin) / self.config.cell_size;
        [
            round_half_even(local.x),
            round_half_even(local.y),
            round_half_even(local.z),
        ]
    }

    /// Reference to the cell a world point resolves to
    pub fn cell_ref_at_point(&self, point: Vec3) -> Option<CellRef> {
        if !point.is_finite() {
            return None;
        }
        let [x, y, z] = self.point_to_coords(point);
        self.cell_ref_at(x, y, z)
    }

    /// Cell a world point resolves to, or `None` when outside the grid
    pub fn lookup_point(&self, point: Vec3) -> Option<&Cell> {
        self.cell_ref_at_point(point).map(|r| self.cell(r))
    }

    /// Checks whether two cells are 26-neighbors
    pub fn are_adjacent(&self, a: CellRef, b: CellRef) -> bool {
        self.get_cell(a).is_some_and(|cell| cell.is_neighbor(b))
    }

    /// Sets the dynamic occupancy flag of a cell
    ///
    /// Returns whether the flag changed.
    pub fn set_dynamic_blocked(&mut self, cell: CellRef, blocked: bool) -> Result<bool> {
        let count = self.cells.len();
        let cell = self.cells.get_mut(cell.index()).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "cell {} is outside a grid of {} cells",
                cell.id(),
                count
            ))
        })?;
        let changed = cell.dynamic_blocked != blocked;
        cell.dynamic_blocked = blocked;
        Ok(changed)
    }

    /// Clears every dynamic occupancy flag
    pub fn clear_dynamic_blocked(&mut self) {
        for cell in &mut self.cells {
            cell.dynamic_blocked = false;
        }
    }

    /// Cells whose boxes overlap the world-space box `[min, max]`
    pub fn cells_in_bounds(&self, min: Vec3, max: Vec3) -> Vec<CellRef> {
        let mut result = Vec::new();
        if self.cells.is_empty() {
            return result;
        }

        let cs = self.config.cell_size;
        let lo = ((min - self.config.origin) / cs).floor();
        let hi = ((max - self.config.origin) / cs).floor();
        let clamp_axis = |v: f32, n: usize| -> i64 { (v as i64).clamp(0, n as i64 - 1) };

        if hi.x < 0.0 || hi.y < 0.0 || hi.z < 0.0 {
            return result;
        }
        if lo.x >= self.dims[0] as f32 || lo.y >= self.dims[1] as f32 || lo.z >= self.dims[2] as f32
        {
            return result;
        }

        let (x0, x1) = (clamp_axis(lo.x, self.dims[0]), clamp_axis(hi.x, self.dims[0]));
        let (y0, y1) = (clamp_axis(lo.y, self.dims[1]), clamp_axis(hi.y, self.dims[1]));
        let (z0, z1) = (clamp_axis(lo.z, self.dims[2]), clamp_axis(hi.z, self.dims[2]));

        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    if let Some(r) = self.cell_ref_at(x as i32, y as i32, z as i32) {
                        result.push(r);
                    }
                }
            }
        }
        result
    }

    /// Checks whether a world point lies inside the baked volume
    pub fn contains_point(&self, point: Vec3) -> bool {
        let max = self.config.max_bounds();
        point.cmpge(self.config.origin).all() && point.cmple(max).all()
    }
}
