//! Voxel grid baking for free-flight navigation
//!
//! A volume is divided into a dense grid of cubic cells. Each cell records
//! whether it is blocked and links to all 26 surrounding cells, forming the
//! graph that path queries run on.
//!
//! ```rust
//! use glam::Vec3;
//! use voxnav::{BakeConfig, OpenSpace, VoxelGrid};
//!
//! let config = BakeConfig::centered(Vec3::splat(8.0), 1.0);
//! let grid = VoxelGrid::bake(config, &OpenSpace).unwrap();
//! assert_eq!(grid.cell_count(), 512);
//! ```

pub mod binary_format;
mod cell;
mod config;
mod context;
pub mod neighbors;
mod occupancy;
mod voxel_grid;

pub use binary_format::{
    grid_header_to_bytes, load_grid_header, read_grid_header, save_grid_header,
    write_grid_header, GRID_HEADER_SIZE,
};
pub use cell::{Cell, CellRef};
pub use config::BakeConfig;
pub use context::{BakeContext, LogEntry, LogLevel, ProgressInfo, TimerCategory};
pub use neighbors::{CELL_NEIGHBOR_COUNT, NEIGHBOR_OFFSETS, OPPOSITE_SLOT};
pub use occupancy::{OccupancySampler, OpenSpace};
pub use voxel_grid::VoxelGrid;
