//! Path queries over baked voxel navigation grids
//!
//! Queries run in two phases. A greedy, angle-biased forward search grows a
//! raw sequence of cells from the start toward the destination, then a
//! hop-count pass over that sequence keeps only the waypoints needed to stay
//! on adjacent cells.
//!
//! ```rust
//! use glam::Vec3;
//! use voxnav::OpenSpace;
//! use voxnav_query::NavMesh3d;
//!
//! let mut nav = NavMesh3d::new();
//! nav.bake_centered(Vec3::splat(3.0), 1.0, &OpenSpace).unwrap();
//! let path = nav.get_path(Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
//! assert_eq!(path.first(), Some(&Vec3::splat(-1.0)));
//! assert_eq!(path.last(), Some(&Vec3::splat(1.0)));
//! ```

mod greedy_grower;
mod nav_grid_query;
mod nav_mesh3d;
mod path_node;
mod path_optimizer;
mod status;

mod parameter_validation_tests;

pub use greedy_grower::{growth_cost, GreedyPathGrower, GrowStep};
pub use nav_grid_query::{NavGridQuery, DEFAULT_MAX_CORNERS};
pub use nav_mesh3d::NavMesh3d;
pub use path_node::{
    NodeFlags, NodeIndex, PathNode, PathNodePool, MAX_NODE_NEIGHBORS, NULL_NODE,
};
pub use path_optimizer::PathOptimizer;
pub use status::{Result, Status};
