//! Collaborators around the voxel navigation core
//!
//! - **Colliders** sample occupancy while baking and describe obstacles that
//!   appear at runtime
//! - **Dynamic obstacles** queue collider changes and apply them to the
//!   `dynamic_blocked` flags of a grid between queries
//! - **Scene files** store bake parameters and static colliders as JSON
//! - **Path worker** runs queries on tokio's blocking pool, one at a time
//!
//! ```rust
//! use glam::Vec3;
//! use voxnav::BakeConfig;
//! use voxnav_dynamic::colliders::{BoxCollider, SerializableCollider};
//! use voxnav_dynamic::SceneFile;
//!
//! let scene = SceneFile::new(BakeConfig::new(Vec3::splat(4.0), Vec3::ZERO, 1.0))
//!     .with_collider(SerializableCollider::Box(BoxCollider::from_bounds(
//!         Vec3::new(1.0, 0.0, 0.0),
//!         Vec3::new(2.0, 4.0, 4.0),
//!     )));
//! let grid = scene.bake().unwrap();
//! assert_eq!(grid.blocked_count(), 16);
//! ```

pub mod colliders;
mod dynamic_obstacles;
mod scene;
mod worker;

pub use colliders::{
    BoxCollider, Collider, ColliderSet, ColliderType, CompositeCollider, SerializableCollider,
    SphereCollider,
};
pub use dynamic_obstacles::{DynamicObstacles, ObstacleJob};
pub use scene::SceneFile;
pub use worker::{PathTicket, PathWorker};
