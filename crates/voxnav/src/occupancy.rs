//! Occupancy sampling used while baking
//!
//! Baking never looks at world geometry directly. It asks a sampler, once per
//! cell, whether the axis-aligned box around the cell center is blocked.

use glam::Vec3;

/// Answers whether an axis-aligned box in world space is occupied
pub trait OccupancySampler {
    /// Checks the box centered at `center` with the given half extents
    fn is_blocked(&self, center: Vec3, half_extents: Vec3) -> bool;
}

impl<F> OccupancySampler for F
where
    F: Fn(Vec3, Vec3) -> bool,
{
    fn is_blocked(&self, center: Vec3, half_extents: Vec3) -> bool {
        self(center, half_extents)
    }
}

/// Sampler for an empty world; nothing is ever blocked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenSpace;

impl OccupancySampler for OpenSpace {
    fn is_blocked(&self, _center: Vec3, _half_extents: Vec3) -> bool {
        false
    }
}
