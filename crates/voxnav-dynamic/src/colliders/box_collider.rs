//! Axis-aligned box collider

use super::{Collider, ColliderType};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxnav_common::aabb_overlap;

/// An axis-aligned box defined by its center and half extents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    /// Center of the box in world coordinates
    pub center: Vec3,
    /// Half-extents of the box (distance from center to face)
    pub half_extents: Vec3,
}

impl BoxCollider {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Create a box from minimum and maximum coordinates
    pub fn from_bounds(min: Vec3, max: Vec3) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Check if a point is inside this box
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let local = (*point - self.center).abs();
        local.cmple(self.half_extents).all()
    }
}

impl Collider for BoxCollider {
    fn bounds(&self) -> (Vec3, Vec3) {
        (self.min(), self.max())
    }

    fn contains_point(&self, point: &Vec3) -> bool {
        self.contains_point(point)
    }

    fn overlaps_box(&self, center: Vec3, half_extents: Vec3) -> bool {
        aabb_overlap(
            self.min(),
            self.max(),
            center - half_extents,
            center + half_extents,
        )
    }

    fn collider_type(&self) -> ColliderType {
        ColliderType::Box
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
