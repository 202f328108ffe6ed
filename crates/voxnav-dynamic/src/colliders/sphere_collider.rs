//! Sphere collider

use super::{Collider, ColliderType};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxnav_common::closest_point_on_aabb;

/// A spherical collider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereCollider {
    /// Center of the sphere in world coordinates
    pub center: Vec3,
    /// Radius of the sphere
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Check if a point is inside this sphere
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let distance_sq = (*point - self.center).length_squared();
        distance_sq <= self.radius * self.radius
    }
}

impl Collider for SphereCollider {
    fn bounds(&self) -> (Vec3, Vec3) {
        let r = Vec3::splat(self.radius);
        (self.center - r, self.center + r)
    }

    fn contains_point(&self, point: &Vec3) -> bool {
        self.contains_point(point)
    }

    fn overlaps_box(&self, center: Vec3, half_extents: Vec3) -> bool {
        let closest =
            closest_point_on_aabb(self.center, center - half_extents, center + half_extents);
        closest.distance_squared(self.center) < self.radius * self.radius
    }

    fn collider_type(&self) -> ColliderType {
        ColliderType::Sphere
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_collider() {
        let sphere = SphereCollider::new(Vec3::new(1.0, 1.0, 1.0), 2.0);
        assert!(sphere.contains_point(&Vec3::new(1.0, 1.0, 1.0)));
        assert!(sphere.contains_point(&Vec3::new(3.0, 1.0, 1.0)));
        assert!(!sphere.contains_point(&Vec3::new(3.1, 1.0, 1.0)));
        assert_eq!(sphere.bounds(), (Vec3::splat(-1.0), Vec3::splat(3.0)));
    }

    #[test]
    fn test_sphere_box_overlap() {
        let sphere = SphereCollider::new(Vec3::ZERO, 1.0);
        let half = Vec3::splat(0.5);
        // Box containing the center
        assert!(sphere.overlaps_box(Vec3::ZERO, half));
        // Face-adjacent box reaching to within 0.5 of the center
        assert!(sphere.overlaps_box(Vec3::new(1.0, 0.0, 0.0), half));
        // Box whose nearest face is exactly one radius away
        assert!(!sphere.overlaps_box(Vec3::new(1.5, 0.0, 0.0), half));
        // Diagonal box whose nearest corner is outside the sphere
        assert!(!sphere.overlaps_box(Vec3::splat(1.2), half));
    }
}
