//! Collider types for obstacles and occupancy sampling

pub mod box_collider;
pub mod composite_collider;
pub mod sphere_collider;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use voxnav::OccupancySampler;

pub use box_collider::BoxCollider;
pub use composite_collider::CompositeCollider;
pub use sphere_collider::SphereCollider;

/// Shape that can block cells of a voxel grid
pub trait Collider: std::any::Any + Send + Sync {
    /// Axis-aligned bounds as `(min, max)`
    fn bounds(&self) -> (Vec3, Vec3);

    /// Check if a point is inside this collider
    fn contains_point(&self, point: &Vec3) -> bool;

    /// Check whether the collider intrudes into an axis-aligned box
    ///
    /// Touching the box surface without entering it is not an overlap.
    fn overlaps_box(&self, center: Vec3, half_extents: Vec3) -> bool;

    /// Get a unique identifier for this collider type
    fn collider_type(&self) -> ColliderType;

    /// Clone this collider as a boxed trait object
    fn clone_box(&self) -> Box<dyn Collider>;

    /// Returns self as &dyn Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Types of colliders supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderType {
    Box,
    Sphere,
    Composite,
}

/// Serializable collider data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SerializableCollider {
    Box(BoxCollider),
    Sphere(SphereCollider),
    Composite(CompositeCollider),
}

impl SerializableCollider {
    /// Convert to a boxed collider trait object
    pub fn into_collider(self) -> Box<dyn Collider> {
        match self {
            SerializableCollider::Box(c) => Box::new(c),
            SerializableCollider::Sphere(c) => Box::new(c),
            SerializableCollider::Composite(c) => Box::new(c),
        }
    }

    /// Create from a collider trait object
    pub fn from_collider(collider: &dyn Collider) -> Option<Self> {
        let any = collider.as_any();
        match collider.collider_type() {
            ColliderType::Box => any
                .downcast_ref::<BoxCollider>()
                .map(|c| SerializableCollider::Box(c.clone())),
            ColliderType::Sphere => any
                .downcast_ref::<SphereCollider>()
                .map(|c| SerializableCollider::Sphere(c.clone())),
            ColliderType::Composite => any
                .downcast_ref::<CompositeCollider>()
                .map(|c| SerializableCollider::Composite(c.clone())),
        }
    }
}

impl Clone for Box<dyn Collider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Quick reject on bounds before the exact shape test
pub(crate) fn bounds_overlap_box(
    collider: &dyn Collider,
    center: Vec3,
    half_extents: Vec3,
) -> bool {
    let (min, max) = collider.bounds();
    voxnav_common::aabb_overlap(min, max, center - half_extents, center + half_extents)
}

/// A static set of colliders sampled as the occupancy of a bake
#[derive(Clone, Default)]
pub struct ColliderSet {
    colliders: Vec<Box<dyn Collider>>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from serialized collider descriptions
    pub fn from_serializable(colliders: Vec<SerializableCollider>) -> Self {
        Self {
            colliders: colliders
                .into_iter()
                .map(SerializableCollider::into_collider)
                .collect(),
        }
    }

    pub fn push(&mut self, collider: Box<dyn Collider>) {
        self.colliders.push(collider);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Collider> + '_ {
        self.colliders.iter().map(|c| c.as_ref())
    }

    /// Serializable descriptions of every collider in the set
    pub fn to_serializable(&self) -> Vec<SerializableCollider> {
        self.iter()
            .filter_map(SerializableCollider::from_collider)
            .collect()
    }
}

impl OccupancySampler for ColliderSet {
    fn is_blocked(&self, center: Vec3, half_extents: Vec3) -> bool {
        self.iter().any(|collider| {
            bounds_overlap_box(collider, center, half_extents)
                && collider.overlaps_box(center, half_extents)
        })
    }
}

impl fmt::Debug for ColliderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColliderSet")
            .field("colliders", &format!("[{} collider(s)]", self.colliders.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializable_round_trip() {
        let sphere = SphereCollider::new(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let boxed: Box<dyn Collider> = Box::new(sphere.clone());
        let serializable = SerializableCollider::from_collider(boxed.as_ref()).unwrap();
        assert_eq!(serializable, SerializableCollider::Sphere(sphere));

        let json = serde_json::to_string(&serializable).unwrap();
        let decoded: SerializableCollider = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.into_collider().collider_type(), ColliderType::Sphere);
    }

    #[test]
    fn test_collider_set_sampling() {
        let mut set = ColliderSet::new();
        assert!(!set.is_blocked(Vec3::ZERO, Vec3::splat(0.5)));

        set.push(Box::new(BoxCollider::new(Vec3::ZERO, Vec3::splat(1.0))));
        set.push(Box::new(SphereCollider::new(Vec3::new(5.0, 0.0, 0.0), 1.0)));
        assert_eq!(set.len(), 2);

        let half = Vec3::splat(0.5);
        assert!(set.is_blocked(Vec3::new(1.2, 0.0, 0.0), half));
        assert!(!set.is_blocked(Vec3::new(2.5, 0.0, 0.0), half));
        assert!(set.is_blocked(Vec3::new(4.0, 0.0, 0.0), half));
        // Corner of the cell box is outside the sphere
        assert!(!set.is_blocked(Vec3::new(4.2, 0.9, 0.9), Vec3::splat(0.1)));
    }

    #[test]
    fn test_collider_set_serialization() {
        let set = ColliderSet::from_serializable(vec![
            SerializableCollider::Box(BoxCollider::new(Vec3::ONE, Vec3::ONE)),
            SerializableCollider::Sphere(SphereCollider::new(Vec3::ZERO, 2.0)),
        ]);
        let described = set.to_serializable();
        assert_eq!(described.len(), 2);
        assert!(matches!(described[0], SerializableCollider::Box(_)));
        assert!(format!("{:?}", set).contains("2 collider(s)"));
    }
}
