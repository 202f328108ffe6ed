//! Composite collider built from child colliders

use super::{Collider, ColliderType, SerializableCollider};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A collider made of several child colliders
pub struct CompositeCollider {
    /// Child colliders
    pub colliders: Vec<Box<dyn Collider>>,
}

impl CompositeCollider {
    /// Create a new empty composite collider
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
        }
    }

    /// Add a collider to this composite
    pub fn add_collider(&mut self, collider: Box<dyn Collider>) {
        self.colliders.push(collider);
    }

    /// Create from a vector of colliders
    pub fn from_colliders(colliders: Vec<Box<dyn Collider>>) -> Self {
        Self { colliders }
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check if a point is inside any of the child colliders
    pub fn contains_point(&self, point: &Vec3) -> bool {
        self.colliders
            .iter()
            .any(|collider| collider.contains_point(point))
    }

    fn to_serializable(&self) -> Vec<SerializableCollider> {
        self.colliders
            .iter()
            .filter_map(|c| SerializableCollider::from_collider(c.as_ref()))
            .collect()
    }
}

impl Clone for CompositeCollider {
    fn clone(&self) -> Self {
        Self {
            colliders: self.colliders.clone(),
        }
    }
}

impl fmt::Debug for CompositeCollider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeCollider")
            .field(
                "colliders",
                &format!("[{} collider(s)]", self.colliders.len()),
            )
            .finish()
    }
}

impl Serialize for CompositeCollider {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_serializable().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompositeCollider {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let serializable_colliders: Vec<SerializableCollider> = Vec::deserialize(deserializer)?;
        let colliders = serializable_colliders
            .into_iter()
            .map(SerializableCollider::into_collider)
            .collect();
        Ok(Self { colliders })
    }
}

impl Default for CompositeCollider {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for CompositeCollider {
    fn eq(&self, other: &Self) -> bool {
        self.to_serializable() == other.to_serializable()
    }
}

impl Collider for CompositeCollider {
    fn bounds(&self) -> (Vec3, Vec3) {
        if self.colliders.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }

        let (mut min, mut max) = self.colliders[0].bounds();

        for collider in &self.colliders[1..] {
            let (c_min, c_max) = collider.bounds();
            min = min.min(c_min);
            max = max.max(c_max);
        }

        (min, max)
    }

    fn contains_point(&self, point: &Vec3) -> bool {
        self.contains_point(point)
    }

    fn overlaps_box(&self, center: Vec3, half_extents: Vec3) -> bool {
        self.colliders
            .iter()
            .any(|collider| collider.overlaps_box(center, half_extents))
    }

    fn collider_type(&self) -> ColliderType {
        ColliderType::Composite
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
