//! Math utilities for voxel navigation

use glam::Vec3;
use std::f32::consts::PI;

/// Squared-length threshold below which a direction is treated as degenerate
const DEGENERATE_SQR_EPSILON: f32 = 1.0e-15;

/// Converts radians to degrees
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Unsigned angle in degrees between two directions, in `[0, 180]`.
///
/// Returns 0 when either direction is degenerate.
pub fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator < DEGENERATE_SQR_EPSILON {
        return 0.0;
    }
    let cos = (a.dot(b) / denominator).clamp(-1.0, 1.0);
    rad_to_deg(cos.acos())
}

/// Rounds to the nearest integer, resolving exact halves to the even neighbor
#[inline]
pub fn round_half_even(value: f32) -> i32 {
    value.round_ties_even() as i32
}

/// Checks whether two axis-aligned boxes share interior volume
///
/// Boxes that only touch along a face, edge or corner do not overlap.
#[inline]
pub fn aabb_overlap(min_a: Vec3, max_a: Vec3, min_b: Vec3, max_b: Vec3) -> bool {
    min_a.cmplt(max_b).all() && min_b.cmplt(max_a).all()
}

/// Closest point to `point` inside the box `[min, max]`
#[inline]
pub fn closest_point_on_aabb(point: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    point.clamp(min, max)
}
