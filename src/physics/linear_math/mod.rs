pub mod aabb;
pub mod obb;
pub mod transform_util;

use glam::Vec3A;

pub const LARGE_FLOAT: f32 = 1e18;

/// Index of the largest component by absolute value
#[must_use]
pub fn max_abs_axis(v: Vec3A) -> usize {
    v.abs().max_position()
}
