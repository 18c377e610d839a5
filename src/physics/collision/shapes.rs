use crate::physics::linear_math::{LARGE_FLOAT, aabb::Aabb, obb::Obb};
use glam::{Quat, Vec3A, Vec3Swizzles};

/// Infinite plane `normal . x = constant`, in the owning body's local frame
#[derive(Clone, Copy, Debug)]
pub struct StaticPlaneShape {
    plane_normal: Vec3A,
    plane_constant: f32,
}

impl StaticPlaneShape {
    #[must_use]
    pub fn new(plane_normal: Vec3A, plane_constant: f32) -> Self {
        debug_assert!(plane_normal.is_normalized());

        Self {
            plane_normal,
            plane_constant,
        }
    }

    #[must_use]
    pub const fn get_plane_normal(&self) -> Vec3A {
        self.plane_normal
    }

    #[must_use]
    pub const fn get_plane_constant(&self) -> f32 {
        self.plane_constant
    }

    /// World-space normal and constant for a plane attached at `origin` with `rotation`
    #[must_use]
    pub fn world_plane(&self, origin: Vec3A, rotation: Quat) -> (Vec3A, f32) {
        let normal = rotation * self.plane_normal;
        (normal, self.plane_constant + normal.dot(origin))
    }

    /// Hit fraction along `from -> to`, only counting rays that enter from the front side
    #[must_use]
    pub fn ray_fraction(normal: Vec3A, constant: f32, from: Vec3A, to: Vec3A) -> Option<f32> {
        let start = normal.dot(from) - constant;
        let end = normal.dot(to) - constant;
        if start < 0.0 || end > 0.0 {
            return None;
        }

        let denom = start - end;
        if denom.abs() < f32::EPSILON {
            return Some(0.0);
        }

        Some(start / denom)
    }

    /// Axis-aligned planes get a thin slab bound; tilted ones are unbounded
    #[must_use]
    pub fn get_aabb(&self, origin: Vec3A, rotation: Quat) -> Aabb {
        const PLANE_CONSTANT_OFFSET: f32 = 0.2;

        let (normal, constant) = self.world_plane(origin, rotation);
        let mut aabb = Aabb::new(Vec3A::splat(-LARGE_FLOAT), Vec3A::splat(LARGE_FLOAT));

        let axis = normal.abs().max_position();
        if (normal.abs()[axis] - 1.0).abs() < f32::EPSILON {
            let sign = normal[axis].signum();
            let level = constant * sign;
            if sign > 0.0 {
                aabb.max[axis] = level + PLANE_CONSTANT_OFFSET;
            } else {
                aabb.min[axis] = level - PLANE_CONSTANT_OFFSET;
            }
        }

        aabb
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BoxShape {
    half_extents: Vec3A,
}

impl BoxShape {
    #[must_use]
    pub fn new(half_extents: Vec3A) -> Self {
        debug_assert!(half_extents.cmpgt(Vec3A::ZERO).all());

        Self { half_extents }
    }

    #[inline]
    #[must_use]
    pub const fn get_half_extents(&self) -> Vec3A {
        self.half_extents
    }

    /// Diagonal inertia of a solid box
    #[must_use]
    pub fn calculate_local_inertia(&self, mass: f32) -> Vec3A {
        let l = 2.0 * self.half_extents;
        let yxx = l.yxx();
        let zzy = l.zzy();

        mass / 12.0 * (yxx * yxx + zzy * zzy)
    }

    #[must_use]
    pub fn obb(&self, center: Vec3A, rotation: Quat) -> Obb {
        Obb::new(center, rotation, self.half_extents)
    }

    #[must_use]
    pub fn get_aabb(&self, center: Vec3A, rotation: Quat) -> Aabb {
        let obb = self.obb(center, rotation);
        let extent = Vec3A::new(
            obb.project_obb_radius(Vec3A::X),
            obb.project_obb_radius(Vec3A::Y),
            obb.project_obb_radius(Vec3A::Z),
        );

        Aabb::from_center_half_extents(center, extent)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Plane(StaticPlaneShape),
    Cuboid(BoxShape),
}

impl Shape {
    #[must_use]
    pub fn calculate_local_inertia(&self, mass: f32) -> Vec3A {
        match self {
            Self::Plane(_) => Vec3A::ZERO,
            Self::Cuboid(b) => b.calculate_local_inertia(mass),
        }
    }
}
