use glam::Vec3A;
use std::ops::Add;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3A,
    pub max: Vec3A,
}

impl Aabb {
    #[must_use]
    pub const fn new(min: Vec3A, max: Vec3A) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_center_half_extents(center: Vec3A, half_extents: Vec3A) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3A) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    #[must_use]
    pub fn center(&self) -> Vec3A {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3A {
        (self.max - self.min) * 0.5
    }

    /// Slab test, returning the entry fraction along `from -> to` in `[0, 1]`
    #[must_use]
    pub fn ray_intersection(&self, from: Vec3A, to: Vec3A) -> Option<f32> {
        let dir = to - from;
        let mut t_min = 0.0f32;
        let mut t_max = 1.0f32;

        for axis in 0..3 {
            if dir[axis].abs() < f32::EPSILON {
                if from[axis] < self.min[axis] || from[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir[axis];
            let mut t0 = (self.min[axis] - from[axis]) * inv;
            let mut t1 = (self.max[axis] - from[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

impl Add for Aabb {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_and_union() {
        let a = Aabb::new(Vec3A::ZERO, Vec3A::ONE);
        let b = Aabb::new(Vec3A::splat(0.5), Vec3A::splat(2.0));
        let c = Aabb::new(Vec3A::splat(3.0), Vec3A::splat(4.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!((a + c).max, Vec3A::splat(4.0));
        assert!(a.contains_point(Vec3A::splat(0.25)));
    }

    #[test]
    fn ray_hits_front_face() {
        let aabb = Aabb::from_center_half_extents(Vec3A::ZERO, Vec3A::ONE);
        let t = aabb
            .ray_intersection(Vec3A::new(-3.0, 0.0, 0.0), Vec3A::new(3.0, 0.0, 0.0))
            .unwrap();
        assert!((t - 2.0 / 6.0).abs() < 1e-6);

        assert!(
            aabb.ray_intersection(Vec3A::new(-3.0, 2.0, 0.0), Vec3A::new(3.0, 2.0, 0.0))
                .is_none()
        );
    }
}
