use glam::{Mat3A, Quat, Vec3A};

/// Oriented box in world space
#[derive(Clone, Copy, Debug)]
pub struct Obb {
    pub center: Vec3A,
    pub axis: Mat3A,
    pub extent: Vec3A,
}

/// Minimum-overlap separating axis between two boxes
#[derive(Clone, Copy, Debug)]
pub struct Penetration {
    /// Unit normal pointing from the other box towards `self`
    pub normal: Vec3A,
    pub depth: f32,
}

impl Obb {
    #[must_use]
    pub fn new(center: Vec3A, rotation: Quat, extent: Vec3A) -> Self {
        Self {
            center,
            axis: Mat3A::from_quat(rotation),
            extent,
        }
    }

    #[must_use]
    pub const fn axes(&self) -> [Vec3A; 3] {
        [self.axis.x_axis, self.axis.y_axis, self.axis.z_axis]
    }

    /// Project the box onto an axis, returning the half-projection length
    #[must_use]
    pub fn project_obb_radius(&self, axis: Vec3A) -> f32 {
        let x = self.axis.x_axis * self.extent.x;
        let y = self.axis.y_axis * self.extent.y;
        let z = self.axis.z_axis * self.extent.z;

        axis.dot(x).abs() + axis.dot(y).abs() + axis.dot(z).abs()
    }

    #[must_use]
    pub fn corners(&self) -> [Vec3A; 8] {
        let [ax, ay, az] = self.axes();
        let (x, y, z) = (ax * self.extent.x, ay * self.extent.y, az * self.extent.z);

        [
            self.center - x - y - z,
            self.center + x - y - z,
            self.center - x + y - z,
            self.center + x + y - z,
            self.center - x - y + z,
            self.center + x - y + z,
            self.center - x + y + z,
            self.center + x + y + z,
        ]
    }

    #[must_use]
    pub fn closest_point(&self, point: Vec3A) -> Vec3A {
        let d = point - self.center;
        let mut q = self.center;

        for (i, axis) in self.axes().into_iter().enumerate() {
            let dist = d.dot(axis).clamp(-self.extent[i], self.extent[i]);
            q += dist * axis;
        }

        q
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3A, margin: f32) -> bool {
        let d = point - self.center;
        self.axes()
            .into_iter()
            .enumerate()
            .all(|(i, axis)| d.dot(axis).abs() <= self.extent[i] + margin)
    }

    /// Separating axis test over the 15 candidate axes.
    ///
    /// `None` means the boxes are apart.
    #[must_use]
    pub fn penetration(&self, other: &Self) -> Option<Penetration> {
        // Edge-edge axes must beat a face axis by this factor to be picked
        const EDGE_AXIS_BIAS: f32 = 0.95;

        let d = self.center - other.center;
        let mut best: Option<Penetration> = None;

        let mut test_axis = |axis: Vec3A, bias: f32| -> bool {
            let Some(axis) = axis.try_normalize() else {
                return true;
            };

            let dist = d.dot(axis);
            let overlap =
                self.project_obb_radius(axis) + other.project_obb_radius(axis) - dist.abs();
            if overlap < 0.0 {
                return false;
            }

            if best.is_none_or(|b| overlap < b.depth * bias) {
                best = Some(Penetration {
                    normal: if dist < 0.0 { -axis } else { axis },
                    depth: overlap,
                });
            }

            true
        };

        for axis in self.axes().into_iter().chain(other.axes()) {
            if !test_axis(axis, 1.0) {
                return None;
            }
        }

        for a in self.axes() {
            for b in other.axes() {
                let cross = a.cross(b);
                if cross.length_squared() < 1e-6 {
                    continue;
                }

                if !test_axis(cross, EDGE_AXIS_BIAS) {
                    return None;
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_penetration_picks_shallow_axis() {
        let ground = Obb::new(Vec3A::ZERO, Quat::IDENTITY, Vec3A::new(10.0, 1.0, 10.0));
        let crate_box = Obb::new(Vec3A::new(0.0, 1.4, 0.0), Quat::IDENTITY, Vec3A::splat(0.5));

        let pen = crate_box.penetration(&ground).unwrap();
        assert!(pen.normal.abs_diff_eq(Vec3A::Y, 1e-5));
        assert!((pen.depth - 0.1).abs() < 1e-5);
    }

    #[test]
    fn rotated_boxes_apart() {
        let a = Obb::new(Vec3A::ZERO, Quat::from_rotation_y(0.7), Vec3A::ONE);
        let b = Obb::new(Vec3A::new(3.5, 0.0, 0.0), Quat::IDENTITY, Vec3A::ONE);

        assert!(a.penetration(&b).is_none());
    }

    #[test]
    fn corners_lie_on_box() {
        let obb = Obb::new(Vec3A::ONE, Quat::from_rotation_z(0.3), Vec3A::new(2.0, 0.3, 0.9));
        for corner in obb.corners() {
            assert!(obb.contains_point(corner, 1e-4));
            assert!(!obb.contains_point(corner + (corner - obb.center) * 0.1, 0.0));
        }
    }
}
