use glam::{Affine3A, Mat3A, Quat, Vec3A};

/// A rigid world transform, the unit handed to the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3A,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3A::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn new(position: Vec3A, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[must_use]
    pub fn to_affine(self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.position.into())
    }

    #[must_use]
    pub fn transform_point(self, local: Vec3A) -> Vec3A {
        self.position + self.rotation * local
    }
}

/// Rotation for an object at `eye` whose local -Z faces `target`, with +Y kept as close to `up` as possible.
///
/// Returns `None` when the direction is degenerate (zero length or parallel to `up`).
#[must_use]
pub fn look_at_rotation(eye: Vec3A, target: Vec3A, up: Vec3A) -> Option<Quat> {
    let back = (eye - target).try_normalize()?;
    let right = up.cross(back).try_normalize()?;
    let true_up = back.cross(right);

    Some(Quat::from_mat3a(&Mat3A::from_cols(right, true_up, back)).normalize())
}

/// Rotation of `yaw` radians about world +Y
#[must_use]
pub fn yaw_quat(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_faces_target() {
        let eye = Vec3A::new(0.0, 5.0, 10.0);
        let rot = look_at_rotation(eye, Vec3A::ZERO, Vec3A::Y).unwrap();
        let forward = rot * Vec3A::NEG_Z;
        let expected = (Vec3A::ZERO - eye).normalize();

        assert!(forward.abs_diff_eq(expected, 1e-5));
        assert!((rot * Vec3A::Y).y > 0.0);
    }

    #[test]
    fn yaw_turns_left() {
        let left = yaw_quat(std::f32::consts::FRAC_PI_2) * Vec3A::NEG_Z;
        assert!(left.abs_diff_eq(Vec3A::NEG_X, 1e-6), "{left}");
        assert!((yaw_quat(1.0) * Vec3A::Y).abs_diff_eq(Vec3A::Y, 1e-6));
    }

    #[test]
    fn look_at_degenerate() {
        assert!(look_at_rotation(Vec3A::ONE, Vec3A::ONE, Vec3A::Y).is_none());
        assert!(look_at_rotation(Vec3A::Y, Vec3A::ZERO, Vec3A::Y).is_none());
    }
}
