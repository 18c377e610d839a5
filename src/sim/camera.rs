use crate::{
    ConfigError,
    consts::camera,
    math::look_at_rotation,
};
use glam::{Quat, Vec3A};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CameraMode {
    #[default]
    Follow,
    /// Higher and further back, looking ahead of the car
    ThirdPerson,
}

/// Per-tick camera settings snapshot
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraRig {
    mode: CameraMode,
    offset: Vec3A,
    lerp_factor: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CameraRig {
    pub const DEFAULT: Self = Self {
        mode: CameraMode::Follow,
        offset: camera::FOLLOW_OFFSET,
        lerp_factor: camera::LERP,
    };

    pub fn new(mode: CameraMode, offset: Vec3A, lerp_factor: f32) -> Result<Self, ConfigError> {
        if !(lerp_factor > 0.0 && lerp_factor <= 1.0) {
            return Err(ConfigError::LerpOutOfRange(lerp_factor));
        }

        Ok(Self {
            mode,
            offset,
            lerp_factor,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> CameraMode {
        self.mode
    }

    #[must_use]
    pub const fn offset(&self) -> Vec3A {
        self.offset
    }

    #[must_use]
    pub const fn lerp_factor(&self) -> f32 {
        self.lerp_factor
    }

    /// Offset from the car in its heading frame, after the mode adjustment
    #[must_use]
    pub fn effective_offset(&self) -> Vec3A {
        match self.mode {
            CameraMode::Follow => self.offset,
            CameraMode::ThirdPerson => self.offset + camera::THIRD_PERSON_EXTRA,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraTransform {
    pub position: Vec3A,
    /// Point the camera looks at
    pub target: Vec3A,
    pub rotation: Quat,
}

/// Chase camera that eases towards a point behind the car.
///
/// Easing is a fixed fraction per update, so it converges faster at higher frame rates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFollower {
    position: Vec3A,
    rotation: Quat,
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self::new(camera::INITIAL_POSITION)
    }
}

impl CameraFollower {
    #[must_use]
    pub const fn new(initial_position: Vec3A) -> Self {
        Self {
            position: initial_position,
            rotation: Quat::IDENTITY,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Vec3A {
        self.position
    }

    /// Ease towards `target_pos` plus the rig offset, rotated into the car's frame.
    ///
    /// `target_heading` must be the driving frame (`Vehicle::heading`, -Z forward), not the raw
    /// chassis quaternion. The chassis model faces local -X, so rotating the offset by the raw
    /// quaternion would park the camera beside the car instead of behind it.
    pub fn update(
        &mut self,
        target_pos: Vec3A,
        target_heading: Quat,
        rig: &CameraRig,
    ) -> CameraTransform {
        let desired = target_pos + target_heading * rig.effective_offset();
        self.position += (desired - self.position) * rig.lerp_factor;

        let look_target = match rig.mode {
            CameraMode::Follow => target_pos,
            CameraMode::ThirdPerson => {
                target_pos
                    + target_heading * Vec3A::new(0.0, 0.0, -camera::THIRD_PERSON_LOOK_AHEAD)
            }
        };

        if let Some(rotation) = look_at_rotation(self.position, look_target, Vec3A::Y) {
            self.rotation = rotation;
        }

        CameraTransform {
            position: self.position,
            target: look_target,
            rotation: self.rotation,
        }
    }
}
