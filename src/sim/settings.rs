use super::{CameraMode, CameraRig};
use crate::{ConfigError, consts::camera};
use glam::Vec3A;

/// Bounds and granularity of one settings slider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    pub const LIGHT_INTENSITY: Self = Self::new(0.0, 2.0, 0.1);
    pub const AMBIENT_INTENSITY: Self = Self::new(0.0, 1.0, 0.1);
    pub const CAMERA_OFFSET_X: Self = Self::new(-10.0, 10.0, 0.5);
    pub const CAMERA_OFFSET_Y: Self = Self::new(0.0, 20.0, 0.5);
    pub const CAMERA_OFFSET_Z: Self = Self::new(0.0, 30.0, 0.5);
    pub const CAMERA_LERP: Self = Self::new(0.01, 1.0, 0.01);

    #[must_use]
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Snap `value` to the nearest step and clamp it into range.
    ///
    /// Returns `None` for NaN and infinities, which a slider can never produce.
    #[must_use]
    pub fn snap(&self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }

        let steps = ((value - self.min) / self.step).round();
        Some((self.min + steps * self.step).clamp(self.min, self.max))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShadowType {
    Basic,
    #[default]
    Pcf,
    PcfSoft,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightingSettings {
    light_intensity: f32,
    ambient_intensity: f32,
    pub shadows_enabled: bool,
    pub shadow_type: ShadowType,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LightingSettings {
    pub const DEFAULT: Self = Self {
        light_intensity: 0.8,
        ambient_intensity: 0.4,
        shadows_enabled: true,
        shadow_type: ShadowType::Pcf,
    };

    #[must_use]
    pub const fn light_intensity(&self) -> f32 {
        self.light_intensity
    }

    #[must_use]
    pub const fn ambient_intensity(&self) -> f32 {
        self.ambient_intensity
    }

    pub fn set_light_intensity(&mut self, value: f32) {
        if let Some(value) = SliderRange::LIGHT_INTENSITY.snap(value) {
            self.light_intensity = value;
        }
    }

    pub fn set_ambient_intensity(&mut self, value: f32) {
        if let Some(value) = SliderRange::AMBIENT_INTENSITY.snap(value) {
            self.ambient_intensity = value;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraSettings {
    pub mode: CameraMode,
    offset: Vec3A,
    lerp: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CameraSettings {
    pub const DEFAULT: Self = Self {
        mode: CameraMode::Follow,
        offset: camera::FOLLOW_OFFSET,
        lerp: camera::LERP,
    };

    #[must_use]
    pub const fn offset(&self) -> Vec3A {
        self.offset
    }

    #[must_use]
    pub const fn lerp(&self) -> f32 {
        self.lerp
    }

    pub fn set_offset_x(&mut self, value: f32) {
        if let Some(value) = SliderRange::CAMERA_OFFSET_X.snap(value) {
            self.offset.x = value;
        }
    }

    pub fn set_offset_y(&mut self, value: f32) {
        if let Some(value) = SliderRange::CAMERA_OFFSET_Y.snap(value) {
            self.offset.y = value;
        }
    }

    pub fn set_offset_z(&mut self, value: f32) {
        if let Some(value) = SliderRange::CAMERA_OFFSET_Z.snap(value) {
            self.offset.z = value;
        }
    }

    pub fn set_lerp(&mut self, value: f32) {
        if let Some(value) = SliderRange::CAMERA_LERP.snap(value) {
            self.lerp = value;
        }
    }

    /// Snapshot for this tick's camera update
    pub fn rig(&self) -> Result<CameraRig, ConfigError> {
        CameraRig::new(self.mode, self.offset, self.lerp)
    }
}

/// Everything the settings panel can change
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub lighting: LightingSettings,
    pub camera: CameraSettings,
}
