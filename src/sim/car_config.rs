use super::LinearPieceCurve;
use crate::{
    consts::{car, wheel},
    error::{ConfigError, ensure_positive},
};
use glam::Vec3A;

/// Per-wheel suspension and tyre tuning, shared by all four wheels
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelConfig {
    pub radius: f32,
    pub suspension_stiffness: f32,
    pub suspension_rest_length: f32,
    pub max_suspension_travel: f32,
    pub friction_slip: f32,
    pub damping_relaxation: f32,
    pub damping_compression: f32,
    pub max_suspension_force: f32,
    /// How much of a side impulse's lever arm is kept; lower resists rolling over
    pub roll_influence: f32,
    pub custom_sliding_rotational_speed: Option<f32>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl WheelConfig {
    pub const DEFAULT: Self = Self {
        radius: car::WHEEL_RADIUS,
        suspension_stiffness: wheel::SUSPENSION_STIFFNESS,
        suspension_rest_length: wheel::SUSPENSION_REST_LENGTH,
        max_suspension_travel: wheel::MAX_SUSPENSION_TRAVEL,
        friction_slip: wheel::FRICTION_SLIP,
        damping_relaxation: wheel::DAMPING_RELAXATION,
        damping_compression: wheel::DAMPING_COMPRESSION,
        max_suspension_force: wheel::MAX_SUSPENSION_FORCE,
        roll_influence: wheel::ROLL_INFLUENCE,
        custom_sliding_rotational_speed: Some(wheel::CUSTOM_SLIDING_ROTATIONAL_SPEED),
    };

    fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("wheel radius", self.radius)?;
        ensure_positive("suspension stiffness", self.suspension_stiffness)?;
        ensure_positive("suspension rest length", self.suspension_rest_length)?;
        ensure_positive("max suspension force", self.max_suspension_force)?;
        ensure_positive("friction slip", self.friction_slip)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarConfig {
    pub mass: f32,
    /// Full chassis size: length along X, height along Y, width along Z
    pub chassis_size: Vec3A,
    /// Distance the centre of mass sits below the chassis box centre
    pub com_drop: f32,
    /// Distance of each axle in from the chassis ends
    pub wheel_inset: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    pub max_force: f32,
    pub max_steer: f32,
    /// Fraction of `max_force` used when driving forward
    pub forward_force_scale: f32,
    /// Fraction of `max_force` used when reversing
    pub reverse_force_scale: f32,
    pub front_axle_share: f32,
    pub rear_axle_share: f32,
    /// Speed above which steering stops fading
    pub steer_fade_speed: f32,
    /// Steering scale left at `steer_fade_speed` and beyond
    pub steer_min_scale: f32,
    pub wheels: WheelConfig,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarConfig {
    pub const DEFAULT: Self = Self {
        mass: car::MASS,
        chassis_size: Vec3A::new(car::CHASSIS_LENGTH, car::CHASSIS_HEIGHT, car::CHASSIS_WIDTH),
        com_drop: car::COM_DROP,
        wheel_inset: car::WHEEL_INSET,
        linear_damping: car::LINEAR_DAMPING,
        angular_damping: car::ANGULAR_DAMPING,
        friction: car::FRICTION,
        restitution: car::RESTITUTION,
        max_force: car::MAX_FORCE,
        max_steer: car::MAX_STEER_VAL,
        forward_force_scale: car::FORWARD_FORCE_SCALE,
        reverse_force_scale: car::REVERSE_FORCE_SCALE,
        front_axle_share: car::FRONT_AXLE_SHARE,
        rear_axle_share: car::REAR_AXLE_SHARE,
        steer_fade_speed: car::STEER_FADE_SPEED,
        steer_min_scale: car::STEER_MIN_SCALE,
        wheels: WheelConfig::DEFAULT,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("car mass", self.mass)?;
        ensure_positive("chassis length", self.chassis_size.x)?;
        ensure_positive("chassis height", self.chassis_size.y)?;
        ensure_positive("chassis width", self.chassis_size.z)?;
        ensure_positive("max force", self.max_force)?;
        ensure_positive("max steer", self.max_steer)?;
        ensure_positive("steer fade speed", self.steer_fade_speed)?;

        if !(self.wheel_inset >= 0.0 && self.wheel_inset * 2.0 < self.chassis_size.x) {
            return Err(ConfigError::WheelInsetTooLarge {
                inset: self.wheel_inset,
                length: self.chassis_size.x,
            });
        }

        self.wheels.validate()
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3A {
        self.chassis_size * 0.5
    }

    /// Chassis-space hard points in front-left, front-right, rear-left, rear-right order.
    ///
    /// The model's front is local -X and its left is local +Z.
    #[must_use]
    pub fn connection_points(&self) -> [Vec3A; 4] {
        let half = self.half_extents();
        let front_x = -half.x + self.wheel_inset;
        let rear_x = half.x - self.wheel_inset;
        let y = -half.y;

        [
            Vec3A::new(front_x, y, half.z),
            Vec3A::new(front_x, y, -half.z),
            Vec3A::new(rear_x, y, half.z),
            Vec3A::new(rear_x, y, -half.z),
        ]
    }

    /// Steering scale as a function of speed
    #[must_use]
    pub const fn steer_curve(&self) -> LinearPieceCurve<2> {
        LinearPieceCurve::new([(0.0, 1.0), (self.steer_fade_speed, self.steer_min_scale)])
    }

    /// Per-wheel share of the engine force, index-aligned with the wheels
    #[must_use]
    pub const fn axle_split(&self) -> [f32; 4] {
        [
            self.front_axle_share,
            self.front_axle_share,
            self.rear_axle_share,
            self.rear_axle_share,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(CarConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut config = CarConfig::DEFAULT;
        config.wheel_inset = 2.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WheelInsetTooLarge { .. })
        ));

        let mut config = CarConfig::DEFAULT;
        config.mass = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::NonPositive { name: "car mass", .. })));

        let mut config = CarConfig::DEFAULT;
        config.wheels.radius = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn hard_points() {
        let points = CarConfig::DEFAULT.connection_points();
        assert_eq!(points[0], Vec3A::new(-1.5, -0.3, 0.9));
        assert_eq!(points[1], Vec3A::new(-1.5, -0.3, -0.9));
        assert_eq!(points[2], Vec3A::new(1.5, -0.3, 0.9));
        assert_eq!(points[3], Vec3A::new(1.5, -0.3, -0.9));
    }
}
