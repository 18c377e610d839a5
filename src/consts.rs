use glam::Vec3A;
use std::time::Duration;

pub const GRAVITY: Vec3A = Vec3A::new(0.0, -9.82, 0.0);

/// Fixed physics sub-step, in seconds
pub const FIXED_TIME_STEP: f32 = 1.0 / 60.0;
pub const MAX_SUB_STEPS: u32 = 10;

pub const TOTAL_LAPS: u32 = 3;
/// Minimum gap between two firings of the same trigger kind
pub const TRIGGER_COOLDOWN: Duration = Duration::from_millis(500);

pub mod car {
    pub const MASS: f32 = 150.0;
    pub const MAX_STEER_VAL: f32 = 0.5;
    pub const MAX_FORCE: f32 = 1000.0;

    pub const FORWARD_FORCE_SCALE: f32 = 0.7;
    pub const REVERSE_FORCE_SCALE: f32 = 0.5;

    pub const FRONT_AXLE_SHARE: f32 = 0.4;
    pub const REAR_AXLE_SHARE: f32 = 0.6;

    /// Speed at which steering authority bottoms out
    pub const STEER_FADE_SPEED: f32 = 10.0;
    /// Fraction of steering left at and above `STEER_FADE_SPEED`
    pub const STEER_MIN_SCALE: f32 = 0.4;

    pub const CHASSIS_LENGTH: f32 = 4.0;
    pub const CHASSIS_WIDTH: f32 = 1.8;
    pub const CHASSIS_HEIGHT: f32 = 0.6;
    pub const COM_DROP: f32 = 0.15;

    pub const LINEAR_DAMPING: f32 = 0.01;
    pub const ANGULAR_DAMPING: f32 = 0.4;
    pub const FRICTION: f32 = 0.4;
    pub const RESTITUTION: f32 = 0.1;

    pub const WHEEL_RADIUS: f32 = 0.5;
    pub const WHEEL_INSET: f32 = 0.5;
}

pub mod wheel {
    pub const SUSPENSION_STIFFNESS: f32 = 30.0;
    pub const SUSPENSION_REST_LENGTH: f32 = super::car::WHEEL_RADIUS;
    pub const FRICTION_SLIP: f32 = 5.0;
    pub const DAMPING_RELAXATION: f32 = 2.3;
    pub const DAMPING_COMPRESSION: f32 = 4.4;
    pub const MAX_SUSPENSION_FORCE: f32 = 100_000.0;
    pub const ROLL_INFLUENCE: f32 = 0.3;
    pub const MAX_SUSPENSION_TRAVEL: f32 = 0.3;
    pub const CUSTOM_SLIDING_ROTATIONAL_SPEED: f32 = -30.0;
}

pub mod track {
    pub const OUTER_SIZE: f32 = 100.0;
    pub const TRACK_WIDTH: f32 = 8.0;
    pub const INNER_SIZE: f32 = 40.0;
    pub const WALL_HEIGHT: f32 = 3.0;
    pub const WALL_THICKNESS: f32 = 0.5;

    pub const TRIGGER_HALF_HEIGHT: f32 = 2.0;
    pub const TRIGGER_HALF_DEPTH: f32 = 0.1;
    pub const TRIGGER_CENTER_Y: f32 = 1.0;
    /// Checkpoint sits this far inside the spawn-side lane centre
    pub const CHECKPOINT_INSET: f32 = 2.0;

    pub const SPAWN_HEIGHT: f32 = 4.0;
    /// Spawn sits this far inside the spawn-side lane centre
    pub const SPAWN_INSET: f32 = 5.0;
}

pub mod camera {
    use glam::Vec3A;

    pub const INITIAL_POSITION: Vec3A = Vec3A::new(0.0, 10.0, -15.0);
    pub const FOLLOW_OFFSET: Vec3A = Vec3A::new(0.0, 5.0, 10.0);
    /// Added on top of the configured offset in third-person mode
    pub const THIRD_PERSON_EXTRA: Vec3A = Vec3A::new(0.0, 8.0, 15.0);
    pub const THIRD_PERSON_LOOK_AHEAD: f32 = 5.0;
    pub const LERP: f32 = 0.1;
}

/// HUD speed conversion from m/s
pub const MS_TO_KMH: f32 = 3.6;
