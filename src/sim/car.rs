use super::{CarConfig, ControlIntent};
use crate::{
    error::ConfigError,
    math::{Pose, yaw_quat},
    physics::{
        BoxShape, PhysicsWorld, RaycastVehicle, RigidBodyConstructionInfo, Shape,
        WheelInfoConstructionInfo,
        dynamics::{rigid_body::BodyHandle, vehicle::NUM_WHEELS},
    },
};
use glam::{Quat, Vec3A};
use std::f32::consts::FRAC_PI_2;

/// Where the car starts, relative to the track
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPose {
    pub position: Vec3A,
    /// Rotation about world +Y; zero drives towards world -Z
    pub yaw: f32,
}

impl SpawnPose {
    /// Chassis orientation for this spawn.
    ///
    /// The chassis drives towards local -X, so a fixed quarter turn lines that up with
    /// the track's -Z direction before the spawn yaw is applied.
    #[must_use]
    pub fn chassis_rotation(&self) -> Quat {
        yaw_quat(self.yaw) * yaw_quat(-FRAC_PI_2)
    }
}

/// Engine forces and steering for one tick, before they reach the wheels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveCommand {
    /// Index-aligned with the wheels: front-left, front-right, rear-left, rear-right
    pub engine_forces: [f32; NUM_WHEELS],
    /// Steering angle for both front wheels; positive turns left
    pub steering: f32,
}

impl DriveCommand {
    pub const IDLE: Self = Self {
        engine_forces: [0.0; NUM_WHEELS],
        steering: 0.0,
    };

    #[must_use]
    pub fn total_force(&self) -> f32 {
        self.engine_forces.iter().sum()
    }
}

/// Map held directions and the current speed to wheel forces and steering.
///
/// Forward is a negative force. When both throttle directions are held, reverse wins.
/// Holding both steering directions, or neither, leaves the wheels straight.
#[must_use]
pub fn compute_drive(intent: ControlIntent, speed: f32, config: &CarConfig) -> DriveCommand {
    let mut engine_force = 0.0;
    if intent.forward {
        engine_force = -config.forward_force_scale * config.max_force;
    }
    if intent.backward {
        engine_force = config.reverse_force_scale * config.max_force;
    }

    let steer_value = config.max_steer * config.steer_curve().get_output(speed);
    let steering = match (intent.left, intent.right) {
        (true, false) => steer_value,
        (false, true) => -steer_value,
        _ => 0.0,
    };

    DriveCommand {
        engine_forces: config.axle_split().map(|share| engine_force * share),
        steering,
    }
}

/// Renderer-facing copies of the chassis and wheel transforms.
///
/// Wheels are independent world poses, not children of the chassis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualState {
    pub chassis: Pose,
    pub wheels: [Pose; NUM_WHEELS],
}

pub struct Vehicle {
    config: CarConfig,
    chassis: BodyHandle,
    vehicle: RaycastVehicle,
    last_drive: DriveCommand,
    visual: VisualState,
    position: Vec3A,
    orientation: Quat,
    velocity: Vec3A,
}

impl Vehicle {
    /// Build the chassis body and its four wheels at `spawn`
    pub fn new(
        world: &mut PhysicsWorld,
        config: &CarConfig,
        spawn: SpawnPose,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let hitbox = BoxShape::new(config.half_extents());
        let mut info = RigidBodyConstructionInfo::new(config.mass, Shape::Cuboid(hitbox));
        info.local_inertia = hitbox.calculate_local_inertia(config.mass);
        info.shape_offset = Vec3A::new(0.0, config.com_drop, 0.0);
        info.start_position = spawn.position;
        info.start_rotation = spawn.chassis_rotation();
        info.linear_damping = config.linear_damping;
        info.angular_damping = config.angular_damping;
        info.friction = config.friction;
        info.restitution = config.restitution;
        let chassis = world.add_body(info);

        let mut vehicle = RaycastVehicle::new(chassis);
        let wheel = config.wheels;
        for (i, connection) in config.connection_points().into_iter().enumerate() {
            vehicle.add_wheel(
                world,
                WheelInfoConstructionInfo {
                    chassis_connection_cs: connection,
                    wheel_direction_cs: Vec3A::NEG_Y,
                    wheel_axle_cs: Vec3A::Z,
                    suspension_rest_length: wheel.suspension_rest_length,
                    max_suspension_travel: wheel.max_suspension_travel,
                    wheel_radius: wheel.radius,
                    suspension_stiffness: wheel.suspension_stiffness,
                    wheels_damping_compression: wheel.damping_compression,
                    wheels_damping_relaxation: wheel.damping_relaxation,
                    friction_slip: wheel.friction_slip,
                    max_suspension_force: wheel.max_suspension_force,
                    roll_influence: wheel.roll_influence,
                    custom_sliding_rotational_speed: wheel.custom_sliding_rotational_speed,
                    is_front_wheel: i < 2,
                },
            );
        }

        if vehicle.get_num_wheels() != NUM_WHEELS {
            return Err(ConfigError::WheelCount {
                expected: NUM_WHEELS,
                got: vehicle.get_num_wheels(),
            });
        }

        log::info!(
            "car spawned at {} with mass {} and {} wheels",
            spawn.position,
            config.mass,
            vehicle.get_num_wheels()
        );

        let mut car = Self {
            config: *config,
            chassis,
            vehicle,
            last_drive: DriveCommand::IDLE,
            visual: VisualState::default(),
            position: spawn.position,
            orientation: spawn.chassis_rotation(),
            velocity: Vec3A::ZERO,
        };
        car.sync_visual_state(world);

        Ok(car)
    }

    /// Push this tick's intent into the wheels. Brakes are always released.
    pub fn apply_controls(&mut self, intent: ControlIntent) {
        let drive = compute_drive(intent, self.speed(), &self.config);

        for (i, force) in drive.engine_forces.into_iter().enumerate() {
            let steering = if i < 2 { drive.steering } else { 0.0 };
            self.vehicle.apply_engine_force(force, i);
            self.vehicle.set_steering_value(steering, i);
            self.vehicle.set_brake(0.0, i);
        }

        self.last_drive = drive;
    }

    /// One fixed sub-step of wheel physics, run before the world steps
    pub fn pre_tick_update(&mut self, world: &mut PhysicsWorld, time_step: f32) {
        self.vehicle.update_vehicle(world, time_step);
    }

    /// Cache the chassis state after the world step
    pub fn post_tick_update(&mut self, world: &PhysicsWorld) {
        let body = world.body(self.chassis);
        self.position = body.position;
        self.orientation = body.orientation;
        self.velocity = body.linear_velocity;
    }

    /// Put the car back at `spawn` at rest, keeping its wheels and tuning
    pub fn respawn(&mut self, world: &mut PhysicsWorld, spawn: SpawnPose) {
        let body = world.body_mut(self.chassis);
        body.set_pose(spawn.position, spawn.chassis_rotation());
        body.linear_velocity = Vec3A::ZERO;
        body.angular_velocity = Vec3A::ZERO;
        body.clear_forces();

        log::debug!("car respawned at {}", spawn.position);
        self.sync_visual_state(world);
    }

    /// Copy the chassis pose and every wheel's current physics transform into the visual state
    pub fn sync_visual_state(&mut self, world: &PhysicsWorld) {
        self.post_tick_update(world);
        self.visual.chassis = Pose::new(self.position, self.orientation);

        for i in 0..NUM_WHEELS {
            self.vehicle.update_wheel_transform_for(world, i);
            self.visual.wheels[i] = self.vehicle.wheel_world_transform(i);
        }
    }

    #[must_use]
    pub const fn position(&self) -> Vec3A {
        self.position
    }

    /// Raw chassis orientation; the model's front is its local -X
    #[must_use]
    pub const fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Orientation in the driving frame: -Z is forward, +Y is up
    #[must_use]
    pub fn heading(&self) -> Quat {
        self.orientation * yaw_quat(FRAC_PI_2)
    }

    #[must_use]
    pub fn forward_dir(&self) -> Vec3A {
        self.orientation * Vec3A::NEG_X
    }

    #[must_use]
    pub fn velocity(&self) -> Vec3A {
        self.velocity
    }

    /// Magnitude of the linear velocity
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[must_use]
    pub const fn visual(&self) -> &VisualState {
        &self.visual
    }

    #[must_use]
    pub const fn last_drive(&self) -> DriveCommand {
        self.last_drive
    }

    /// Per-wheel engine force and steering as last written to the physics wheels
    #[must_use]
    pub fn wheel_inputs(&self) -> [(f32, f32); NUM_WHEELS] {
        std::array::from_fn(|i| {
            let wheel = &self.vehicle.wheels[i];
            (wheel.engine_force, wheel.steering)
        })
    }

    #[must_use]
    pub fn wheel_contacts(&self) -> [bool; NUM_WHEELS] {
        std::array::from_fn(|i| self.vehicle.wheels[i].raycast_info.is_in_contact)
    }

    /// The physics wheel transform, as the visual sync reads it
    #[must_use]
    pub fn wheel_world_transform(&self, wheel: usize) -> Pose {
        self.vehicle.wheel_world_transform(wheel)
    }

    #[must_use]
    pub const fn chassis_handle(&self) -> BodyHandle {
        self.chassis
    }

    #[must_use]
    pub const fn config(&self) -> &CarConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_forces(got: [f32; NUM_WHEELS], expected: [f32; NUM_WHEELS]) {
        for (g, e) in got.into_iter().zip(expected) {
            assert!((g - e).abs() < 1e-3, "{got:?} vs {expected:?}");
        }
    }

    #[test]
    fn forward_at_rest() {
        let drive = compute_drive(ControlIntent::FORWARD, 0.0, &CarConfig::DEFAULT);
        assert_forces(drive.engine_forces, [-280.0, -280.0, -420.0, -420.0]);
        assert_eq!(drive.steering, 0.0);
        assert!((drive.total_force() - -1400.0).abs() < 1e-3);
    }

    #[test]
    fn reverse_overrides_forward() {
        let both = ControlIntent {
            forward: true,
            backward: true,
            ..ControlIntent::NEUTRAL
        };
        let drive = compute_drive(both, 0.0, &CarConfig::DEFAULT);
        assert_forces(drive.engine_forces, [200.0, 200.0, 300.0, 300.0]);
    }

    #[test]
    fn opposite_steering_cancels() {
        let both = ControlIntent {
            left: true,
            right: true,
            ..ControlIntent::NEUTRAL
        };
        assert_eq!(compute_drive(both, 0.0, &CarConfig::DEFAULT).steering, 0.0);
        assert_eq!(compute_drive(both, 25.0, &CarConfig::DEFAULT).steering, 0.0);

        let forward_both = ControlIntent {
            forward: true,
            ..both
        };
        let drive = compute_drive(forward_both, 0.0, &CarConfig::DEFAULT);
        assert_eq!(drive.steering, 0.0);
        assert!(drive.engine_forces[0] < 0.0);
    }

    #[test]
    fn steering_sign_and_fade() {
        let left = ControlIntent {
            left: true,
            ..ControlIntent::NEUTRAL
        };
        let right = ControlIntent {
            right: true,
            ..ControlIntent::NEUTRAL
        };

        assert_eq!(compute_drive(left, 0.0, &CarConfig::DEFAULT).steering, 0.5);
        assert_eq!(compute_drive(right, 0.0, &CarConfig::DEFAULT).steering, -0.5);
        assert!((compute_drive(left, 5.0, &CarConfig::DEFAULT).steering - 0.35).abs() < 1e-6);
        assert!((compute_drive(left, 25.0, &CarConfig::DEFAULT).steering - 0.2).abs() < 1e-6);
    }

    #[test]
    fn spawn_faces_neg_z() {
        let spawn = SpawnPose {
            position: Vec3A::ZERO,
            yaw: 0.0,
        };
        let front = spawn.chassis_rotation() * Vec3A::NEG_X;
        assert!(front.abs_diff_eq(Vec3A::NEG_Z, 1e-6), "{front}");
    }
}
