use super::{
    raycaster::VehicleRaycaster,
    wheel_info::{WheelInfo, WheelInfoConstructionInfo},
};
use crate::{
    math::Pose,
    physics::dynamics::{
        contact_constraint::{calc_rolling_friction, resolve_single_bilateral},
        rigid_body::{BodyHandle, RigidBody},
        world::PhysicsWorld,
    },
};
use arrayvec::ArrayVec;
use glam::{Quat, Vec3A};

pub const NUM_WHEELS: usize = 4;

const SIDE_FRICTION_STIFFNESS: f32 = 1.0;
const FWD_FACTOR: f32 = 0.5;
const SIDE_FACTOR: f32 = 1.0;
/// Per-step decay of free wheel spin
const SPIN_DECAY: f32 = 0.99;

/// Chassis-space axis the engine pushes along
const FORWARD_AXIS_CS: Vec3A = Vec3A::X;
const UP_AXIS: usize = 1;

/// Raycast vehicle over a single chassis body.
///
/// Each wheel is a ray from its hard point down the suspension direction;
/// the hit drives a spring-damper plus lateral and longitudinal friction impulses.
pub struct RaycastVehicle {
    raycaster: VehicleRaycaster,
    chassis: BodyHandle,
    pub wheels: ArrayVec<WheelInfo, NUM_WHEELS>,
    current_speed_kmh: f32,
}

impl RaycastVehicle {
    #[must_use]
    pub const fn new(chassis: BodyHandle) -> Self {
        Self {
            raycaster: VehicleRaycaster::new(chassis),
            chassis,
            wheels: ArrayVec::new_const(),
            current_speed_kmh: 0.0,
        }
    }

    #[must_use]
    pub const fn chassis(&self) -> BodyHandle {
        self.chassis
    }

    /// # Panics
    /// If more than [`NUM_WHEELS`] wheels are added
    pub fn add_wheel(&mut self, world: &PhysicsWorld, ci: WheelInfoConstructionInfo) -> usize {
        let mut wheel = WheelInfo::new(ci);
        let chassis = world.body(self.chassis);
        Self::update_wheel_transform_ws(&mut wheel, chassis);
        Self::update_wheel_transform(&mut wheel, chassis);

        self.wheels.push(wheel);
        self.wheels.len() - 1
    }

    #[must_use]
    pub const fn get_num_wheels(&self) -> usize {
        self.wheels.len()
    }

    pub fn set_steering_value(&mut self, value: f32, wheel: usize) {
        self.wheels[wheel].steering = value;
    }

    pub fn apply_engine_force(&mut self, force: f32, wheel: usize) {
        self.wheels[wheel].engine_force = force;
    }

    pub fn set_brake(&mut self, brake: f32, wheel: usize) {
        self.wheels[wheel].brake = brake;
    }

    /// Signed chassis speed along its forward axis, km/h
    #[must_use]
    pub const fn current_speed_kmh(&self) -> f32 {
        self.current_speed_kmh
    }

    #[must_use]
    pub fn wheel_world_transform(&self, wheel: usize) -> Pose {
        self.wheels[wheel].world_transform
    }

    fn update_wheel_transform_ws(wheel: &mut WheelInfo, chassis: &RigidBody) {
        wheel.raycast_info.is_in_contact = false;
        wheel.raycast_info.hard_point_ws = chassis.point_to_world(wheel.chassis_connection_point_cs);
        wheel.raycast_info.wheel_direction_ws = chassis.vector_to_world(wheel.wheel_direction_cs);
        wheel.raycast_info.wheel_axle_ws = chassis.vector_to_world(wheel.wheel_axle_cs);
    }

    /// Hub position at the current suspension length, rotated by steering then spin
    fn update_wheel_transform(wheel: &mut WheelInfo, chassis: &RigidBody) {
        let up_cs = -wheel.wheel_direction_cs;
        let steering_orn = Quat::from_axis_angle(up_cs.into(), wheel.steering);
        let rotating_orn = Quat::from_axis_angle(wheel.wheel_axle_cs.into(), wheel.rotation);

        let hard_point = chassis.point_to_world(wheel.chassis_connection_point_cs);
        let direction = chassis.vector_to_world(wheel.wheel_direction_cs);

        wheel.world_transform = Pose {
            position: hard_point + direction * wheel.raycast_info.suspension_length,
            rotation: (chassis.orientation * steering_orn * rotating_orn).normalize(),
        };
    }

    /// Refresh one wheel's world transform from the chassis pose
    pub fn update_wheel_transform_for(&mut self, world: &PhysicsWorld, wheel: usize) {
        let chassis = world.body(self.chassis);
        let info = &mut self.wheels[wheel];
        Self::update_wheel_transform(info, chassis);
    }

    fn ray_cast(
        raycaster: &VehicleRaycaster,
        wheel: &mut WheelInfo,
        world: &PhysicsWorld,
        chassis: &RigidBody,
    ) {
        Self::update_wheel_transform_ws(wheel, chassis);

        let ray_len = wheel.suspension_rest_length + wheel.wheels_radius;
        let source = wheel.raycast_info.hard_point_ws;
        let target = source + wheel.raycast_info.wheel_direction_ws * ray_len;
        wheel.raycast_info.contact_point_ws = target;
        wheel.raycast_info.ground_object = None;

        let Some(hit) = raycaster.cast_ray(world, source, target) else {
            wheel.raycast_info.suspension_length = wheel.suspension_rest_length;
            wheel.suspension_relative_velocity = 0.0;
            wheel.raycast_info.contact_normal_ws = -wheel.raycast_info.wheel_direction_ws;
            wheel.clipped_inv_contact_dot_suspension = 1.0;
            return;
        };

        let suspension_length = (hit.distance - wheel.wheels_radius)
            .clamp(wheel.min_suspension_length(), wheel.max_suspension_length());

        wheel.raycast_info.is_in_contact = true;
        wheel.raycast_info.ground_object = Some(hit.body);
        wheel.raycast_info.contact_point_ws = hit.hit_point_in_world;
        wheel.raycast_info.contact_normal_ws = hit.hit_normal_in_world;
        wheel.raycast_info.suspension_length = suspension_length;

        let denominator = hit
            .hit_normal_in_world
            .dot(wheel.raycast_info.wheel_direction_ws);
        let proj_vel = hit
            .hit_normal_in_world
            .dot(chassis.velocity_at_world_point(hit.hit_point_in_world));

        if denominator >= -0.1 {
            wheel.suspension_relative_velocity = 0.0;
            wheel.clipped_inv_contact_dot_suspension = 1.0 / 0.1;
        } else {
            let inv = -1.0 / denominator;
            wheel.suspension_relative_velocity = proj_vel * inv;
            wheel.clipped_inv_contact_dot_suspension = inv;
        }
    }

    /// Run one sub-step of wheel physics, applying impulses straight to the chassis
    pub fn update_vehicle(&mut self, world: &mut PhysicsWorld, time_step: f32) {
        {
            let chassis = world.body(self.chassis);
            let forward_ws = chassis.vector_to_world(FORWARD_AXIS_CS);
            let mut speed_kmh = 3.6 * chassis.linear_velocity.length();
            if forward_ws.dot(chassis.linear_velocity) < 0.0 {
                speed_kmh = -speed_kmh;
            }
            self.current_speed_kmh = speed_kmh;

            for wheel in &mut self.wheels {
                Self::update_wheel_transform(wheel, chassis);
                Self::ray_cast(&self.raycaster, wheel, world, chassis);
                wheel.update_suspension(chassis.get_mass());
            }
        }

        let chassis = world.body_mut(self.chassis);
        for wheel in &self.wheels {
            let suspension_force = wheel.wheels_suspension_force.min(wheel.max_suspension_force);
            if suspension_force == 0.0 {
                continue;
            }

            let impulse = wheel.raycast_info.contact_normal_ws * suspension_force * time_step;
            let rel_pos = wheel.raycast_info.contact_point_ws - chassis.position;
            chassis.apply_impulse(impulse, rel_pos);
        }

        self.update_friction(world, time_step);

        let chassis = world.body(self.chassis);
        let forward_ws = chassis.vector_to_world(FORWARD_AXIS_CS);
        for wheel in &mut self.wheels {
            Self::update_wheel_spin(wheel, chassis, forward_ws, time_step);
        }
    }

    fn update_wheel_spin(wheel: &mut WheelInfo, chassis: &RigidBody, forward_ws: Vec3A, dt: f32) {
        let vel = chassis.velocity_at_world_point(wheel.raycast_info.hard_point_ws);
        let normal = wheel.raycast_info.contact_normal_ws;
        let fwd = forward_ws - normal * forward_ws.dot(normal);

        wheel.delta_rotation = fwd.dot(vel) * dt / wheel.wheels_radius;

        if let Some(sliding_speed) = wheel.custom_sliding_rotational_speed
            && (wheel.sliding || !wheel.raycast_info.is_in_contact)
            && wheel.engine_force != 0.0
        {
            wheel.delta_rotation = wheel.engine_force.signum() * sliding_speed * dt;
        }

        if wheel.brake.abs() > wheel.engine_force.abs() {
            wheel.delta_rotation = 0.0;
        }

        wheel.rotation += wheel.delta_rotation;
        wheel.delta_rotation *= SPIN_DECAY;
    }

    fn update_friction(&mut self, world: &mut PhysicsWorld, time_step: f32) {
        {
            let chassis = world.body(self.chassis);
            for wheel in &mut self.wheels {
                wheel.side_impulse = 0.0;
                wheel.forward_impulse = 0.0;
                wheel.skid_info = 1.0;
                wheel.sliding = false;

                let Some(ground) = wheel.raycast_info.ground_object.map(|h| world.body(h)) else {
                    continue;
                };

                let surf_normal = wheel.raycast_info.contact_normal_ws;
                let axle = wheel.world_transform.rotation * wheel.wheel_axle_cs;
                let axle = (axle - surf_normal * axle.dot(surf_normal)).normalize_or_zero();
                let forward = surf_normal.cross(axle).normalize_or_zero();
                wheel.axle_ws = axle;
                wheel.forward_ws = forward;

                let contact = wheel.raycast_info.contact_point_ws;
                wheel.side_impulse = SIDE_FRICTION_STIFFNESS
                    * resolve_single_bilateral(chassis, contact, ground, contact, axle);

                let rolling_friction = if wheel.engine_force != 0.0 {
                    wheel.engine_force * time_step
                } else {
                    calc_rolling_friction(chassis, ground, contact, forward, wheel.brake)
                };
                wheel.forward_impulse = rolling_friction;

                let max_impulse = wheel.wheels_suspension_force * time_step * wheel.friction_slip;
                let x = wheel.forward_impulse * FWD_FACTOR;
                let y = wheel.side_impulse * SIDE_FACTOR;
                let impulse_squared = x * x + y * y;

                if impulse_squared > max_impulse * max_impulse {
                    wheel.sliding = true;
                    wheel.skid_info = max_impulse / impulse_squared.sqrt();
                }
            }
        }

        if self.wheels.iter().any(|w| w.sliding) {
            for wheel in &mut self.wheels {
                if wheel.side_impulse != 0.0 && wheel.skid_info < 1.0 {
                    wheel.forward_impulse *= wheel.skid_info;
                    wheel.side_impulse *= wheel.skid_info;
                }
            }
        }

        let chassis = world.body_mut(self.chassis);
        for wheel in &self.wheels {
            let rel_pos = wheel.raycast_info.contact_point_ws - chassis.position;

            if wheel.forward_impulse != 0.0 {
                chassis.apply_impulse(wheel.forward_ws * wheel.forward_impulse, rel_pos);
            }

            if wheel.side_impulse != 0.0 {
                let side_imp = wheel.axle_ws * wheel.side_impulse;

                // Lowering the lever arm keeps side forces from rolling the car over
                let mut local = chassis.vector_to_local(rel_pos);
                local[UP_AXIS] *= wheel.roll_influence;
                let rel_pos = chassis.vector_to_world(local);

                chassis.apply_impulse(side_imp, rel_pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{
        collision::shapes::{BoxShape, Shape},
        dynamics::rigid_body::RigidBodyConstructionInfo,
    };

    fn cart(world: &mut PhysicsWorld, height: f32) -> RaycastVehicle {
        world.add_static_plane(Vec3A::ZERO, Vec3A::Y);

        let shape = BoxShape::new(Vec3A::new(2.0, 0.3, 0.9));
        let mut info = RigidBodyConstructionInfo::new(150.0, Shape::Cuboid(shape));
        info.local_inertia = shape.calculate_local_inertia(150.0);
        info.start_position = Vec3A::new(0.0, height, 0.0);
        let chassis = world.add_body(info);

        let mut vehicle = RaycastVehicle::new(chassis);
        for (x, z) in [(-1.5, 0.9), (-1.5, -0.9), (1.5, 0.9), (1.5, -0.9)] {
            vehicle.add_wheel(
                world,
                WheelInfoConstructionInfo {
                    chassis_connection_cs: Vec3A::new(x, -0.3, z),
                    wheel_direction_cs: Vec3A::NEG_Y,
                    wheel_axle_cs: Vec3A::Z,
                    suspension_rest_length: 0.5,
                    max_suspension_travel: 0.3,
                    wheel_radius: 0.5,
                    suspension_stiffness: 30.0,
                    wheels_damping_compression: 4.4,
                    wheels_damping_relaxation: 2.3,
                    friction_slip: 5.0,
                    max_suspension_force: 100_000.0,
                    roll_influence: 0.3,
                    custom_sliding_rotational_speed: Some(-30.0),
                    is_front_wheel: x < 0.0,
                },
            );
        }

        vehicle
    }

    fn run(world: &mut PhysicsWorld, vehicle: &mut RaycastVehicle, steps: usize) {
        for _ in 0..steps {
            vehicle.update_vehicle(world, 1.0 / 60.0);
            world.step(1.0 / 60.0, &mut ());
        }
    }

    #[test]
    fn settles_on_springs() {
        let mut world = PhysicsWorld::default();
        let mut vehicle = cart(&mut world, 1.5);
        run(&mut world, &mut vehicle, 300);

        let chassis = world.body(vehicle.chassis());
        // Four springs of 30 * 150 balance 150 * 9.82 at about 0.08 compression
        assert!((chassis.position.y - 1.218).abs() < 0.05, "{}", chassis.position.y);
        assert!(vehicle.wheels.iter().all(|w| w.raycast_info.is_in_contact));
        assert!(chassis.linear_velocity.length() < 0.05);
    }

    #[test]
    fn negative_engine_force_drives_towards_neg_x() {
        let mut world = PhysicsWorld::default();
        let mut vehicle = cart(&mut world, 1.25);
        run(&mut world, &mut vehicle, 60);

        for i in 0..NUM_WHEELS {
            vehicle.apply_engine_force(-700.0, i);
        }
        run(&mut world, &mut vehicle, 120);

        let chassis = world.body(vehicle.chassis());
        assert!(chassis.linear_velocity.x < -1.0, "{}", chassis.linear_velocity);
        assert!(chassis.position.x < -0.5);
    }

    #[test]
    fn airborne_wheels_hang_at_rest_length() {
        let mut world = PhysicsWorld::new(Vec3A::ZERO);
        let mut vehicle = cart(&mut world, 10.0);
        run(&mut world, &mut vehicle, 1);

        for (i, wheel) in vehicle.wheels.iter().enumerate() {
            assert!(!wheel.raycast_info.is_in_contact);
            let pose = vehicle.wheel_world_transform(i);
            let expected = wheel.raycast_info.hard_point_ws + Vec3A::NEG_Y * 0.5;
            assert!(pose.position.abs_diff_eq(expected, 1e-4));
        }
    }
}
