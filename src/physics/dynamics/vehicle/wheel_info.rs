use crate::{math::Pose, physics::dynamics::rigid_body::BodyHandle};
use glam::Vec3A;

#[derive(Clone, Copy, Debug)]
pub struct WheelInfoConstructionInfo {
    pub chassis_connection_cs: Vec3A,
    pub wheel_direction_cs: Vec3A,
    pub wheel_axle_cs: Vec3A,
    pub suspension_rest_length: f32,
    pub max_suspension_travel: f32,
    pub wheel_radius: f32,
    pub suspension_stiffness: f32,
    pub wheels_damping_compression: f32,
    pub wheels_damping_relaxation: f32,
    pub friction_slip: f32,
    pub max_suspension_force: f32,
    pub roll_influence: f32,
    /// Spin speed forced onto a driven wheel that is sliding or airborne
    pub custom_sliding_rotational_speed: Option<f32>,
    pub is_front_wheel: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RaycastInfo {
    pub contact_normal_ws: Vec3A,
    pub contact_point_ws: Vec3A,
    pub suspension_length: f32,
    pub hard_point_ws: Vec3A,
    pub wheel_direction_ws: Vec3A,
    pub wheel_axle_ws: Vec3A,
    pub is_in_contact: bool,
    pub ground_object: Option<BodyHandle>,
}

#[derive(Clone, Copy, Debug)]
pub struct WheelInfo {
    pub raycast_info: RaycastInfo,
    pub world_transform: Pose,
    pub chassis_connection_point_cs: Vec3A,
    pub wheel_direction_cs: Vec3A,
    pub wheel_axle_cs: Vec3A,
    pub suspension_rest_length: f32,
    pub max_suspension_travel: f32,
    pub wheels_radius: f32,
    pub suspension_stiffness: f32,
    pub wheels_damping_compression: f32,
    pub wheels_damping_relaxation: f32,
    pub friction_slip: f32,
    pub max_suspension_force: f32,
    pub roll_influence: f32,
    pub custom_sliding_rotational_speed: Option<f32>,
    pub is_front_wheel: bool,
    pub steering: f32,
    /// Accumulated spin about the axle, radians
    pub rotation: f32,
    pub delta_rotation: f32,
    pub engine_force: f32,
    pub brake: f32,
    pub clipped_inv_contact_dot_suspension: f32,
    pub suspension_relative_velocity: f32,
    pub wheels_suspension_force: f32,
    pub skid_info: f32,
    pub side_impulse: f32,
    pub forward_impulse: f32,
    pub axle_ws: Vec3A,
    pub forward_ws: Vec3A,
    pub sliding: bool,
}

impl WheelInfo {
    #[must_use]
    pub fn new(ci: WheelInfoConstructionInfo) -> Self {
        Self {
            raycast_info: RaycastInfo {
                suspension_length: ci.suspension_rest_length,
                ..Default::default()
            },
            world_transform: Pose::IDENTITY,
            chassis_connection_point_cs: ci.chassis_connection_cs,
            wheel_direction_cs: ci.wheel_direction_cs,
            wheel_axle_cs: ci.wheel_axle_cs,
            suspension_rest_length: ci.suspension_rest_length,
            max_suspension_travel: ci.max_suspension_travel,
            wheels_radius: ci.wheel_radius,
            suspension_stiffness: ci.suspension_stiffness,
            wheels_damping_compression: ci.wheels_damping_compression,
            wheels_damping_relaxation: ci.wheels_damping_relaxation,
            friction_slip: ci.friction_slip,
            max_suspension_force: ci.max_suspension_force,
            roll_influence: ci.roll_influence,
            custom_sliding_rotational_speed: ci.custom_sliding_rotational_speed,
            is_front_wheel: ci.is_front_wheel,
            steering: 0.0,
            rotation: 0.0,
            delta_rotation: 0.0,
            engine_force: 0.0,
            brake: 0.0,
            clipped_inv_contact_dot_suspension: 1.0,
            suspension_relative_velocity: 0.0,
            wheels_suspension_force: 0.0,
            skid_info: 0.0,
            side_impulse: 0.0,
            forward_impulse: 0.0,
            axle_ws: Vec3A::ZERO,
            forward_ws: Vec3A::ZERO,
            sliding: false,
        }
    }

    #[must_use]
    pub const fn min_suspension_length(&self) -> f32 {
        self.suspension_rest_length - self.max_suspension_travel
    }

    #[must_use]
    pub const fn max_suspension_length(&self) -> f32 {
        self.suspension_rest_length + self.max_suspension_travel
    }

    /// Spring force scaled by chassis mass, clamped at zero
    pub fn update_suspension(&mut self, chassis_mass: f32) {
        if !self.raycast_info.is_in_contact {
            self.wheels_suspension_force = 0.0;
            return;
        }

        let length_diff = self.suspension_rest_length - self.raycast_info.suspension_length;
        let mut force =
            self.suspension_stiffness * length_diff * self.clipped_inv_contact_dot_suspension;

        let damping = if self.suspension_relative_velocity < 0.0 {
            self.wheels_damping_compression
        } else {
            self.wheels_damping_relaxation
        };
        force -= damping * self.suspension_relative_velocity;

        self.wheels_suspension_force = (force * chassis_mass).max(0.0);
    }
}
