use crate::{
    math::Pose,
    physics::{
        collision::shapes::Shape,
        linear_math::{aabb::Aabb, obb::Obb, transform_util::integrate_orientation},
    },
};
use glam::{Affine3A, Mat3A, Quat, Vec3A};

/// Index of a body inside its [`PhysicsWorld`](super::world::PhysicsWorld)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyKind {
    Dynamic,
    /// Zero mass, solid
    Static,
    /// Zero mass, reports overlaps but never pushes back
    Trigger,
}

impl BodyKind {
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::Trigger)
    }
}

pub struct RigidBodyConstructionInfo {
    pub mass: f32,
    pub shape: Shape,
    /// Offset of the shape's centre from the centre of mass, in body space
    pub shape_offset: Vec3A,
    pub start_position: Vec3A,
    pub start_rotation: Quat,
    pub local_inertia: Vec3A,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    pub is_trigger: bool,
}

impl RigidBodyConstructionInfo {
    #[must_use]
    pub const fn new(mass: f32, shape: Shape) -> Self {
        Self {
            mass,
            shape,
            shape_offset: Vec3A::ZERO,
            start_position: Vec3A::ZERO,
            start_rotation: Quat::IDENTITY,
            local_inertia: Vec3A::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
            friction: 0.5,
            restitution: 0.0,
            is_trigger: false,
        }
    }
}

pub struct RigidBody {
    pub kind: BodyKind,
    pub shape: Shape,
    pub shape_offset: Vec3A,
    pub position: Vec3A,
    pub orientation: Quat,
    pub linear_velocity: Vec3A,
    pub angular_velocity: Vec3A,
    pub inverse_mass: f32,
    pub inv_inertia_local: Vec3A,
    pub inv_inertia_tensor_world: Mat3A,
    pub total_force: Vec3A,
    pub total_torque: Vec3A,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl RigidBody {
    #[must_use]
    pub fn new(info: RigidBodyConstructionInfo) -> Self {
        let (kind, inverse_mass) = if info.is_trigger {
            (BodyKind::Trigger, 0.0)
        } else if info.mass == 0.0 {
            (BodyKind::Static, 0.0)
        } else {
            (BodyKind::Dynamic, 1.0 / info.mass)
        };

        let inv_inertia_local = if kind == BodyKind::Dynamic {
            Vec3A::select(
                info.local_inertia.cmpeq(Vec3A::ZERO),
                Vec3A::ZERO,
                1.0 / info.local_inertia,
            )
        } else {
            Vec3A::ZERO
        };

        let orientation = info.start_rotation.normalize();

        Self {
            kind,
            shape: info.shape,
            shape_offset: info.shape_offset,
            position: info.start_position,
            orientation,
            linear_velocity: Vec3A::ZERO,
            angular_velocity: Vec3A::ZERO,
            inverse_mass,
            inv_inertia_local,
            inv_inertia_tensor_world: Self::get_inertia_tensor(
                Mat3A::from_quat(orientation),
                inv_inertia_local,
            ),
            total_force: Vec3A::ZERO,
            total_torque: Vec3A::ZERO,
            linear_damping: info.linear_damping.clamp(0.0, 1.0),
            angular_damping: info.angular_damping.clamp(0.0, 1.0),
            friction: info.friction,
            restitution: info.restitution,
        }
    }

    #[must_use]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self.kind, BodyKind::Dynamic)
    }

    #[must_use]
    pub fn get_mass(&self) -> f32 {
        if self.inverse_mass == 0.0 {
            0.0
        } else {
            1.0 / self.inverse_mass
        }
    }

    #[must_use]
    pub const fn pose(&self) -> Pose {
        Pose::new(self.position, self.orientation)
    }

    #[must_use]
    pub fn world_transform(&self) -> Affine3A {
        self.pose().to_affine()
    }

    /// World-space centre of the collision shape
    #[must_use]
    pub fn shape_center(&self) -> Vec3A {
        self.position + self.orientation * self.shape_offset
    }

    /// `None` for planes
    #[must_use]
    pub fn world_obb(&self) -> Option<Obb> {
        match &self.shape {
            Shape::Cuboid(b) => Some(b.obb(self.shape_center(), self.orientation)),
            Shape::Plane(_) => None,
        }
    }

    #[must_use]
    pub fn world_aabb(&self) -> Aabb {
        match &self.shape {
            Shape::Cuboid(b) => b.get_aabb(self.shape_center(), self.orientation),
            Shape::Plane(p) => p.get_aabb(self.position, self.orientation),
        }
    }

    #[must_use]
    pub fn vector_to_world(&self, local: Vec3A) -> Vec3A {
        self.orientation * local
    }

    #[must_use]
    pub fn vector_to_local(&self, world: Vec3A) -> Vec3A {
        self.orientation.inverse() * world
    }

    #[must_use]
    pub fn point_to_world(&self, local: Vec3A) -> Vec3A {
        self.position + self.orientation * local
    }

    fn get_inertia_tensor(world_mat: Mat3A, inv_inertia_local: Vec3A) -> Mat3A {
        world_mat * Mat3A::from_diagonal(inv_inertia_local.into()) * world_mat.transpose()
    }

    pub fn update_inertia_tensor(&mut self) {
        self.inv_inertia_tensor_world = Self::get_inertia_tensor(
            Mat3A::from_quat(self.orientation),
            self.inv_inertia_local,
        );
    }

    pub fn apply_torque_impulse(&mut self, torque: Vec3A) {
        debug_assert!(!torque.is_nan());
        self.angular_velocity += self.inv_inertia_tensor_world * torque;
    }

    /// `rel_pos` is relative to the centre of mass
    pub fn apply_impulse(&mut self, impulse: Vec3A, rel_pos: Vec3A) {
        if !self.is_dynamic() {
            return;
        }

        self.apply_central_impulse(impulse);
        self.apply_torque_impulse(rel_pos.cross(impulse));
    }

    pub fn apply_central_impulse(&mut self, impulse: Vec3A) {
        debug_assert!(!impulse.is_nan());
        self.linear_velocity += impulse * self.inverse_mass;
    }

    pub fn apply_central_force(&mut self, force: Vec3A) {
        debug_assert!(!force.is_nan());
        self.total_force += force;
    }

    pub fn apply_torque(&mut self, torque: Vec3A) {
        debug_assert!(!torque.is_nan());
        self.total_torque += torque;
    }

    pub fn apply_damping(&mut self, time_step: f32) {
        self.linear_velocity *= (1.0 - self.linear_damping).powf(time_step);
        self.angular_velocity *= (1.0 - self.angular_damping).powf(time_step);
    }

    /// Velocity of a point `rel_pos` away from the centre of mass
    #[must_use]
    pub fn get_velocity_in_local_point(&self, rel_pos: Vec3A) -> Vec3A {
        self.linear_velocity + self.angular_velocity.cross(rel_pos)
    }

    #[must_use]
    pub fn velocity_at_world_point(&self, point: Vec3A) -> Vec3A {
        self.get_velocity_in_local_point(point - self.position)
    }

    /// Effective inverse mass along `normal` for an impulse at `point`
    #[must_use]
    pub fn compute_impulse_denominator(&self, point: Vec3A, normal: Vec3A) -> f32 {
        if !self.is_dynamic() {
            return 0.0;
        }

        let r = point - self.position;
        let c0 = r.cross(normal);
        let vec = (self.inv_inertia_tensor_world * c0).cross(r);
        self.inverse_mass + normal.dot(vec)
    }

    /// Semi-implicit velocity update from accumulated forces and gravity
    pub fn integrate_velocities(&mut self, gravity: Vec3A, time_step: f32) {
        if !self.is_dynamic() {
            return;
        }

        self.linear_velocity += (self.total_force * self.inverse_mass + gravity) * time_step;
        self.angular_velocity += self.inv_inertia_tensor_world * self.total_torque * time_step;
        self.apply_damping(time_step);
    }

    pub fn integrate_transform(&mut self, time_step: f32) {
        if !self.is_dynamic() {
            return;
        }

        self.position += self.linear_velocity * time_step;
        self.orientation =
            integrate_orientation(self.orientation, self.angular_velocity, time_step);
        self.update_inertia_tensor();
    }

    pub fn set_pose(&mut self, position: Vec3A, orientation: Quat) {
        self.position = position;
        self.orientation = orientation.normalize();
        self.update_inertia_tensor();
    }

    pub const fn clear_forces(&mut self) {
        self.total_force = Vec3A::ZERO;
        self.total_torque = Vec3A::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::shapes::BoxShape;

    fn unit_box(mass: f32) -> RigidBody {
        let shape = BoxShape::new(Vec3A::splat(0.5));
        let mut info = RigidBodyConstructionInfo::new(mass, Shape::Cuboid(shape));
        info.local_inertia = shape.calculate_local_inertia(mass);
        RigidBody::new(info)
    }

    #[test]
    fn zero_mass_is_static() {
        let body = unit_box(0.0);
        assert_eq!(body.kind, BodyKind::Static);
        assert_eq!(body.get_mass(), 0.0);
    }

    #[test]
    fn off_centre_impulse_spins() {
        let mut body = unit_box(2.0);
        body.apply_impulse(Vec3A::new(0.0, 0.0, 2.0), Vec3A::new(0.5, 0.0, 0.0));

        assert!(body.linear_velocity.abs_diff_eq(Vec3A::new(0.0, 0.0, 1.0), 1e-6));
        // r x J = (0.5, 0, 0) x (0, 0, 2) = (0, -1, 0)
        assert!(body.angular_velocity.y < 0.0);
    }

    #[test]
    fn damping_is_time_scaled() {
        let mut body = unit_box(1.0);
        body.linear_damping = 0.5;
        body.linear_velocity = Vec3A::X;
        body.apply_damping(1.0);
        assert!((body.linear_velocity.x - 0.5).abs() < 1e-6);
    }
}
