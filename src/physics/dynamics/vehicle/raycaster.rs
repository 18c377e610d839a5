use crate::physics::dynamics::{
    rigid_body::BodyHandle,
    world::PhysicsWorld,
};
use glam::Vec3A;

pub struct VehicleRaycasterResult {
    pub hit_point_in_world: Vec3A,
    pub hit_normal_in_world: Vec3A,
    pub distance: f32,
    pub body: BodyHandle,
}

/// Casts wheel rays against everything solid except the chassis itself
pub struct VehicleRaycaster {
    chassis: BodyHandle,
}

impl VehicleRaycaster {
    #[must_use]
    pub const fn new(chassis: BodyHandle) -> Self {
        Self { chassis }
    }

    #[must_use]
    pub fn cast_ray(
        &self,
        world: &PhysicsWorld,
        from: Vec3A,
        to: Vec3A,
    ) -> Option<VehicleRaycasterResult> {
        let hit = world.ray_cast(from, to, Some(self.chassis))?;

        Some(VehicleRaycasterResult {
            hit_point_in_world: hit.point,
            hit_normal_in_world: hit.normal.normalize(),
            distance: hit.distance,
            body: hit.body,
        })
    }
}
