//! Minimal rigid-body backend: one dynamic chassis driven by a raycast vehicle,
//! colliding against static planes, static boxes and non-solid trigger boxes.

pub mod collision;
pub mod dynamics;
pub mod linear_math;

pub use collision::shapes::{BoxShape, Shape, StaticPlaneShape};
pub use dynamics::{
    rigid_body::{BodyHandle, BodyKind, RigidBody, RigidBodyConstructionInfo},
    vehicle::{RaycastVehicle, WheelInfo, WheelInfoConstructionInfo},
    world::{ContactEvent, ContactListener, PhysicsWorld, RayHit},
};
pub use linear_math::aabb::Aabb;
