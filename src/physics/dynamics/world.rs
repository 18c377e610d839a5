use super::{
    contact_constraint::ContactConstraint,
    rigid_body::{BodyHandle, BodyKind, RigidBody, RigidBodyConstructionInfo},
};
use crate::{
    consts::GRAVITY,
    physics::{
        collision::{
            narrowphase::{self, ContactPoints},
            shapes::{Shape, StaticPlaneShape},
        },
        linear_math::aabb::Aabb,
    },
};
use glam::Vec3A;
use std::time::Duration;

/// Penetration left in place to keep resting contacts stable
const ALLOWED_PENETRATION: f32 = 0.01;
/// Share of the remaining penetration removed per step
const POSITION_CORRECTION: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub body: BodyHandle,
    pub point: Vec3A,
    pub normal: Vec3A,
    /// Distance from the ray origin
    pub distance: f32,
}

/// A dynamic body touched or overlapped another body during a step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactEvent {
    pub body: BodyHandle,
    pub other: BodyHandle,
    pub other_kind: BodyKind,
    /// Simulated time at the end of the step that produced the contact
    pub time: Duration,
}

/// Receives contact events synchronously, inside [`PhysicsWorld::step`]
pub trait ContactListener {
    fn on_contact(&mut self, event: ContactEvent);
}

impl ContactListener for Vec<ContactEvent> {
    fn on_contact(&mut self, event: ContactEvent) {
        self.push(event);
    }
}

impl ContactListener for () {
    fn on_contact(&mut self, _event: ContactEvent) {}
}

struct PairManifold {
    body: usize,
    other: usize,
    constraints: Vec<ContactConstraint>,
}

pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    gravity: Vec3A,
    solver_iterations: u32,
    elapsed: Duration,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(GRAVITY)
    }
}

impl PhysicsWorld {
    #[must_use]
    pub const fn new(gravity: Vec3A) -> Self {
        Self {
            bodies: Vec::new(),
            gravity,
            solver_iterations: 10,
            elapsed: Duration::ZERO,
        }
    }

    pub fn add_body(&mut self, info: RigidBodyConstructionInfo) -> BodyHandle {
        self.bodies.push(RigidBody::new(info));
        BodyHandle(self.bodies.len() - 1)
    }

    /// Static infinite plane through `origin`
    pub fn add_static_plane(&mut self, origin: Vec3A, normal: Vec3A) -> BodyHandle {
        let mut info =
            RigidBodyConstructionInfo::new(0.0, Shape::Plane(StaticPlaneShape::new(normal, 0.0)));
        info.start_position = origin;
        self.add_body(info)
    }

    #[must_use]
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// # Panics
    /// If `handle` came from another world
    #[must_use]
    pub fn body(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.0]
    }

    /// # Panics
    /// If `handle` came from another world
    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.0]
    }

    #[must_use]
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    #[must_use]
    pub const fn gravity(&self) -> Vec3A {
        self.gravity
    }

    /// Simulated time since the world was created
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Closest solid hit along `from -> to`, skipping `ignore`
    #[must_use]
    pub fn ray_cast(&self, from: Vec3A, to: Vec3A, ignore: Option<BodyHandle>) -> Option<RayHit> {
        let ray_len = (to - from).length();
        if ray_len <= f32::EPSILON {
            return None;
        }

        let mut best: Option<(f32, RayHit)> = None;
        for (idx, body) in self.bodies.iter().enumerate() {
            if Some(BodyHandle(idx)) == ignore || !body.kind.is_solid() {
                continue;
            }

            let Some((fraction, normal)) = Self::ray_test_body(body, from, to) else {
                continue;
            };

            if best.as_ref().is_none_or(|(f, _)| fraction < *f) {
                best = Some((
                    fraction,
                    RayHit {
                        body: BodyHandle(idx),
                        point: from + (to - from) * fraction,
                        normal,
                        distance: fraction * ray_len,
                    },
                ));
            }
        }

        best.map(|(_, hit)| hit)
    }

    fn ray_test_body(body: &RigidBody, from: Vec3A, to: Vec3A) -> Option<(f32, Vec3A)> {
        match &body.shape {
            Shape::Plane(plane) => {
                let (normal, constant) = plane.world_plane(body.position, body.orientation);
                StaticPlaneShape::ray_fraction(normal, constant, from, to)
                    .map(|fraction| (fraction, normal))
            }
            Shape::Cuboid(shape) => {
                let center = body.shape_center();
                let inv_rot = body.orientation.inverse();
                let local_from = inv_rot * (from - center);
                let local_to = inv_rot * (to - center);

                let half = shape.get_half_extents();
                let local_box = Aabb::new(-half, half);
                let fraction = local_box.ray_intersection(local_from, local_to)?;

                let local_hit = local_from + (local_to - local_from) * fraction;
                let axis = (local_hit / half).abs().max_position();
                let mut local_normal = Vec3A::ZERO;
                local_normal[axis] = local_hit[axis].signum();

                Some((fraction, body.orientation * local_normal))
            }
        }
    }

    /// Advance one fixed step, reporting every touched or overlapped pair to `listener` once.
    ///
    /// Only dynamic-versus-immovable pairs are tested.
    pub fn step<L: ContactListener + ?Sized>(&mut self, time_step: f32, listener: &mut L) {
        debug_assert!(time_step > 0.0);

        for body in &mut self.bodies {
            body.integrate_velocities(self.gravity, time_step);
        }

        let (mut manifolds, overlaps) = self.find_contacts();

        for _ in 0..self.solver_iterations {
            for manifold in &mut manifolds {
                let body = &mut self.bodies[manifold.body];
                for constraint in &mut manifold.constraints {
                    constraint.solve(body);
                }
            }
        }

        self.correct_positions(&manifolds);

        for body in &mut self.bodies {
            body.integrate_transform(time_step);
            body.clear_forces();
        }

        self.elapsed += Duration::from_secs_f32(time_step);

        let touched = manifolds
            .iter()
            .map(|m| (m.body, m.other))
            .chain(overlaps);
        for (body, other) in touched {
            listener.on_contact(ContactEvent {
                body: BodyHandle(body),
                other: BodyHandle(other),
                other_kind: self.bodies[other].kind,
                time: self.elapsed,
            });
        }
    }

    fn find_contacts(&self) -> (Vec<PairManifold>, Vec<(usize, usize)>) {
        let mut manifolds = Vec::new();
        let mut overlaps = Vec::new();

        for (i, body) in self.bodies.iter().enumerate() {
            if !body.is_dynamic() {
                continue;
            }

            let body_aabb = body.world_aabb();
            for (j, other) in self.bodies.iter().enumerate() {
                if other.is_dynamic() || !body_aabb.intersects(&other.world_aabb()) {
                    continue;
                }

                if other.kind == BodyKind::Trigger {
                    if narrowphase::overlaps(body, other) {
                        overlaps.push((i, j));
                    }
                    continue;
                }

                let points: ContactPoints = narrowphase::collide(body, other);
                if points.is_empty() {
                    continue;
                }

                let friction = body.friction * other.friction;
                let restitution = body.restitution * other.restitution;
                manifolds.push(PairManifold {
                    body: i,
                    other: j,
                    constraints: points
                        .iter()
                        .map(|p| ContactConstraint::new(body, p, friction, restitution))
                        .collect(),
                });
            }
        }

        (manifolds, overlaps)
    }

    /// Pairs are corrected one after another against the updated pose,
    /// so overlapping coplanar colliders do not push the body out twice.
    fn correct_positions(&mut self, manifolds: &[PairManifold]) {
        for manifold in manifolds {
            let (body, other) = if manifold.body < manifold.other {
                let (lo, hi) = self.bodies.split_at_mut(manifold.other);
                (&mut lo[manifold.body], &hi[0])
            } else {
                let (lo, hi) = self.bodies.split_at_mut(manifold.body);
                (&mut hi[0], &lo[manifold.other])
            };

            let Some((normal, depth)) = narrowphase::max_depth(body, other) else {
                continue;
            };

            let correction = (depth - ALLOWED_PENETRATION).max(0.0) * POSITION_CORRECTION;
            body.position += normal * correction;
        }
    }
}
