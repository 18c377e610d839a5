use crate::physics::{
    collision::narrowphase::ContactPoint, dynamics::rigid_body::RigidBody,
};
use glam::Vec3A;
use std::f32::consts::FRAC_1_SQRT_2;

/// Approach speed below which contacts stop bouncing
const RESTITUTION_VELOCITY_THRESHOLD: f32 = 1.0;

/// Impulse along `normal` that removes a fifth of the relative velocity at the contact.
///
/// Uses the bodies' translational mass only, the way the wheel side-friction model expects.
#[must_use]
pub fn resolve_single_bilateral(
    body1: &RigidBody,
    pos1: Vec3A,
    body2: &RigidBody,
    pos2: Vec3A,
    normal: Vec3A,
) -> f32 {
    const CONTACT_DAMPING: f32 = -0.2;

    if normal.length_squared() > 1.1 {
        return 0.0;
    }

    let vel1 = body1.velocity_at_world_point(pos1);
    let vel2 = body2.velocity_at_world_point(pos2);
    let rel_vel = normal.dot(vel1 - vel2);

    let inv_mass_sum = body1.inverse_mass + body2.inverse_mass;
    if inv_mass_sum == 0.0 {
        return 0.0;
    }

    CONTACT_DAMPING * rel_vel / inv_mass_sum
}

/// Braking impulse along `friction_dir`, clamped to `max_impulse`
#[must_use]
pub fn calc_rolling_friction(
    body0: &RigidBody,
    body1: &RigidBody,
    contact_pos: Vec3A,
    friction_dir: Vec3A,
    max_impulse: f32,
) -> f32 {
    let vel = body0.velocity_at_world_point(contact_pos) - body1.velocity_at_world_point(contact_pos);
    let vrel = friction_dir.dot(vel);

    let denom = body0.compute_impulse_denominator(contact_pos, friction_dir)
        + body1.compute_impulse_denominator(contact_pos, friction_dir);
    if denom == 0.0 {
        return 0.0;
    }

    (-vrel / denom).clamp(-max_impulse, max_impulse)
}

/// Two unit vectors spanning the plane orthogonal to `n`
#[must_use]
pub fn plane_space(n: Vec3A) -> (Vec3A, Vec3A) {
    if n.z.abs() > FRAC_1_SQRT_2 {
        let a = n.y.mul_add(n.y, n.z * n.z);
        let k = 1. / a.sqrt();
        let p = Vec3A::new(0., -n.z * k, n.y * k);
        (p, Vec3A::new(a * k, -n.x * p.z, n.x * p.y))
    } else {
        let a = n.x.mul_add(n.x, n.y * n.y);
        let k = 1. / a.sqrt();
        let p = Vec3A::new(-n.y * k, n.x * k, 0.);
        (p, Vec3A::new(-n.z * p.y, n.z * p.x, a * k))
    }
}

/// One contact point between a dynamic body and an immovable one,
/// solved with accumulated, clamped impulses.
pub struct ContactConstraint {
    point: Vec3A,
    normal: Vec3A,
    tangents: [Vec3A; 2],
    normal_mass: f32,
    tangent_mass: [f32; 2],
    bounce_velocity: f32,
    friction: f32,
    normal_impulse: f32,
    tangent_impulse: [f32; 2],
}

impl ContactConstraint {
    #[must_use]
    pub fn new(body: &RigidBody, contact: &ContactPoint, friction: f32, restitution: f32) -> Self {
        let (t1, t2) = plane_space(contact.normal);
        let inv_or_zero = |d: f32| if d > 0.0 { 1.0 / d } else { 0.0 };

        let approach = contact
            .normal
            .dot(body.velocity_at_world_point(contact.point));
        let bounce_velocity = if approach < -RESTITUTION_VELOCITY_THRESHOLD {
            -restitution * approach
        } else {
            0.0
        };

        Self {
            point: contact.point,
            normal: contact.normal,
            tangents: [t1, t2],
            normal_mass: inv_or_zero(body.compute_impulse_denominator(contact.point, contact.normal)),
            tangent_mass: [
                inv_or_zero(body.compute_impulse_denominator(contact.point, t1)),
                inv_or_zero(body.compute_impulse_denominator(contact.point, t2)),
            ],
            bounce_velocity,
            friction,
            normal_impulse: 0.0,
            tangent_impulse: [0.0; 2],
        }
    }

    pub fn solve(&mut self, body: &mut RigidBody) {
        let rel_pos = self.point - body.position;

        let vn = self.normal.dot(body.get_velocity_in_local_point(rel_pos));
        let new_impulse =
            (self.normal_impulse + (self.bounce_velocity - vn) * self.normal_mass).max(0.0);
        let delta = new_impulse - self.normal_impulse;
        self.normal_impulse = new_impulse;
        body.apply_impulse(self.normal * delta, rel_pos);

        let limit = self.friction * self.normal_impulse;
        for i in 0..2 {
            let tangent = self.tangents[i];
            let vt = tangent.dot(body.get_velocity_in_local_point(rel_pos));
            let new_impulse =
                (self.tangent_impulse[i] - vt * self.tangent_mass[i]).clamp(-limit, limit);
            let delta = new_impulse - self.tangent_impulse[i];
            self.tangent_impulse[i] = new_impulse;
            body.apply_impulse(tangent * delta, rel_pos);
        }
    }

    #[must_use]
    pub const fn normal_impulse(&self) -> f32 {
        self.normal_impulse
    }
}
