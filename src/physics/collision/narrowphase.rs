use crate::physics::{
    collision::shapes::Shape, dynamics::rigid_body::RigidBody, linear_math::obb::Obb,
};
use arrayvec::ArrayVec;
use glam::Vec3A;

/// Corners closer than this to the other box's surface still count as touching
const CONTACT_MARGIN: f32 = 1e-3;

#[derive(Clone, Copy, Debug)]
pub struct ContactPoint {
    pub point: Vec3A,
    /// Unit normal pointing from the other body towards the dynamic one
    pub normal: Vec3A,
    pub depth: f32,
}

pub type ContactPoints = ArrayVec<ContactPoint, 8>;

/// Contact points between a dynamic box and a static plane or box.
///
/// Returns an empty set when the shapes are apart.
#[must_use]
pub fn collide(body: &RigidBody, other: &RigidBody) -> ContactPoints {
    let mut points = ContactPoints::new();
    let Some(obb) = body.world_obb() else {
        return points;
    };

    match &other.shape {
        Shape::Plane(plane) => {
            let (normal, constant) = plane.world_plane(other.position, other.orientation);
            for corner in obb.corners() {
                let depth = constant - normal.dot(corner);
                if depth > 0.0 {
                    points.push(ContactPoint {
                        point: corner,
                        normal,
                        depth,
                    });
                }
            }
        }
        Shape::Cuboid(_) => {
            let Some(other_obb) = other.world_obb() else {
                return points;
            };
            box_box(&obb, &other_obb, &mut points);
        }
    }

    points
}

fn box_box(obb: &Obb, other: &Obb, points: &mut ContactPoints) {
    let Some(pen) = obb.penetration(other) else {
        return;
    };

    for corner in obb.corners() {
        if other.contains_point(corner, CONTACT_MARGIN) {
            points.push(ContactPoint {
                point: corner,
                normal: pen.normal,
                depth: pen.depth,
            });
        }
    }

    if points.is_empty() {
        for corner in other.corners() {
            if obb.contains_point(corner, CONTACT_MARGIN) {
                points.push(ContactPoint {
                    point: corner,
                    normal: pen.normal,
                    depth: pen.depth,
                });
            }
        }
    }

    // Edge against edge: fall back to the point on the other box nearest our centre
    if points.is_empty() {
        points.push(ContactPoint {
            point: other.closest_point(obb.center),
            normal: pen.normal,
            depth: pen.depth,
        });
    }
}

/// Deepest penetration between the two bodies, used for position correction
#[must_use]
pub fn max_depth(body: &RigidBody, other: &RigidBody) -> Option<(Vec3A, f32)> {
    collide(body, other)
        .iter()
        .max_by(|a, b| a.depth.total_cmp(&b.depth))
        .map(|c| (c.normal, c.depth))
}

/// Overlap test for trigger volumes, no contact data
#[must_use]
pub fn overlaps(body: &RigidBody, other: &RigidBody) -> bool {
    if !body.world_aabb().intersects(&other.world_aabb()) {
        return false;
    }

    match (body.world_obb(), other.world_obb()) {
        (Some(a), Some(b)) => a.penetration(&b).is_some(),
        _ => !collide(body, other).is_empty(),
    }
}
