use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::{Circle, Segment, Shape};
use crate::shapes::segment::closest_point_on_segment;
use super::manifold::CollisionManifold;

/// Two rounded features (discs) overlapping: centres and radii in world space.
/// The normal points from the first centre to the second.
fn disc_overlap(
    center_a: Vec2,
    radius_a: f64,
    body_a_idx: usize,
    center_b: Vec2,
    radius_b: f64,
    body_b_idx: usize,
) -> Option<CollisionManifold> {
    let dist_vec = center_b - center_a;
    let dist_sq = dist_vec.magnitude_squared();
    let radii_sum = radius_a + radius_b;

    if dist_sq >= radii_sum * radii_sum {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance > 1e-10 {
        dist_vec * (1.0 / distance)
    } else {
        // Centres coincide, pick an arbitrary direction
        Vec2::UP
    };

    // Halfway between the two surfaces
    let surface_a = center_a + normal * radius_a;
    let surface_b = center_b - normal * radius_b;

    Some(CollisionManifold {
        body_a_idx,
        body_b_idx,
        normal,
        depth: radii_sum - distance,
        point: surface_a.lerp(surface_b, 0.5),
    })
}

/// Checks for collision between two circles.
pub fn check_circle_circle(
    body_a: &RigidBody,
    circle_a: &Circle,
    body_a_idx: usize,
    body_b: &RigidBody,
    circle_b: &Circle,
    body_b_idx: usize,
) -> Option<CollisionManifold> {
    disc_overlap(
        body_a.local_to_world(circle_a.offset),
        circle_a.radius,
        body_a_idx,
        body_b.local_to_world(circle_b.offset),
        circle_b.radius,
        body_b_idx,
    )
}

/// Checks for collision between a capsule (body A) and a circle (body B).
/// The normal points from the capsule towards the circle.
pub fn check_segment_circle(
    segment_body: &RigidBody,
    segment: &Segment,
    segment_body_idx: usize,
    circle_body: &RigidBody,
    circle: &Circle,
    circle_body_idx: usize,
) -> Option<CollisionManifold> {
    let a_world = segment_body.local_to_world(segment.a);
    let b_world = segment_body.local_to_world(segment.b);
    let center = circle_body.local_to_world(circle.offset);

    let (closest, _) = closest_point_on_segment(a_world, b_world, center);

    let mut manifold = disc_overlap(
        closest,
        segment.radius,
        segment_body_idx,
        center,
        circle.radius,
        circle_body_idx,
    )?;

    // Centre exactly on the core segment: push out along the segment's perpendicular.
    if closest.distance_squared(center) <= 1e-20 {
        let side = (b_world - a_world).perpendicular().normalize();
        if side != Vec2::ZERO {
            manifold.normal = side;
        }
    }

    Some(manifold)
}

/// Narrowphase dispatch on the pair of attached shapes.
/// Capsule-capsule pairs are not generated.
pub fn check_collision(
    body_a: &RigidBody,
    body_a_idx: usize,
    body_b: &RigidBody,
    body_b_idx: usize,
) -> Option<CollisionManifold> {
    match (body_a.shape.as_ref()?, body_b.shape.as_ref()?) {
        (Shape::Circle(ca), Shape::Circle(cb)) => {
            check_circle_circle(body_a, ca, body_a_idx, body_b, cb, body_b_idx)
        }
        (Shape::Segment(sa), Shape::Circle(cb)) => {
            check_segment_circle(body_a, sa, body_a_idx, body_b, cb, body_b_idx)
        }
        (Shape::Circle(ca), Shape::Segment(sb)) => {
            check_segment_circle(body_b, sb, body_b_idx, body_a, ca, body_a_idx)
                .map(CollisionManifold::flipped)
        }
        (Shape::Segment(_), Shape::Segment(_)) => None,
    }
}
