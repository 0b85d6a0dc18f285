use lever_physics::{moment_for_segment, PhysicsWorld, RigidBody, Segment, Shape, Vec2};

use crate::config::LeverConfig;

/// Arm geometry in the lever's own frame: from the stub tip above the origin
/// down to `length` below it.
pub fn lever_segment(config: &LeverConfig) -> Segment {
    Segment::new(Vec2::new(0.0, config.stub), Vec2::new(0.0, -config.length), config.radius)
}

/// Moment of the arm, treated as a thin rod over the segment's core.
pub fn lever_moment(config: &LeverConfig) -> f64 {
    let segment = lever_segment(config);
    moment_for_segment(config.mass, segment.a, segment.b, 0.0)
}

/// Where the lever body sits for a given anchor: `anchor + box_offset`
/// lowered by the stub, so the stub tip lands on the pivot point.
pub fn lever_position(config: &LeverConfig, anchor: Vec2, box_offset: Vec2) -> Vec2 {
    anchor + box_offset + Vec2::new(0.0, -config.stub)
}

/// Builds one lever and registers it with the world, returning its body index.
pub fn add_lever(world: &mut PhysicsWorld, config: &LeverConfig, anchor: Vec2, box_offset: Vec2) -> usize {
    let mut body = RigidBody::new(config.mass, lever_moment(config))
        .with_shape(Shape::Segment(lever_segment(config)))
        .with_position(lever_position(config, anchor, box_offset));
    body.set_elasticity(config.elasticity);
    body.set_friction(config.friction);

    world.add_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_lever_moment() {
        let config = SceneConfig::default().lever;
        // L = 75, centre at (0, -22.5): 10 * (75^2 / 12 + 22.5^2)
        assert!((lever_moment(&config) - 9750.0).abs() < EPSILON);
    }

    #[test]
    fn test_add_lever() {
        let config = SceneConfig::default();
        let mut world = PhysicsWorld::with_settings(config.gravity, config.iterations);
        let idx = add_lever(&mut world, &config.lever, config.pos_a, config.box_offset);

        let body = world.body(idx).unwrap();
        assert!((body.position - Vec2::new(10.0, -75.0)).magnitude() < EPSILON);
        assert_eq!(body.mass, 10.0);
        assert_eq!(body.material.elasticity, 0.0);
        assert_eq!(body.material.friction, 0.7);
        match &body.shape {
            Some(Shape::Segment(segment)) => {
                assert_eq!(segment.a, Vec2::new(0.0, 15.0));
                assert_eq!(segment.b, Vec2::new(0.0, -60.0));
                assert_eq!(segment.radius, 10.0);
            }
            other => panic!("expected a segment, got {:?}", other),
        }
        // Stub tip on the pivot point
        let tip = body.local_to_world(Vec2::new(0.0, 15.0));
        assert!((tip - (config.pos_a + config.box_offset)).magnitude() < EPSILON);
    }
}
