use lever_physics::{PhysicsWorld, Vec2};
use pinball::{lock_world, spawn_ball, Scene, SceneConfig};

const EPSILON: f64 = 1e-9;
const DT: f64 = 1.0 / 60.0;

#[test]
fn test_lever_positions_after_assembly() {
    let scene = Scene::build(SceneConfig::default());
    let world = lock_world(&scene.world);

    let left = world.body(scene.rig.left.body).unwrap().position;
    let right = world.body(scene.rig.right.body).unwrap().position;
    assert!((left - Vec2::new(10.0, -75.0)).magnitude() < EPSILON, "left at {:?}", left);
    assert!((right - Vec2::new(200.0, -75.0)).magnitude() < EPSILON, "right at {:?}", right);
}

#[test]
fn test_assembly_counts() {
    let scene = Scene::build(SceneConfig::default());
    let world = lock_world(&scene.world);

    assert_eq!(world.dynamic_body_count(), 2);
    // World static body plus the left rig's auxiliary one
    assert_eq!(world.static_body_count(), 2);
    assert_eq!(world.constraint_count(), 4);

    let pivots = [scene.rig.left.pivot, scene.rig.right.pivot];
    let limits = [scene.rig.left.limit, scene.rig.right.limit];
    assert_ne!(pivots[0], pivots[1]);
    assert_ne!(limits[0], limits[1]);
    for idx in pivots.iter().chain(limits.iter()) {
        assert!(world.constraint(*idx).is_some());
    }
}

#[test]
fn test_pivots_hold_under_gravity() {
    let config = SceneConfig::default();
    let scene = Scene::build(config.clone());
    let driver = scene.frame_driver();

    for _ in 0..240 {
        driver.update(DT);
    }

    let world = lock_world(&scene.world);
    for (lever, anchor) in [(scene.rig.left, config.pos_a), (scene.rig.right, config.pos_b)] {
        let tip = world.body(lever.body).unwrap().local_to_world(Vec2::new(0.0, config.lever.stub));
        let pivot = anchor + config.box_offset;
        assert!(tip.distance(pivot) < 0.5, "lever {} drifted to {:?}", lever.body, tip);
    }
}

#[test]
fn test_levers_settle_on_their_near_bound() {
    let scene = Scene::build(SceneConfig::default());
    let driver = scene.frame_driver();

    for _ in 0..300 {
        driver.update(DT);
    }

    let world = lock_world(&scene.world);
    let left = scene.rig.left;
    let right = scene.rig.right;
    assert!((left.joint_angle(&world) - left.max_angle).abs() < 0.05, "left {}", left.joint_angle(&world));
    assert!((right.joint_angle(&world) - right.min_angle).abs() < 0.05, "right {}", right.joint_angle(&world));
}

#[test]
fn test_joint_angle_is_the_negated_lever_rotation() {
    let scene = Scene::build(SceneConfig::default());
    let driver = scene.frame_driver();
    for _ in 0..300 {
        driver.update(DT);
    }

    let world = lock_world(&scene.world);
    let swing = std::f64::consts::PI / 3.0;
    for (lever, rest_rotation) in [(scene.rig.left, swing), (scene.rig.right, -swing)] {
        let rotation = world.body(lever.body).unwrap().rotation;
        assert!((lever.joint_angle(&world) + rotation).abs() < EPSILON);
        assert!((rotation - rest_rotation).abs() < 0.05, "lever {} rests at {}", lever.body, rotation);
    }
}

#[test]
fn test_joint_angles_stay_in_sector_under_repeated_strikes() {
    let config = SceneConfig::default();
    let scene = Scene::build(config.clone());
    let driver = scene.frame_driver();
    let input = scene.input();

    {
        // Something for the levers to hit
        let mut world = lock_world(&scene.world);
        for u in [0.0, 0.3, 0.7, 1.0] {
            spawn_ball(&mut world, &config, u);
        }
    }

    // Let both levers reach their sectors first
    for _ in 0..120 {
        driver.update(DT);
    }

    // One frame of travel at full strike speed
    let overshoot = 0.4;
    for frame in 0..600 {
        if frame % 20 == 0 {
            let mut world = lock_world(&scene.world);
            input.handle_key(&mut world, 'a');
            input.handle_key(&mut world, 'l');
        }
        driver.update(DT);

        let world = lock_world(&scene.world);
        for lever in [scene.rig.left, scene.rig.right] {
            let angle = lever.joint_angle(&world);
            assert!(
                angle >= lever.min_angle - overshoot && angle <= lever.max_angle + overshoot,
                "frame {}: lever {} at {:.3} outside [{:.3}, {:.3}]",
                frame,
                lever.body,
                angle,
                lever.min_angle,
                lever.max_angle
            );
        }
    }

    // Settled
    for _ in 0..180 {
        driver.update(DT);
    }
    let world = lock_world(&scene.world);
    for lever in [scene.rig.left, scene.rig.right] {
        let angle = lever.joint_angle(&world);
        assert!(angle >= lever.min_angle - 0.05 && angle <= lever.max_angle + 0.05, "settled at {}", angle);
    }
}

#[test]
fn test_strike_swings_levers_forward() {
    let scene = Scene::build(SceneConfig::default());
    let input = scene.input();
    let mut world = lock_world(&scene.world);

    input.handle_key(&mut world, 'a');
    input.handle_key(&mut world, 'l');

    // Left lever counter-clockwise, right lever clockwise: both tips swing up towards the middle
    assert!(world.body(scene.rig.left.body).unwrap().angular_velocity > 0.0);
    assert!(world.body(scene.rig.right.body).unwrap().angular_velocity < 0.0);
}

#[test]
fn test_strike_moves_joint_angle_across_sector() {
    let scene = Scene::build(SceneConfig::default());
    let driver = scene.frame_driver();
    let input = scene.input();

    for _ in 0..300 {
        driver.update(DT);
    }
    let (left_rest, right_rest) = {
        let world = lock_world(&scene.world);
        (scene.rig.left.joint_angle(&world), scene.rig.right.joint_angle(&world))
    };

    {
        let mut world = lock_world(&scene.world);
        input.handle_key(&mut world, 'a');
        input.handle_key(&mut world, 'l');
    }
    for _ in 0..3 {
        driver.update(DT);
    }

    let world = lock_world(&scene.world);
    assert!(scene.rig.left.joint_angle(&world) < left_rest - 0.2);
    assert!(scene.rig.right.joint_angle(&world) > right_rest + 0.2);
}

#[test]
fn test_ignored_keys_do_not_touch_the_world() {
    let scene = Scene::build(SceneConfig::default());
    let input = scene.input();
    let mut world = lock_world(&scene.world);
    let before = world.bodies().to_vec();

    for symbol in ['b', 'A', 'L', ' ', '\n', 'z', '1', 'é'] {
        input.handle_key(&mut world, symbol);
    }

    assert_eq!(world.bodies(), &before[..]);
}

#[test]
fn test_balls_fall_onto_levers() {
    let config = SceneConfig::default();
    let scene = Scene::build(config.clone());
    let driver = scene.frame_driver();

    let ball = {
        let mut world = lock_world(&scene.world);
        // Straight above the left pivot
        spawn_ball(&mut world, &config, 0.0)
    };

    let mut touched = false;
    for _ in 0..240 {
        driver.update(DT);
        let world: &PhysicsWorld = &lock_world(&scene.world);
        touched |= world
            .contacts()
            .any(|c| (c.body_a_idx == ball || c.body_b_idx == ball) && (c.body_a_idx == scene.rig.left.body || c.body_b_idx == scene.rig.left.body));
    }

    assert!(touched, "ball never reached the left lever");
}
