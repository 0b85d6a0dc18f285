use std::sync::Arc;

use lever_physics::{PhysicsWorld, PivotJoint, RotaryLimitJoint, Vec2};
use rand::Rng;

use crate::config::SceneConfig;
use crate::frame::FrameDriver;
use crate::input::LeverInput;
use crate::lever::add_lever;
use crate::shared::{self, SharedWorld};
use crate::spawner::{BallSpawner, SpawnerHandle};

/// One lever with the two joints that hold it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiggedLever {
    pub body: usize,
    pub pivot: usize,
    pub limit: usize,
    /// Static body the rotary limit is measured against.
    pub reference: usize,
    pub min_angle: f64,
    pub max_angle: f64,
}

impl RiggedLever {
    /// Current limit joint angle, `rotation(reference) - rotation(lever)`.
    /// With the reference at rotation zero this is the negated lever rotation,
    /// and `min_angle`/`max_angle` bound this value, not `body.rotation`: the
    /// left lever rests at rotation +60° and joint angle -60°.
    pub fn joint_angle(&self, world: &PhysicsWorld) -> f64 {
        let lever = world.body(self.body).map_or(0.0, |b| b.rotation);
        let reference = world.body(self.reference).map_or(0.0, |b| b.rotation);
        reference - lever
    }
}

/// Both levers as assembled into a world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverRig {
    pub left: RiggedLever,
    pub right: RiggedLever,
}

impl LeverRig {
    /// The static body created only to host the left limit.
    pub fn auxiliary_static(&self) -> usize {
        self.left.reference
    }
}

/// Which static body a lever's rotary limit is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimitReference {
    /// A new static body created just for this limit.
    Auxiliary,
    /// The world's own static body.
    WorldStatic,
}

/// Pins a fresh lever to the world's static body at `anchor + box_offset` and
/// bounds its swing against the chosen reference.
fn rig_lever(
    world: &mut PhysicsWorld,
    config: &SceneConfig,
    anchor: Vec2,
    reference: LimitReference,
    min_angle: f64,
    max_angle: f64,
) -> RiggedLever {
    let body = add_lever(world, &config.lever, anchor, config.box_offset);

    let pivot = PivotJoint::new(world.bodies(), body, world.static_body(), anchor + config.box_offset);
    let pivot = world.add_constraint(pivot);

    let reference = match reference {
        LimitReference::Auxiliary => world.add_static_body(Vec2::ZERO),
        LimitReference::WorldStatic => world.static_body(),
    };
    let limit = world.add_constraint(RotaryLimitJoint::new(body, reference, min_angle, max_angle));

    RiggedLever {
        body,
        pivot,
        limit,
        reference,
        min_angle,
        max_angle,
    }
}

/// Wires both levers into `world`. Call once per world.
///
/// The left limit hangs off a static body of its own while the right one
/// uses the world's static body; both references sit at rotation zero, so the
/// sectors are exact mirrors.
pub fn assemble(world: &mut PhysicsWorld, config: &SceneConfig) -> LeverRig {
    let swing = config.swing;

    let left = rig_lever(world, config, config.pos_a, LimitReference::Auxiliary, -2.0 * swing, -swing);
    let right = rig_lever(world, config, config.pos_b, LimitReference::WorldStatic, swing, 2.0 * swing);

    log::info!(
        "Assembled levers: left body {} at {:?}, right body {} at {:?}",
        left.body,
        config.pos_a + config.box_offset,
        right.body,
        config.pos_b + config.box_offset
    );

    LeverRig { left, right }
}

/// The running scene: the shared world, the lever rig and the constants it was built from.
pub struct Scene {
    pub world: SharedWorld,
    pub rig: LeverRig,
    pub config: SceneConfig,
}

impl Scene {
    /// Creates the world with the configured gravity and iterations and assembles the levers.
    pub fn build(config: SceneConfig) -> Self {
        let mut world = PhysicsWorld::with_settings(config.gravity, config.iterations);
        let rig = assemble(&mut world, &config);

        log::info!(
            "Scene ready: gravity {:?}, {} iterations, {} constraints",
            world.gravity(),
            world.iterations(),
            world.constraint_count()
        );

        Self {
            world: shared::share(world),
            rig,
            config,
        }
    }

    pub fn input(&self) -> LeverInput {
        LeverInput::new(&self.rig, &self.config)
    }

    pub fn frame_driver(&self) -> FrameDriver {
        FrameDriver::new(Arc::clone(&self.world), &self.config)
    }

    /// Starts the periodic ball spawner against this scene's world.
    pub fn start_spawner<R>(&self, rng: R) -> std::io::Result<SpawnerHandle>
    where
        R: Rng + Send + 'static,
    {
        BallSpawner::start(Arc::clone(&self.world), self.config.clone(), rng)
    }
}
