use std::f64::consts::PI;
use std::time::Duration;

use clap::Parser;
use lever_physics::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Lever arm geometry and surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LeverConfig {
    pub mass: f64,
    /// Reach of the arm below the pivot.
    pub length: f64,
    pub radius: f64,
    /// Short stub above the body origin; its tip is the pivot point.
    pub stub: f64,
    pub elasticity: f64,
    pub friction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BallConfig {
    pub mass: f64,
    pub radius: f64,
    pub elasticity: f64,
    pub friction: f64,
    pub spawn_height: f64,
    pub period: Duration,
}

/// Every constant of the scene. There is no configuration file; `Default`
/// is the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub gravity: Vec2,
    pub iterations: usize,
    pub timestep: f64,
    /// Left lever anchor.
    pub pos_a: Vec2,
    /// Right lever anchor.
    pub pos_b: Vec2,
    pub box_offset: Vec2,
    pub lever: LeverConfig,
    pub ball: BallConfig,
    /// Magnitude of the strike impulse, applied along the lever's local x axis.
    pub impulse: f64,
    /// Width of each lever's swing sector, in radians.
    pub swing: f64,
    pub label: String,
    pub label_position: Vec2,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -200.0),
            iterations: 10,
            timestep: 1.0 / 60.0,
            pos_a: Vec2::new(10.0, 60.0),
            pos_b: Vec2::new(200.0, 60.0),
            box_offset: Vec2::new(0.0, -120.0),
            lever: LeverConfig {
                mass: 10.0,
                length: 60.0,
                radius: 10.0,
                stub: 15.0,
                elasticity: 0.0,
                friction: 0.7,
            },
            ball: BallConfig {
                mass: 0.5,
                radius: 15.0,
                elasticity: 0.5,
                friction: 0.7,
                spawn_height: 300.0,
                period: Duration::from_millis(2000),
            },
            impulse: 5000.0,
            swing: PI / 3.0,
            label: "Use the keys 'a' and 'l' to hit the levers".to_string(),
            label_position: Vec2::new(-300.0, 100.0),
        }
    }
}

/// Command line of the `pinball` binary.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "pinball")]
#[command(about = "Two struck levers and a stream of falling balls", long_about = None)]
pub struct Args {
    /// Seed for ball placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

/// RNG for ball placement: reproducible with a seed, OS entropy otherwise.
pub fn spawner_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    }
}
