//! Two struck levers and a stream of falling balls on top of `lever_physics`.
//!
//! The library is headless; the `pinball` binary puts it in a ggez window.

pub mod config;
pub mod frame;
pub mod input;
pub mod lever;
pub mod scene;
pub mod shared;
pub mod spawner;

pub use config::SceneConfig;
pub use frame::{FrameDriver, SceneCanvas};
pub use input::LeverInput;
pub use scene::{assemble, LeverRig, RiggedLever, Scene};
pub use shared::{lock_world, SharedWorld};
pub use spawner::{spawn_ball, spawn_x, BallSpawner, SpawnerHandle};
