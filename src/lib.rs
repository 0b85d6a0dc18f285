//! A small 2D rigid-body engine: circles and capsules, pivot and rotary
//! limit joints, and a sequential-impulse solver.
//!
//! Coordinates are y-up and rotations counter-clockwise, in radians.

pub mod math;
pub mod objects;
pub mod constraints;
pub mod integration;
pub mod collision;
pub mod shapes;
pub mod world;
pub mod common;

// Re-export key types for easier use
pub use math::vec2::Vec2;
pub use objects::rigid_body::{BodyKind, RigidBody};
pub use shapes::{Circle, Segment, Shape};
pub use constraints::{Constraint, PivotJoint, RotaryLimitJoint};
pub use collision::CollisionManifold;
pub use world::PhysicsWorld;
pub use common::{moment_for_circle, moment_for_segment, Material};
