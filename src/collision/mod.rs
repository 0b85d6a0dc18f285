pub mod aabb;
pub mod detection;
pub mod manifold;

// Re-export key types
pub use aabb::AABB;
pub use detection::{check_circle_circle, check_collision, check_segment_circle};
pub use manifold::CollisionManifold;
pub(crate) use manifold::ContactConstraint;
