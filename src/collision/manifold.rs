use crate::math::vec2::Vec2;

/// A single contact between two bodies, produced by narrowphase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    /// Index of the first body involved in the collision.
    pub body_a_idx: usize,
    /// Index of the second body involved in the collision.
    pub body_b_idx: usize,
    /// Unit collision normal, pointing from body A towards body B.
    pub normal: Vec2,
    /// The amount of penetration between the shapes (positive when overlapping).
    pub depth: f64,
    /// World-space contact point, halfway between the two surfaces.
    pub point: Vec2,
}

impl CollisionManifold {
    /// Same contact seen from the other body.
    pub fn flipped(self) -> Self {
        Self {
            body_a_idx: self.body_b_idx,
            body_b_idx: self.body_a_idx,
            normal: -self.normal,
            ..self
        }
    }
}

/// Per-step solver state for one contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ContactConstraint {
    pub manifold: CollisionManifold,
    pub r_a: Vec2,
    pub r_b: Vec2,
    pub normal_mass: f64,
    pub tangent_mass: f64,
    /// Target separating velocity along the normal (restitution).
    pub bounce: f64,
    pub friction: f64,
    pub normal_impulse: f64,
    pub tangent_impulse: f64,
}
