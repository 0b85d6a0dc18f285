use super::vec2::Vec2;

/// Rigid transform of a body frame: rotate first, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // Angle in radians
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Maps a point from the local frame into world space.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }

    /// Maps a direction from the local frame into world space (no translation).
    pub fn apply_vector(self, vector: Vec2) -> Vec2 {
        vector.rotate(self.rotation)
    }

    /// Maps a world-space point back into the local frame.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        (point - self.position).rotate(-self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
