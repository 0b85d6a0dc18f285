// Defines an Axis-Aligned Bounding Box, used as the broadphase test.

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Creates a new AABB from any two opposite corners.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        AABB {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Checks if this AABB overlaps with another AABB. Touching boxes count as overlapping.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y_overlap = self.max.y >= other.min.y && self.min.y <= other.max.y;
        x_overlap && y_overlap
    }

    /// Returns a copy grown by `margin` on every side.
    pub fn expanded(&self, margin: Vec2) -> AABB {
        AABB {
            min: self.min - margin,
            max: self.max + margin,
        }
    }
}
