use crate::math::vec2::Vec2;

/// A capsule: the set of points within `radius` of the segment `a`-`b`.
/// Endpoints are given in the owning body's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub radius: f64,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2, radius: f64) -> Self {
        assert!(radius >= 0.0, "Segment radius cannot be negative");
        Self { a, b, radius }
    }
}

/// Closest point to `point` on the segment `a`-`b`, and its parameter in [0, 1].
pub(crate) fn closest_point_on_segment(a: Vec2, b: Vec2, point: Vec2) -> (Vec2, f64) {
    let segment_vec = b - a;
    let length_sq = segment_vec.magnitude_squared();
    if length_sq < 1e-12 {
        return (a, 0.0);
    }

    let t = ((point - a).dot(segment_vec) / length_sq).clamp(0.0, 1.0);
    (a + segment_vec * t, t)
}
