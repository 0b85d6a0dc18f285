//! Moment-of-inertia helpers, taken about the body origin.

use crate::math::vec2::Vec2;

/// Moment of inertia of a hollow circle (ring between `r1` and `r2`)
/// whose centre sits at `offset` from the body origin.
/// A solid disc uses `r1 = 0`.
pub fn moment_for_circle(mass: f64, r1: f64, r2: f64, offset: Vec2) -> f64 {
    mass * (0.5 * (r1 * r1 + r2 * r2) + offset.magnitude_squared())
}

/// Moment of inertia of a capsule from `a` to `b` with rounding `radius`.
/// The parallel-axis term moves the axis from the capsule centre to the body origin.
pub fn moment_for_segment(mass: f64, a: Vec2, b: Vec2, radius: f64) -> f64 {
    let offset = a.lerp(b, 0.5);
    let length = b.distance(a) + 2.0 * radius;
    mass * ((length * length + 4.0 * radius * radius) / 12.0 + offset.magnitude_squared())
}
