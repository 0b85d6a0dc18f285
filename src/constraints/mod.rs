use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

pub mod pivot_joint;
pub mod rotary_limit_joint;

// Re-export the constraint types for easier access
pub use pivot_joint::PivotJoint;
pub use rotary_limit_joint::RotaryLimitJoint;

/// A velocity-level constraint between two bodies, solved with sequential impulses.
///
/// Each step the world calls `pre_step` once, then `apply_impulse` once per
/// solver iteration.
pub trait Constraint: Send {
    /// Indices of the two bodies this constraint connects.
    fn bodies(&self) -> (usize, usize);

    /// Caches per-step solver data (effective mass, position error bias).
    fn pre_step(&mut self, bodies: &[RigidBody], dt: f64);

    /// Applies one corrective impulse to the connected bodies.
    fn apply_impulse(&mut self, bodies: &mut [RigidBody]);

    /// World-space anchor points, if the constraint has any, for debug drawing.
    fn anchors(&self, _bodies: &[RigidBody]) -> Option<(Vec2, Vec2)> {
        None
    }
}

/// Fraction of the remaining position error removed per step: 10% per 1/60 s,
/// scaled so the correction rate does not depend on `dt`.
pub(crate) fn bias_coef(dt: f64) -> f64 {
    1.0 - 0.9f64.powf(60.0 * dt)
}

/// Helper to safely get mutable references to two different bodies in a slice.
/// Panics if indices are the same or out of bounds.
pub(crate) fn get_mutable_body_pair(bodies: &mut [RigidBody], idx_a: usize, idx_b: usize) -> (&mut RigidBody, &mut RigidBody) {
    assert!(idx_a != idx_b, "Constraint cannot connect a body to itself");
    assert!(idx_a < bodies.len() && idx_b < bodies.len(), "Body index out of bounds");

    // Ensure a < b for split_at_mut
    if idx_a < idx_b {
        let (slice_a, slice_b) = bodies.split_at_mut(idx_b);
        (&mut slice_a[idx_a], &mut slice_b[0])
    } else {
        let (slice_b, slice_a) = bodies.split_at_mut(idx_a);
        (&mut slice_a[0], &mut slice_b[idx_b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_coef_at_sixty_hz() {
        assert!((bias_coef(1.0 / 60.0) - 0.1).abs() < 1e-12);
        assert_eq!(bias_coef(0.0), 0.0);
    }

    #[test]
    fn test_get_mutable_body_pair_either_order() {
        let mut bodies = vec![RigidBody::new(1.0, 1.0), RigidBody::new(2.0, 1.0), RigidBody::new(3.0, 1.0)];
        {
            let (a, b) = get_mutable_body_pair(&mut bodies, 2, 0);
            assert_eq!(a.mass, 3.0);
            assert_eq!(b.mass, 1.0);
        }
        let (a, b) = get_mutable_body_pair(&mut bodies, 0, 1);
        assert_eq!(a.mass, 1.0);
        assert_eq!(b.mass, 2.0);
    }

    #[test]
    #[should_panic]
    fn test_get_mutable_body_pair_same_index_panics() {
        let mut bodies = vec![RigidBody::new(1.0, 1.0)];
        get_mutable_body_pair(&mut bodies, 0, 0);
    }
}
