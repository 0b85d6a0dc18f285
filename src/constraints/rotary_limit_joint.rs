use crate::objects::rigid_body::RigidBody;
use super::{bias_coef, get_mutable_body_pair, Constraint};

/// Keeps the joint angle `rotation(b) - rotation(a)` inside `[min, max]`.
///
/// The constraint is one-sided: nothing happens while the angle is inside
/// the interval, and only pushing impulses are applied once it leaves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotaryLimitJoint {
    pub body_a_idx: usize,
    pub body_b_idx: usize,
    /// Lower bound in radians.
    pub min: f64,
    /// Upper bound in radians.
    pub max: f64,

    i_sum: f64,
    bias: f64,
    accumulated: f64,
}

impl RotaryLimitJoint {
    pub fn new(body_a_idx: usize, body_b_idx: usize, min: f64, max: f64) -> Self {
        assert!(body_a_idx != body_b_idx, "RotaryLimitJoint needs two distinct bodies");
        assert!(min <= max, "RotaryLimitJoint bounds must satisfy min <= max");
        Self {
            body_a_idx,
            body_b_idx,
            min,
            max,
            i_sum: 0.0,
            bias: 0.0,
            accumulated: 0.0,
        }
    }

    /// Current joint angle for the given body set.
    pub fn angle(&self, bodies: &[RigidBody]) -> f64 {
        bodies[self.body_b_idx].rotation - bodies[self.body_a_idx].rotation
    }

    /// How far the angle has to move to get back inside the bounds; zero when inside.
    fn violation(&self, angle: f64) -> f64 {
        if angle > self.max {
            self.max - angle
        } else if angle < self.min {
            self.min - angle
        } else {
            0.0
        }
    }

    pub fn accumulated_impulse(&self) -> f64 {
        self.accumulated
    }
}

impl Constraint for RotaryLimitJoint {
    fn bodies(&self) -> (usize, usize) {
        (self.body_a_idx, self.body_b_idx)
    }

    fn pre_step(&mut self, bodies: &[RigidBody], dt: f64) {
        let a = &bodies[self.body_a_idx];
        let b = &bodies[self.body_b_idx];

        let i_inv_sum = a.inv_inertia + b.inv_inertia;
        self.i_sum = if i_inv_sum > 0.0 { 1.0 / i_inv_sum } else { 0.0 };

        let pdist = self.violation(b.rotation - a.rotation);
        self.bias = if dt > 0.0 { -bias_coef(dt) * pdist / dt } else { 0.0 };
        self.accumulated = 0.0;
    }

    fn apply_impulse(&mut self, bodies: &mut [RigidBody]) {
        if self.bias == 0.0 {
            return;
        }

        let (a, b) = get_mutable_body_pair(bodies, self.body_a_idx, self.body_b_idx);

        let wr = b.angular_velocity - a.angular_velocity;
        let j = -(self.bias + wr) * self.i_sum;

        // Below min the impulse may only push the angle up, above max only down
        let old = self.accumulated;
        self.accumulated = if self.bias < 0.0 {
            (old + j).max(0.0)
        } else {
            (old + j).min(0.0)
        };
        let j = self.accumulated - old;

        a.angular_velocity -= j * a.inv_inertia;
        b.angular_velocity += j * b.inv_inertia;

        log::trace!(
            "rotary limit {}-{}: impulse {:.4}, total {:.4}",
            self.body_a_idx,
            self.body_b_idx,
            j,
            self.accumulated
        );
    }
}
