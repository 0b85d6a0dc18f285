use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use super::{bias_coef, get_mutable_body_pair, Constraint};

/// A joint that keeps one point of body A coincident with one point of body B,
/// leaving rotation about that point free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotJoint {
    /// Index of the first rigid body.
    pub body_a_idx: usize,
    /// Index of the second rigid body.
    pub body_b_idx: usize,
    /// Anchor point on body A, in local coordinates.
    pub anchor_a_local: Vec2,
    /// Anchor point on body B, in local coordinates.
    pub anchor_b_local: Vec2,

    // Solver state, refreshed by pre_step
    r_a: Vec2,
    r_b: Vec2,
    k_inv: [[f64; 2]; 2],
    bias: Vec2,
    accumulated: Vec2,
}

impl PivotJoint {
    /// Pins `body_a_idx` and `body_b_idx` together at `pivot_world`, using the
    /// bodies' current placement to derive the local anchors.
    pub fn new(bodies: &[RigidBody], body_a_idx: usize, body_b_idx: usize, pivot_world: Vec2) -> Self {
        assert!(body_a_idx != body_b_idx, "PivotJoint needs two distinct bodies");
        assert!(
            body_a_idx < bodies.len() && body_b_idx < bodies.len(),
            "PivotJoint body index out of bounds"
        );

        Self::with_anchors(
            body_a_idx,
            body_b_idx,
            bodies[body_a_idx].world_to_local(pivot_world),
            bodies[body_b_idx].world_to_local(pivot_world),
        )
    }

    /// Builds the joint from anchors already expressed in each body's frame.
    pub fn with_anchors(body_a_idx: usize, body_b_idx: usize, anchor_a_local: Vec2, anchor_b_local: Vec2) -> Self {
        assert!(body_a_idx != body_b_idx, "PivotJoint needs two distinct bodies");
        Self {
            body_a_idx,
            body_b_idx,
            anchor_a_local,
            anchor_b_local,
            r_a: Vec2::ZERO,
            r_b: Vec2::ZERO,
            k_inv: [[0.0; 2]; 2],
            bias: Vec2::ZERO,
            accumulated: Vec2::ZERO,
        }
    }

    /// Total impulse applied during the last step.
    pub fn accumulated_impulse(&self) -> Vec2 {
        self.accumulated
    }

    fn solve_k(&self, v: Vec2) -> Vec2 {
        let k = &self.k_inv;
        Vec2::new(k[0][0] * v.x + k[0][1] * v.y, k[1][0] * v.x + k[1][1] * v.y)
    }
}

/// Inverse of the 2x2 effective mass matrix for a point constraint.
fn inverse_k_tensor(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2) -> [[f64; 2]; 2] {
    let m_sum = a.inv_mass + b.inv_mass;

    let mut k11 = m_sum;
    let mut k12 = 0.0;
    let mut k22 = m_sum;

    for (r, i_inv) in [(r_a, a.inv_inertia), (r_b, b.inv_inertia)] {
        k11 += r.y * r.y * i_inv;
        k12 += -r.x * r.y * i_inv;
        k22 += r.x * r.x * i_inv;
    }

    let det = k11 * k22 - k12 * k12;
    if det.abs() < 1e-12 {
        // Both ends immovable
        return [[0.0; 2]; 2];
    }
    let det_inv = 1.0 / det;

    [[k22 * det_inv, -k12 * det_inv], [-k12 * det_inv, k11 * det_inv]]
}

impl Constraint for PivotJoint {
    fn bodies(&self) -> (usize, usize) {
        (self.body_a_idx, self.body_b_idx)
    }

    fn pre_step(&mut self, bodies: &[RigidBody], dt: f64) {
        let a = &bodies[self.body_a_idx];
        let b = &bodies[self.body_b_idx];

        self.r_a = self.anchor_a_local.rotate(a.rotation);
        self.r_b = self.anchor_b_local.rotate(b.rotation);
        self.k_inv = inverse_k_tensor(a, b, self.r_a, self.r_b);

        let delta = (b.position + self.r_b) - (a.position + self.r_a);
        self.bias = if dt > 0.0 { delta * (-bias_coef(dt) / dt) } else { Vec2::ZERO };
        self.accumulated = Vec2::ZERO;
    }

    fn apply_impulse(&mut self, bodies: &mut [RigidBody]) {
        let (a, b) = get_mutable_body_pair(bodies, self.body_a_idx, self.body_b_idx);

        let v_a = a.linear_velocity + Vec2::cross_sv(a.angular_velocity, self.r_a);
        let v_b = b.linear_velocity + Vec2::cross_sv(b.angular_velocity, self.r_b);
        let vr = v_b - v_a;

        let j = self.solve_k(self.bias - vr);
        self.accumulated += j;

        a.apply_impulse(-j, self.r_a);
        b.apply_impulse(j, self.r_b);
    }

    fn anchors(&self, bodies: &[RigidBody]) -> Option<(Vec2, Vec2)> {
        Some((
            bodies[self.body_a_idx].local_to_world(self.anchor_a_local),
            bodies[self.body_b_idx].local_to_world(self.anchor_b_local),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn ground_and_bob(bob_position: Vec2) -> Vec<RigidBody> {
        vec![
            RigidBody::new_static(),
            RigidBody::new(10.0, 9750.0).with_position(bob_position),
        ]
    }

    #[test]
    fn test_pivot_joint_new_records_local_anchors() {
        let mut bodies = ground_and_bob(Vec2::new(10.0, -75.0));
        bodies[1].rotation = std::f64::consts::FRAC_PI_2;
        let joint = PivotJoint::new(&bodies, 1, 0, Vec2::new(10.0, -60.0));

        assert_eq!(joint.body_a_idx, 1);
        assert_eq!(joint.body_b_idx, 0);
        // 15 units "above" in world is +x in the rotated lever frame
        assert!((joint.anchor_a_local - Vec2::new(15.0, 0.0)).magnitude() < EPSILON);
        assert!((joint.anchor_b_local - Vec2::new(10.0, -60.0)).magnitude() < EPSILON);
        let (a, b) = joint.anchors(&bodies).unwrap();
        assert!(a.distance(b) < EPSILON);
    }

    #[test]
    #[should_panic]
    fn test_pivot_joint_same_body_panics() {
        let bodies = ground_and_bob(Vec2::ZERO);
        PivotJoint::new(&bodies, 1, 1, Vec2::ZERO);
    }

    #[test]
    fn test_pivot_removes_relative_velocity_at_anchor() {
        let mut bodies = ground_and_bob(Vec2::new(0.0, -15.0));
        let mut joint = PivotJoint::new(&bodies, 1, 0, Vec2::ZERO);

        bodies[1].linear_velocity = Vec2::new(30.0, -12.0);
        bodies[1].angular_velocity = 0.4;

        joint.pre_step(&bodies, 1.0 / 60.0);
        joint.apply_impulse(&mut bodies);

        // A single point joint is solved exactly in one pass
        let anchor_world = bodies[1].local_to_world(joint.anchor_a_local);
        let v = bodies[1].velocity_at_world_point(anchor_world);
        assert!(v.magnitude() < 1e-9, "anchor velocity {:?}", v);
        // Static end untouched
        assert_eq!(bodies[0].linear_velocity, Vec2::ZERO);
    }

    #[test]
    fn test_pivot_bias_pulls_anchors_together() {
        let mut bodies = ground_and_bob(Vec2::new(0.0, -15.0));
        let mut joint = PivotJoint::new(&bodies, 1, 0, Vec2::ZERO);
        // Knock the bob away from the pivot
        bodies[1].position = Vec2::new(3.0, -15.0);

        let dt = 1.0 / 60.0;
        joint.pre_step(&bodies, dt);
        joint.apply_impulse(&mut bodies);

        let anchor_world = bodies[1].local_to_world(joint.anchor_a_local);
        let v = bodies[1].velocity_at_world_point(anchor_world);
        // Heads back towards the pivot at 10% of the error per step
        assert!((v.x - (-3.0 * 0.1 / dt)).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_pivot_between_two_dynamic_bodies_conserves_momentum() {
        let mut bodies = vec![
            RigidBody::new(2.0, 5.0).with_position(Vec2::new(-1.0, 0.0)),
            RigidBody::new(1.0, 5.0).with_position(Vec2::new(1.0, 0.0)),
        ];
        bodies[0].linear_velocity = Vec2::new(0.0, 4.0);
        let mut joint = PivotJoint::new(&bodies, 0, 1, Vec2::ZERO);

        let before = bodies[0].linear_velocity * bodies[0].mass + bodies[1].linear_velocity * bodies[1].mass;
        joint.pre_step(&bodies, 1.0 / 60.0);
        for _ in 0..10 {
            joint.apply_impulse(&mut bodies);
        }
        let after = bodies[0].linear_velocity * bodies[0].mass + bodies[1].linear_velocity * bodies[1].mass;

        assert!((before - after).magnitude() < 1e-9);
        assert!(bodies[1].linear_velocity.y > 0.0);
    }

    #[test]
    fn test_anchors_reports_world_points() {
        let bodies = ground_and_bob(Vec2::new(200.0, -75.0));
        let joint = PivotJoint::new(&bodies, 1, 0, Vec2::new(200.0, -60.0));
        let (a, b) = joint.anchors(&bodies).unwrap();
        assert!((a - Vec2::new(200.0, -60.0)).magnitude() < EPSILON);
        assert!((b - a).magnitude() < EPSILON);
    }
}
