use crate::{
    objects::rigid_body::RigidBody,
    collision::{self, CollisionManifold, ContactConstraint, AABB},
    constraints::{get_mutable_body_pair, Constraint},
    math::vec2::Vec2,
};
use crate::integration::integrator;

use log::trace;

/// Owns every body and constraint of a simulation and advances them together.
///
/// Index 0 always holds the world's own static body, which has no shape and
/// serves as the fixed reference frame for joints.
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    // Store constraints as boxed trait objects
    constraints: Vec<Box<dyn Constraint>>,
    // Contacts found during the last step
    contacts: Vec<ContactConstraint>,
    gravity: Vec2,
    iterations: usize,
}

impl PhysicsWorld {
    /// Index of the static reference body created with every world.
    pub const STATIC_BODY: usize = 0;

    const DEFAULT_ITERATIONS: usize = 10;
    const POSITIONAL_CORRECTION_PERCENT: f64 = 0.2; // Penetration percentage to correct per step
    const POSITIONAL_CORRECTION_SLOP: f64 = 0.01; // Allowed overlap before correcting

    /// Creates a world without gravity and with the default iteration count.
    pub fn new() -> Self {
        Self::with_settings(Vec2::ZERO, Self::DEFAULT_ITERATIONS)
    }

    /// Creates a world whose gravity and solver iteration count stay fixed for its lifetime.
    pub fn with_settings(gravity: Vec2, iterations: usize) -> Self {
        assert!(iterations > 0, "Solver needs at least one iteration");
        Self {
            bodies: vec![RigidBody::new_static()],
            constraints: Vec::new(),
            contacts: Vec::new(),
            gravity,
            iterations,
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Index of the world's own static body.
    pub fn static_body(&self) -> usize {
        Self::STATIC_BODY
    }

    /// Adds a rigid body to the world and returns its index.
    /// Indices stay valid for the life of the world.
    pub fn add_body(&mut self, body: RigidBody) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    /// Convenience method to add a shapeless static body at `position`.
    pub fn add_static_body(&mut self, position: Vec2) -> usize {
        self.add_body(RigidBody::new_static().with_position(position))
    }

    /// Adds any constraint that implements the `Constraint` trait and returns its index.
    pub fn add_constraint<C: Constraint + 'static>(&mut self, constraint: C) -> usize {
        let (a, b) = constraint.bodies();
        assert!(
            a < self.bodies.len() && b < self.bodies.len(),
            "Constraint refers to a body that is not in this world"
        );
        let index = self.constraints.len();
        self.constraints.push(Box::new(constraint));
        index
    }

    pub fn body(&self, idx: usize) -> Option<&RigidBody> {
        self.bodies.get(idx)
    }

    pub fn body_mut(&mut self, idx: usize) -> Option<&mut RigidBody> {
        self.bodies.get_mut(idx)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn constraint(&self, idx: usize) -> Option<&dyn Constraint> {
        self.constraints.get(idx).map(|c| c.as_ref())
    }

    pub fn constraints(&self) -> impl Iterator<Item = &dyn Constraint> + '_ {
        self.constraints.iter().map(|c| c.as_ref())
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn dynamic_body_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_static()).count()
    }

    /// Number of static bodies, the world's own reference body included.
    pub fn static_body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_static()).count()
    }

    /// Contacts found during the last step.
    pub fn contacts(&self) -> impl Iterator<Item = &CollisionManifold> + '_ {
        self.contacts.iter().map(|c| &c.manifold)
    }

    /// Broadphase on bounding boxes, then narrowphase on the surviving pairs.
    fn check_collisions(&mut self) {
        self.contacts.clear();

        let boxes: Vec<Option<AABB>> = self.bodies.iter().map(RigidBody::calculate_aabb).collect();

        for i in 0..self.bodies.len() {
            let Some(box_a) = boxes[i] else { continue };
            for j in (i + 1)..self.bodies.len() {
                let Some(box_b) = boxes[j] else { continue };

                let body_a = &self.bodies[i];
                let body_b = &self.bodies[j];

                if body_a.is_static() && body_b.is_static() {
                    continue;
                }
                if !box_a.overlaps(&box_b) {
                    continue;
                }

                if let Some(manifold) = collision::check_collision(body_a, i, body_b, j) {
                    self.contacts.push(prepare_contact(&self.bodies, manifold));
                }
            }
        }
    }

    /// Advances the simulation by one time step `dt`. Non-positive steps are ignored.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        // 1. Move bodies with the velocities solved last step
        for body in self.bodies.iter_mut() {
            integrator::integrate_position(body, dt);
        }

        // 2. Collision detection at the new positions
        self.check_collisions();

        // 3. Cache joint data before gravity changes the velocities
        for constraint in self.constraints.iter_mut() {
            constraint.pre_step(&self.bodies, dt);
        }

        // 4. Gravity and accumulated forces
        for body in self.bodies.iter_mut() {
            integrator::integrate_velocity(body, self.gravity, dt);
        }

        // 5. Sequential impulses over joints and contacts
        for _ in 0..self.iterations {
            for constraint in self.constraints.iter_mut() {
                constraint.apply_impulse(&mut self.bodies);
            }
            for contact in self.contacts.iter_mut() {
                apply_contact_impulse(contact, &mut self.bodies);
            }
        }

        // 6. Positional correction (to prevent sinking)
        for contact in &self.contacts {
            apply_positional_correction(&contact.manifold, &mut self.bodies);
        }

        trace!(
            "step {:.4}s: {} bodies, {} constraints, {} contacts",
            dt,
            self.bodies.len(),
            self.constraints.len(),
            self.contacts.len()
        );
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.bodies.len())
            .field("constraints", &self.constraints.len())
            .field("contacts", &self.contacts.len())
            .field("gravity", &self.gravity)
            .field("iterations", &self.iterations)
            .finish()
    }
}

fn inverse_or_zero(k: f64) -> f64 {
    if k > 0.0 { 1.0 / k } else { 0.0 }
}

/// Caches effective masses, restitution target and friction for one contact.
fn prepare_contact(bodies: &[RigidBody], manifold: CollisionManifold) -> ContactConstraint {
    let body_a = &bodies[manifold.body_a_idx];
    let body_b = &bodies[manifold.body_b_idx];

    let r_a = manifold.point - body_a.position; // Vector from CoM A to contact
    let r_b = manifold.point - body_b.position; // Vector from CoM B to contact
    let normal = manifold.normal;
    let tangent = normal.perpendicular();

    let effective_mass = |dir: Vec2| {
        let ra_cross = r_a.cross(dir);
        let rb_cross = r_b.cross(dir);
        body_a.inv_mass + body_b.inv_mass
            + ra_cross * ra_cross * body_a.inv_inertia
            + rb_cross * rb_cross * body_b.inv_inertia
    };

    let relative_velocity = body_b.velocity_at_world_point(manifold.point) - body_a.velocity_at_world_point(manifold.point);
    let approach_speed = relative_velocity.dot(normal);
    let elasticity = body_a.material.combined_elasticity(&body_b.material);

    ContactConstraint {
        manifold,
        r_a,
        r_b,
        normal_mass: inverse_or_zero(effective_mass(normal)),
        tangent_mass: inverse_or_zero(effective_mass(tangent)),
        // Only approaching bodies bounce
        bounce: if approach_speed < 0.0 { -elasticity * approach_speed } else { 0.0 },
        friction: body_a.material.combined_friction(&body_b.material),
        normal_impulse: 0.0,
        tangent_impulse: 0.0,
    }
}

/// One pass of the normal and friction impulses for a contact.
fn apply_contact_impulse(contact: &mut ContactConstraint, bodies: &mut [RigidBody]) {
    let (body_a, body_b) = get_mutable_body_pair(bodies, contact.manifold.body_a_idx, contact.manifold.body_b_idx);

    let normal = contact.manifold.normal;
    let tangent = normal.perpendicular();

    let v_a = body_a.linear_velocity + Vec2::cross_sv(body_a.angular_velocity, contact.r_a);
    let v_b = body_b.linear_velocity + Vec2::cross_sv(body_b.angular_velocity, contact.r_b);
    let relative_velocity = v_b - v_a;

    // Normal impulse, accumulated total never pulls
    let vrn = relative_velocity.dot(normal);
    let jn = (contact.bounce - vrn) * contact.normal_mass;
    let old_normal = contact.normal_impulse;
    contact.normal_impulse = (old_normal + jn).max(0.0);
    let jn = contact.normal_impulse - old_normal;

    // Coulomb friction bounded by the normal impulse so far
    let vrt = relative_velocity.dot(tangent);
    let jt = -vrt * contact.tangent_mass;
    let max_friction = contact.friction * contact.normal_impulse;
    let old_tangent = contact.tangent_impulse;
    contact.tangent_impulse = (old_tangent + jt).clamp(-max_friction, max_friction);
    let jt = contact.tangent_impulse - old_tangent;

    let impulse = normal * jn + tangent * jt;
    body_a.apply_impulse(-impulse, contact.r_a);
    body_b.apply_impulse(impulse, contact.r_b);
}

/// Applies simple positional correction to resolve residual penetration.
fn apply_positional_correction(manifold: &CollisionManifold, bodies: &mut [RigidBody]) {
    const PERCENT: f64 = PhysicsWorld::POSITIONAL_CORRECTION_PERCENT;
    const SLOP: f64 = PhysicsWorld::POSITIONAL_CORRECTION_SLOP;

    let correction_magnitude = (manifold.depth - SLOP).max(0.0);
    if correction_magnitude < 1e-9 {
        return;
    }

    let (body_a, body_b) = get_mutable_body_pair(bodies, manifold.body_a_idx, manifold.body_b_idx);

    let total_inv_mass = body_a.inv_mass + body_b.inv_mass;
    if total_inv_mass < 1e-12 {
        return;
    }

    // Correction proportional to inverse mass
    let correction = manifold.normal * (correction_magnitude / total_inv_mass * PERCENT);
    body_a.position -= correction * body_a.inv_mass;
    body_b.position += correction * body_b.inv_mass;
}
