use crate::math::{Transform, Vec2};
use crate::shapes::Shape;
use crate::common::Material;
use crate::collision::AABB;

/// Whether a body responds to forces and impulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    /// Infinite mass and moment; never moves on its own.
    Static,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub kind: BodyKind,

    // Geometry, in the body's local frame
    pub shape: Option<Shape>,
    pub material: Material,

    // Primary state. The body origin is also its centre of gravity.
    pub position: Vec2,
    pub rotation: f64, // Radians, counter-clockwise, never wrapped
    pub linear_velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Accumulators for forces/torques applied during a time step
    pub force: Vec2,
    pub torque: f64,

    pub mass: f64,
    pub inv_mass: f64,    // 0.0 for static
    pub inertia: f64,     // Moment of inertia about the body origin
    pub inv_inertia: f64, // 0.0 for static
}

impl RigidBody {
    /// Creates a dynamic body from its mass and moment of inertia.
    /// Use the helpers in [`crate::common::moment`] to derive the moment from geometry.
    pub fn new(mass: f64, inertia: f64) -> Self {
        assert!(mass > 0.0 && mass.is_finite(), "Dynamic body mass must be positive and finite");
        assert!(inertia > 0.0 && inertia.is_finite(), "Dynamic body moment must be positive and finite");

        Self {
            kind: BodyKind::Dynamic,
            shape: None,
            material: Material::default(),
            position: Vec2::ZERO,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass,
            inv_mass: 1.0 / mass,
            inertia,
            inv_inertia: 1.0 / inertia,
        }
    }

    /// Creates a static body at the origin with no shape.
    pub fn new_static() -> Self {
        Self {
            kind: BodyKind::Static,
            shape: None,
            material: Material::default(),
            position: Vec2::ZERO,
            rotation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            mass: f64::INFINITY,
            inv_mass: 0.0,
            inertia: f64::INFINITY,
            inv_inertia: 0.0,
        }
    }

    /// Attaches a shape, replacing any previous one.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn set_elasticity(&mut self, elasticity: f64) {
        self.material = Material::new(elasticity, self.material.friction);
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.material = Material::new(self.material.elasticity, friction);
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    pub fn local_to_world(&self, point: Vec2) -> Vec2 {
        self.transform().apply(point)
    }

    pub fn world_to_local(&self, point: Vec2) -> Vec2 {
        self.transform().apply_inverse(point)
    }

    /// Velocity of the material point at `point_world`.
    pub fn velocity_at_world_point(&self, point_world: Vec2) -> Vec2 {
        self.linear_velocity + Vec2::cross_sv(self.angular_velocity, point_world - self.position)
    }

    /// Calculates the world-space bounding box of the attached shape.
    pub fn calculate_aabb(&self) -> Option<AABB> {
        let shape = self.shape.as_ref()?;
        let aabb = match shape {
            Shape::Circle(circle) => {
                let center = self.local_to_world(circle.offset);
                let radius_vec = Vec2::new(circle.radius, circle.radius);
                AABB::new(center - radius_vec, center + radius_vec)
            }
            Shape::Segment(segment) => {
                let world_a = self.local_to_world(segment.a);
                let world_b = self.local_to_world(segment.b);
                let radius_vec = Vec2::new(segment.radius, segment.radius);
                AABB::new(world_a, world_b).expanded(radius_vec)
            }
        };
        Some(aabb)
    }

    /// Applies a force at the center of mass.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies an instantaneous impulse at world-space offset `r` from the body origin.
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        if self.is_static() {
            return;
        }
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia;
    }

    /// Applies a world-space impulse at a world-space point.
    pub fn apply_impulse_at_world_point(&mut self, impulse: Vec2, point_world: Vec2) {
        let r = point_world - self.position;
        self.apply_impulse(impulse, r);
    }

    /// Applies an impulse given in the body's own frame at a body-local point.
    /// Both vectors are rotated into world space before the impulse is applied.
    pub fn apply_impulse_at_local_point(&mut self, impulse: Vec2, point_local: Vec2) {
        let transform = self.transform();
        self.apply_impulse_at_world_point(transform.apply_vector(impulse), transform.apply(point_local));
    }

    /// Should typically be called after integration in each simulation step.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}
