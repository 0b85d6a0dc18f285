use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Velocity half of the semi-implicit Euler step: gravity plus accumulated
/// force and torque. Clears the accumulators afterwards.
pub fn integrate_velocity(body: &mut RigidBody, gravity: Vec2, dt: f64) {
    if body.is_static() {
        // Static object, do not integrate
        body.clear_accumulators();
        return;
    }

    // v = v + (g + F/m) * dt
    body.linear_velocity += (gravity + body.force * body.inv_mass) * dt;
    // omega = omega + (T/I) * dt
    body.angular_velocity += body.torque * body.inv_inertia * dt;

    body.clear_accumulators();
}

/// Position half of the step. Rotation is left unwrapped so joint limits
/// measure the true accumulated angle.
pub fn integrate_position(body: &mut RigidBody, dt: f64) {
    if body.is_static() {
        return;
    }

    body.position += body.linear_velocity * dt;
    body.rotation += body.angular_velocity * dt;
}
