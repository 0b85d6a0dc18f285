use lever_physics::{PhysicsWorld, Vec2};

use crate::config::SceneConfig;
use crate::scene::LeverRig;

/// Key that strikes the left lever.
pub const LEFT_KEY: char = 'a';
/// Key that strikes the right lever.
pub const RIGHT_KEY: char = 'l';

/// Maps key presses to lever strikes. Holds body indices, not the bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverInput {
    pub left: usize,
    pub right: usize,
    impulse: f64,
    /// Strike point in the lever frame, halfway down the arm.
    strike_point: Vec2,
}

impl LeverInput {
    pub fn new(rig: &LeverRig, config: &SceneConfig) -> Self {
        Self {
            left: rig.left.body,
            right: rig.right.body,
            impulse: config.impulse,
            strike_point: Vec2::new(0.0, -config.lever.length / 2.0),
        }
    }

    /// Strikes the left lever on 'a' and the right lever on 'l'. Any other
    /// symbol leaves the world untouched.
    pub fn handle_key(&self, world: &mut PhysicsWorld, symbol: char) {
        let (body_idx, impulse) = match symbol {
            LEFT_KEY => (self.left, Vec2::new(self.impulse, 0.0)),
            RIGHT_KEY => (self.right, Vec2::new(-self.impulse, 0.0)),
            _ => return,
        };

        if let Some(body) = world.body_mut(body_idx) {
            body.apply_impulse_at_local_point(impulse, self.strike_point);
            log::debug!(
                "Struck lever {} with {:?}, angular velocity now {:.2}",
                body_idx,
                impulse,
                body.angular_velocity
            );
        }
    }
}
