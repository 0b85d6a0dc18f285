use lever_physics::{PhysicsWorld, Vec2};

use crate::config::SceneConfig;
use crate::shared::{lock_world, SharedWorld};

/// Drawing surface the frame driver renders onto.
pub trait SceneCanvas {
    type Error;

    /// Default scene draw: every shape and joint anchor in the world.
    fn draw_world(&mut self, world: &PhysicsWorld) -> Result<(), Self::Error>;

    /// Text with its top-left corner at a world-space position.
    fn draw_text(&mut self, position: Vec2, text: &str) -> Result<(), Self::Error>;
}

/// Steps the world once per frame and draws it with the instruction label on top.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    world: SharedWorld,
    label: String,
    label_position: Vec2,
}

impl FrameDriver {
    pub fn new(world: SharedWorld, config: &SceneConfig) -> Self {
        Self {
            world,
            label: config.label.clone(),
            label_position: config.label_position,
        }
    }

    /// Advances the world by exactly `dt` with a single step.
    pub fn update(&self, dt: f64) {
        lock_world(&self.world).step(dt);
    }

    pub fn draw<C: SceneCanvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        {
            let world = lock_world(&self.world);
            canvas.draw_world(&world)?;
        }
        canvas.draw_text(self.label_position, &self.label)
    }
}
