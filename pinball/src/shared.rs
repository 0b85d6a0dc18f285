use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lever_physics::PhysicsWorld;

/// The one physics world, shared by the frame loop and the spawner thread.
/// Every mutation goes through this lock, so a ball is never added mid-step.
pub type SharedWorld = Arc<Mutex<PhysicsWorld>>;

pub fn share(world: PhysicsWorld) -> SharedWorld {
    Arc::new(Mutex::new(world))
}

/// Locks the world. A panic while holding the lock leaves the body and
/// constraint lists intact, so a poisoned lock is recovered.
pub fn lock_world(world: &SharedWorld) -> MutexGuard<'_, PhysicsWorld> {
    world.lock().unwrap_or_else(PoisonError::into_inner)
}
