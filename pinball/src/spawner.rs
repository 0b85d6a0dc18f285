use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use lever_physics::{moment_for_circle, Circle, PhysicsWorld, RigidBody, Shape, Vec2};
use rand::Rng;

use crate::config::SceneConfig;
use crate::shared::{lock_world, SharedWorld};

/// Spawn x for a uniform sample `u` in `[0, 1]`: a jitter across the whole
/// span between the two anchors.
pub fn spawn_x(pos_a: Vec2, pos_b: Vec2, u: f64) -> f64 {
    let dx = pos_b.x - pos_a.x;
    (pos_a.x + pos_b.x) / 2.0 - dx / 2.0 + u * dx
}

/// Builds one ball for sample `u` and registers it, returning its body index.
pub fn spawn_ball(world: &mut PhysicsWorld, config: &SceneConfig, u: f64) -> usize {
    let ball = &config.ball;
    let position = Vec2::new(spawn_x(config.pos_a, config.pos_b, u), ball.spawn_height);

    let mut body = RigidBody::new(ball.mass, moment_for_circle(ball.mass, 0.0, ball.radius, Vec2::ZERO))
        .with_shape(Shape::Circle(Circle::centered(ball.radius)))
        .with_position(position);
    body.set_elasticity(ball.elasticity);
    body.set_friction(ball.friction);

    world.add_body(body)
}

/// Deadline to spawn at when woken at `now` for a spawn due at `due`. A spawner
/// more than one period late drops the missed slots and keeps only the latest,
/// so a stall yields one catch-up ball instead of a burst.
fn catch_up(due: Instant, now: Instant, period: Duration) -> Instant {
    let behind = now.saturating_duration_since(due);
    if period.is_zero() || behind < period {
        return due;
    }
    let phase = behind.as_nanos() % period.as_nanos();
    now - Duration::from_nanos(phase as u64)
}

/// Periodic ball spawner running on its own thread.
pub struct BallSpawner;

impl BallSpawner {
    /// Starts spawning one ball per `config.ball.period`. The n-th ball is due
    /// at `start + n * period`, so late wake-ups do not push later spawns back.
    /// Slots missed entirely (world lock held for several periods, a suspended
    /// machine) are skipped rather than replayed.
    pub fn start<R>(world: SharedWorld, config: SceneConfig, mut rng: R) -> std::io::Result<SpawnerHandle>
    where
        R: Rng + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let spawned = Arc::new(AtomicUsize::new(0));

        let thread_stop = Arc::clone(&stop);
        let thread_spawned = Arc::clone(&spawned);
        let period = config.ball.period;

        let thread = thread::Builder::new()
            .name("ball-spawner".to_string())
            .spawn(move || {
                let started = Instant::now();
                let mut due = started;

                loop {
                    due += period;

                    // Sleep until due, waking early only to stop
                    let now = loop {
                        if thread_stop.load(Ordering::Acquire) {
                            return;
                        }
                        let now = Instant::now();
                        if now >= due {
                            break now;
                        }
                        thread::park_timeout(due - now);
                    };

                    let caught_up = catch_up(due, now, period);
                    if caught_up != due {
                        log::debug!("Ball spawner behind by {:?}, skipping missed spawns", now - due);
                        due = caught_up;
                    }

                    let u = rng.random::<f64>();
                    let idx = {
                        let mut guard = lock_world(&world);
                        spawn_ball(&mut guard, &config, u)
                    };
                    let count = thread_spawned.fetch_add(1, Ordering::AcqRel) + 1;

                    log::debug!(
                        "Spawned ball #{} (body {}) at x={:.1} after {:?}",
                        count,
                        idx,
                        spawn_x(config.pos_a, config.pos_b, u),
                        started.elapsed()
                    );
                }
            })?;

        log::info!("Ball spawner started, period {:?}", period);

        Ok(SpawnerHandle {
            stop,
            spawned,
            thread: Some(thread),
        })
    }
}

/// Owner's side of a running spawner. Dropping it stops the thread.
#[derive(Debug)]
pub struct SpawnerHandle {
    stop: Arc<AtomicBool>,
    spawned: Arc<AtomicUsize>,
    thread: Option<JoinHandle<()>>,
}

impl SpawnerHandle {
    /// Balls spawned so far.
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops the spawner and waits for its thread. Calling it again does nothing.
    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        self.stop.store(true, Ordering::Release);
        thread.thread().unpark();
        if thread.join().is_err() {
            log::warn!("Ball spawner thread panicked");
        }

        log::info!("Ball spawner stopped after {} balls", self.spawned());
    }
}

impl Drop for SpawnerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_spawn_x_covers_anchor_span() {
        let a = Vec2::new(10.0, 60.0);
        let b = Vec2::new(200.0, 60.0);
        assert!((spawn_x(a, b, 0.0) - 10.0).abs() < EPSILON);
        assert!((spawn_x(a, b, 0.5) - 105.0).abs() < EPSILON);
        assert!((spawn_x(a, b, 1.0) - 200.0).abs() < EPSILON);
    }

    #[test]
    fn test_catch_up_keeps_on_time_deadlines() {
        let due = Instant::now();
        let period = Duration::from_millis(50);
        assert_eq!(catch_up(due, due, period), due);
        assert_eq!(catch_up(due, due + Duration::from_millis(49), period), due);
        // Woken before the deadline
        assert_eq!(catch_up(due + period, due, period), due + period);
    }

    #[test]
    fn test_catch_up_drops_missed_slots() {
        let due = Instant::now();
        let period = Duration::from_millis(50);

        // 520 ms late: ten whole slots missed, the latest one is 20 ms back
        let now = due + Duration::from_millis(520);
        let next = catch_up(due, now, period);
        assert_eq!(next, due + Duration::from_millis(500));
        assert!(next <= now);
        // The following deadline is in the future: only one catch-up spawn
        assert!(next + period > now);

        assert_eq!(catch_up(due, due + period, period), due + period);
    }

    #[test]
    fn test_catch_up_with_zero_period() {
        let due = Instant::now();
        let now = due + Duration::from_millis(10);
        assert_eq!(catch_up(due, now, Duration::ZERO), due);
    }

    #[test]
    fn test_spawn_ball() {
        let config = SceneConfig::default();
        let mut world = PhysicsWorld::with_settings(config.gravity, config.iterations);
        let idx = spawn_ball(&mut world, &config, 0.25);

        let ball = world.body(idx).unwrap();
        assert!((ball.position - Vec2::new(57.5, 300.0)).magnitude() < EPSILON);
        assert_eq!(ball.mass, 0.5);
        // 0.5 * (15^2 / 2)
        assert!((ball.inertia - 56.25).abs() < EPSILON);
        assert_eq!(ball.material.elasticity, 0.5);
        assert_eq!(ball.material.friction, 0.7);
        assert!(matches!(&ball.shape, Some(Shape::Circle(c)) if c.radius == 15.0));
    }
}
