use ggez::event::{self, EventHandler};
use ggez::glam::Vec2 as GVec2;
use ggez::graphics::{self, Canvas, Color, DrawMode, DrawParam, Mesh, Text};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameError, GameResult};
use lever_physics::{PhysicsWorld, Shape, Vec2};
use pinball::{lock_world, FrameDriver, LeverInput, Scene, SceneCanvas, SceneConfig, SpawnerHandle};

const WINDOW_WIDTH: f32 = 800.0;
const WINDOW_HEIGHT: f32 = 600.0;

const SHAPE_COLOR: Color = Color::WHITE;
const ANCHOR_COLOR: Color = Color::RED;

/// World origin at the window centre, y pointing up.
fn to_screen(p: Vec2) -> GVec2 {
    GVec2::new(WINDOW_WIDTH / 2.0 + p.x as f32, WINDOW_HEIGHT / 2.0 - p.y as f32)
}

/// Scene canvas backed by a ggez frame.
struct GgezCanvas<'a> {
    ctx: &'a Context,
    canvas: &'a mut Canvas,
}

impl GgezCanvas<'_> {
    fn disc(&mut self, center: GVec2, radius: f32, mode: DrawMode, color: Color) -> GameResult {
        let mesh = Mesh::new_circle(self.ctx, mode, center, radius, 0.5, color)?;
        self.canvas.draw(&mesh, DrawParam::new());
        Ok(())
    }

    fn line(&mut self, from: GVec2, to: GVec2, width: f32, color: Color) -> GameResult {
        // Zero-length lines are rejected by the mesh builder
        if from.distance_squared(to) < 1e-6 {
            return Ok(());
        }
        let mesh = Mesh::new_line(self.ctx, &[from, to], width, color)?;
        self.canvas.draw(&mesh, DrawParam::new());
        Ok(())
    }
}

impl SceneCanvas for GgezCanvas<'_> {
    type Error = GameError;

    fn draw_world(&mut self, world: &PhysicsWorld) -> GameResult {
        for body in world.bodies() {
            match &body.shape {
                Some(Shape::Circle(circle)) => {
                    let center = body.local_to_world(circle.offset);
                    let radius = circle.radius as f32;
                    self.disc(to_screen(center), radius, DrawMode::stroke(2.0), SHAPE_COLOR)?;

                    // Tick so rolling is visible
                    let rim = center + Vec2::new(circle.radius, 0.0).rotate(body.rotation);
                    self.line(to_screen(center), to_screen(rim), 2.0, SHAPE_COLOR)?;
                }
                Some(Shape::Segment(segment)) => {
                    let a = to_screen(body.local_to_world(segment.a));
                    let b = to_screen(body.local_to_world(segment.b));
                    let radius = segment.radius as f32;

                    // Thick line with round caps
                    self.line(a, b, radius * 2.0, SHAPE_COLOR)?;
                    self.disc(a, radius, DrawMode::fill(), SHAPE_COLOR)?;
                    self.disc(b, radius, DrawMode::fill(), SHAPE_COLOR)?;
                }
                None => {}
            }
        }

        for constraint in world.constraints() {
            if let Some((anchor, _)) = constraint.anchors(world.bodies()) {
                self.disc(to_screen(anchor), 3.0, DrawMode::fill(), ANCHOR_COLOR)?;
            }
        }

        Ok(())
    }

    fn draw_text(&mut self, position: Vec2, text: &str) -> GameResult {
        self.canvas.draw(
            &Text::new(text),
            DrawParam::new().dest(to_screen(position)).color(Color::WHITE),
        );
        Ok(())
    }
}

struct MainState {
    driver: FrameDriver,
    input: LeverInput,
    scene: Scene,
    spawner: SpawnerHandle,
    timestep: f64,
}

impl MainState {
    fn new(config: SceneConfig, seed: Option<u64>) -> GameResult<MainState> {
        let timestep = config.timestep;
        let scene = Scene::build(config);
        let spawner = scene.start_spawner(pinball::config::spawner_rng(seed))?;

        Ok(MainState {
            driver: scene.frame_driver(),
            input: scene.input(),
            scene,
            spawner,
            timestep,
        })
    }
}

impl EventHandler for MainState {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        // Fixed 60 Hz, one physics step per tick
        while ctx.time.check_update_time(60) {
            self.driver.update(self.timestep);
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Color::BLACK);
        {
            let mut target = GgezCanvas { ctx: &*ctx, canvas: &mut canvas };
            self.driver.draw(&mut target)?;
        }
        canvas.finish(ctx)?;
        Ok(())
    }

    fn text_input_event(&mut self, _ctx: &mut Context, character: char) -> GameResult {
        let mut world = lock_world(&self.scene.world);
        self.input.handle_key(&mut world, character);
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        if input.keycode == Some(KeyCode::Escape) {
            ctx.request_quit();
        }
        Ok(())
    }

    fn quit_event(&mut self, _ctx: &mut Context) -> GameResult<bool> {
        self.spawner.stop();
        let world = lock_world(&self.scene.world);
        log::info!("Quitting with {} balls in play", world.dynamic_body_count().saturating_sub(2));
        Ok(false)
    }
}

pub fn run_visual(config: SceneConfig, seed: Option<u64>) -> GameResult {
    let cb = ggez::ContextBuilder::new("pinball", "lever_physics")
        .window_setup(ggez::conf::WindowSetup::default().title("Pinball Levers"))
        .window_mode(ggez::conf::WindowMode::default().dimensions(WINDOW_WIDTH, WINDOW_HEIGHT));

    let (ctx, event_loop) = cb.build()?;
    let state = MainState::new(config, seed)?;
    event::run(ctx, event_loop, state)
}
