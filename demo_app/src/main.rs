//! Falling boxes demo
//!
//! Drops randomly placed boxes onto a floor in a headless scene and logs
//! collision counts. Pass a `.toml` or `.ron` engine config as the first
//! argument to override the defaults.

use rand::Rng;
use reify_engine::foundation::logging;
use reify_engine::prelude::*;
use reify_engine::physics::CollisionError;
use reify_engine::render::BackendResult;
use std::cell::Cell;
use std::rc::Rc;

const FRAMES: u32 = 600;
const FRAME_DELTA: f32 = 1.0 / 60.0;
const BOX_COUNT: usize = 24;
const BOX_SIZE: f32 = 24.0;
const FLOOR_HEIGHT: f32 = 16.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("config: {0}")]
    Config(#[from] reify_engine::config::ConfigError),

    #[error("collision: {0}")]
    Collision(#[from] CollisionError),

    #[error("scene: {0}")]
    Scene(#[from] SceneError),
}

/// Render backend that only counts and logs what it is asked to draw
#[derive(Default)]
struct LoggingBackend {
    frame: u64,
    draws: usize,
}

impl RenderBackend for LoggingBackend {
    fn begin(&mut self, _camera: &Camera2D) -> BackendResult<()> {
        self.draws = 0;
        Ok(())
    }

    fn draw(&mut self, _request: &DrawRequest) -> BackendResult<()> {
        self.draws += 1;
        Ok(())
    }

    fn end(&mut self) -> BackendResult<()> {
        self.frame += 1;
        log::trace!("frame {}: {} sprites", self.frame, self.draws);
        Ok(())
    }

    fn resize(&mut self, width: f32, height: f32) {
        log::debug!("backend viewport {}x{}", width, height);
    }

    fn release(&mut self) -> BackendResult<()> {
        log::info!("Rendered {} frames", self.frame);
        Ok(())
    }
}

fn load_config() -> Result<EngineConfig, DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            EngineConfig::load_from_file(path)?
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn build_scene(config: &EngineConfig, collisions: &Rc<Cell<usize>>) -> Result<Scene, DemoError> {
    let mut scene = Scene::with_config("falling_boxes", &config.simulation)?;
    let area = config.collision.bounding_box;

    let mut collision_system = CollisionSystem::new(config.collision.clone())?;
    let counter = Rc::clone(collisions);
    collision_system.observe_collisions(move |collision| {
        log::trace!("{:?} hit {:?}", collision.entity_a().tag(), collision.entity_b().tag());
        counter.set(counter.get() + 1);
    });

    scene.add_system(GravitySystem::new());
    scene.add_system(MovementSystem::new());
    scene.add_system(collision_system);
    scene.add_system(RenderingSystem::new(
        LoggingBackend::default(),
        Camera2D::new(area.width, area.height),
    ));

    let floor = scene.create_entity("floor");
    scene.add_component(&floor, TransformComponent::new(area.min(), area.width, FLOOR_HEIGHT));
    scene.add_component(&floor, HitboxComponent::new(CollisionShape::rectangle(area.width, FLOOR_HEIGHT)));
    scene.add_component(&floor, RenderComponent::new(TextureHandle(0)).with_depth(-1));

    let mut rng = rand::thread_rng();
    for body in scene.create_entities(BOX_COUNT, "box") {
        let position = Vec2::new(
            area.x + rng.gen_range(0.0..(area.width - BOX_SIZE).max(1.0)),
            area.y + area.height / 2.0 + rng.gen_range(0.0..(area.height / 2.0 - BOX_SIZE).max(1.0)),
        );
        let drift = Vec2::new(rng.gen_range(-40.0..40.0), 0.0);

        scene.add_component(&body, TransformComponent::new(position, BOX_SIZE, BOX_SIZE));
        scene.add_component(&body, MovementComponent::with_velocity(drift));
        scene.add_component(&body, GravityComponent { scale: rng.gen_range(0.5..1.5) });
        scene.add_component(&body, HitboxComponent::new(CollisionShape::rectangle(BOX_SIZE, BOX_SIZE)));
        scene.add_component(&body, RenderComponent::new(TextureHandle(1)));
    }

    scene.resize(area.width, area.height);
    Ok(scene)
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    let collisions = Rc::new(Cell::new(0));

    let mut stack = SceneStack::new();
    stack.push(build_scene(&config, &collisions)?);

    for frame in 1..=FRAMES {
        stack.update(FRAME_DELTA)?;
        if frame % 60 == 0 {
            log::info!("t={}s collisions reported: {}", frame / 60, collisions.get());
            collisions.set(0);
        }
    }

    stack.dispose_all()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");
    log::info!("Starting falling boxes demo");

    match run() {
        Ok(()) => {
            log::info!("Demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Demo failed: {}", e);
            Err(e.into())
        }
    }
}
