//! Bounce demo: balls deflecting off posts inside a circular arena
//!
//! Usage: `bounce_demo [config.toml|config.ron] [ticks]`

use sim_engine::foundation::logging;
use sim_engine::prelude::*;

const DEFAULT_TICKS: u64 = 250;
const ARENA_RADIUS: f32 = 20.0;
const BALL_RADIUS: f32 = 0.5;
const BALL_COUNT: usize = 8;
const POST_RADIUS: f32 = 1.5;

fn load_config(path: Option<&str>) -> Result<SimulationConfig, ConfigError> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            SimulationConfig::load_from_file(path)
        }
        None => Ok(SimulationConfig::default()),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn populate(world: &mut World) {
    // Container: the inverted circle collides with anything that leaves it
    let arena = ColliderComponent::new(InverseCollider::new(ShapeCollider::circle(ARENA_RADIUS)));
    world.spawn(GameObject::at(Vec3::zeros()).with_metadata(1).with_collider(arena));

    for (x, y) in [(-8.0, 0.0), (8.0, 0.0), (0.0, 8.0), (0.0, -8.0)] {
        let post = ColliderComponent::new(ShapeCollider::circle(POST_RADIUS));
        world.spawn(GameObject::at(Vec3::new(x, y, 0.0)).with_metadata(2).with_collider(post));
    }

    for i in 0..BALL_COUNT {
        let angle = std::f32::consts::TAU * i as f32 / BALL_COUNT as f32;
        let direction = Vec3::new(angle.cos(), angle.sin(), 0.0);
        let body = PhysicsBody::new(1.0, 0.995).with_velocity(direction * 3.0);
        let collider = ColliderComponent::new(ShapeCollider::circle(BALL_RADIUS)).with_active(true);
        world.spawn(
            GameObject::at(direction * 3.0)
                .with_metadata(100 + i as u16)
                .with_body(body)
                .with_collider(collider),
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    let ticks = match args.get(1) {
        Some(ticks) => ticks.parse()?,
        None => DEFAULT_TICKS,
    };

    // Initialize logging
    logging::init_with_level(&config.log_level);

    log::info!("Starting bounce demo for {} ticks", ticks);

    let mut world = World::new(config.index_kind);
    populate(&mut world);
    let mut engine = Engine::with_world(config, world)?;

    let result = engine.run(|engine| engine.tick_count() < ticks);

    for (id, object) in engine.world().objects() {
        if let Some(body) = object.body() {
            log::info!(
                "{:?} (metadata {}) at {:?}, velocity {:?}",
                id,
                object.metadata,
                object.position(),
                body.velocity
            );
        }
    }

    match result {
        Ok(()) => {
            log::info!("Demo finished after {} ticks", engine.tick_count());
            Ok(())
        }
        Err(e) => {
            log::error!("Simulation stopped: {}", e);
            Err(e.into())
        }
    }
}
