//! Core engine implementation: the fixed-rate tick driver

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;

use crate::{
    config::ConfigError,
    core::SimulationConfig,
    foundation::{
        logging::{debug, error, info},
        time::{Stopwatch, TickTimer},
    },
    physics::{detect_contacts, resolve_contact, Collision, PhysicsError},
    scene::{GameObject, ObjectId, World},
};

/// Whether the engine still accepts ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Ticking normally
    Running,
    /// Stopped after a fatal error or a shutdown request
    Halted,
}

/// Summary of one completed tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Number of the tick, starting at 1
    pub tick: u64,
    /// Contacts found by all active colliders
    pub contacts: usize,
    /// Contacts that went through resolution
    pub resolved: usize,
    /// Wall time spent inside the tick
    pub elapsed: Duration,
}

/// Main engine struct
///
/// Owns the world and drives it one fixed interval at a time. A tick runs
/// in two phases: every active collider detects its contacts against the
/// unchanged world, then each body is integrated, resolved and committed
/// one after the other. Resolution writes to both bodies of a contact, so
/// only detection is allowed to run in parallel.
pub struct Engine {
    world: World,
    config: SimulationConfig,
    state: EngineState,
    tick_count: u64,
    last_delta: Duration,
}

impl Engine {
    /// Create an engine with an empty world
    pub fn new(config: SimulationConfig) -> Result<Self, EngineError> {
        let world = World::new(config.index_kind);
        Self::with_world(config, world)
    }

    /// Create an engine around an already populated world
    pub fn with_world(config: SimulationConfig, world: World) -> Result<Self, EngineError> {
        config.validate()?;
        info!(
            "Initializing engine: {} ms ticks, {:?} index, {} objects",
            config.tick_interval_ms,
            world.grid().kind(),
            world.len()
        );

        Ok(Self {
            world,
            config,
            state: EngineState::Running,
            tick_count: 0,
            last_delta: Duration::ZERO,
        })
    }

    /// Advance the simulation by one tick.
    ///
    /// A fatal physics error halts the engine; the error is returned once
    /// and every later call fails with [`EngineError::Halted`].
    pub fn tick(&mut self) -> Result<TickReport, EngineError> {
        if self.state == EngineState::Halted {
            return Err(EngineError::Halted);
        }

        let stopwatch = Stopwatch::start_new();

        let detected = self.detect_all();
        let contacts: usize = detected.iter().map(|(_, collisions)| collisions.len()).sum();
        for (id, collisions) in detected {
            if let Some(collider) = self.world.get_mut(id).and_then(GameObject::collider_mut) {
                collider.set_collisions(collisions);
            }
        }

        let mut resolved = 0;
        for id in self.world.ids() {
            match self.tick_body(id) {
                Ok(count) => resolved += count,
                Err(err) => {
                    error!("Fatal physics error on tick {}: {}", self.tick_count + 1, err);
                    self.state = EngineState::Halted;
                    return Err(err.into());
                }
            }
        }

        if self.config.reindex_each_tick {
            self.world.reindex();
        }

        self.tick_count += 1;
        Ok(TickReport {
            tick: self.tick_count,
            contacts,
            resolved,
            elapsed: stopwatch.elapsed(),
        })
    }

    /// Run exactly `count` ticks back to back, without waiting
    pub fn run_ticks(&mut self, count: u64) -> Result<Vec<TickReport>, EngineError> {
        (0..count).map(|_| self.tick()).collect()
    }

    /// Run the fixed-rate loop until `keep_running` returns false or the
    /// engine halts. Ticks start one interval apart however long each
    /// tick takes, unless a tick overruns the interval.
    pub fn run<F>(&mut self, mut keep_running: F) -> Result<(), EngineError>
    where
        F: FnMut(&Self) -> bool,
    {
        info!("Starting tick loop...");
        let mut timer = TickTimer::new(self.config.tick_interval());

        while self.state == EngineState::Running && keep_running(self) {
            std::thread::sleep(timer.until_next_tick());
            timer.mark_tick();
            self.last_delta = timer.delta();
            self.tick()?;
        }

        info!("Tick loop stopped after {} ticks", self.tick_count);
        Ok(())
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        info!("Engine shutdown requested");
        self.state = EngineState::Halted;
    }

    /// Current state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the engine refuses further ticks
    pub fn is_halted(&self) -> bool {
        self.state == EngineState::Halted
    }

    /// Ticks completed so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Measured interval between the starts of the last two ticks of [`Engine::run`]
    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }

    /// Get the world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get the configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[cfg(feature = "parallel")]
    fn detect_all(&self) -> Vec<(ObjectId, HashSet<Collision>)> {
        use rayon::prelude::*;

        if !self.config.parallel_detection {
            return self.detect_serial();
        }
        let world = &self.world;
        world
            .ids()
            .into_par_iter()
            .filter_map(|id| detect_contacts(world, id).map(|collisions| (id, collisions)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn detect_all(&self) -> Vec<(ObjectId, HashSet<Collision>)> {
        self.detect_serial()
    }

    fn detect_serial(&self) -> Vec<(ObjectId, HashSet<Collision>)> {
        self.world
            .ids()
            .into_iter()
            .filter_map(|id| detect_contacts(&self.world, id).map(|collisions| (id, collisions)))
            .collect()
    }

    /// Integrate, resolve and commit one body. Returns the number of
    /// contacts resolved.
    fn tick_body(&mut self, id: ObjectId) -> Result<usize, PhysicsError> {
        let (mut body, position, collisions) = {
            let Some(object) = self.world.get(id) else {
                return Ok(0);
            };
            let Some(body) = object.body().copied() else {
                return Ok(0);
            };
            if !body.enabled {
                return Ok(0);
            }
            let collisions: Vec<Collision> = object
                .collider()
                .map(|collider| collider.collisions().iter().copied().collect())
                .unwrap_or_default();
            (body, object.position(), collisions)
        };

        body.integrate(self.config.gravity);

        let mut resolved = 0;
        if !collisions.is_empty() && body.is_moving() {
            let others: Vec<u16> = collisions
                .iter()
                .filter_map(|collision| self.world.get(collision.other))
                .map(|other| other.metadata)
                .collect();
            debug!("{:?} collided with {:?}", id, others);

            for collision in &collisions {
                let other_body = self.world.get(collision.other).and_then(GameObject::body).copied();
                let resolution = resolve_contact(collision, &position, &body, other_body.as_ref())?;

                body.velocity = resolution.velocity;
                if let Some(velocity) = resolution.other_velocity {
                    if let Some(other) = self.world.get_mut(collision.other).and_then(GameObject::body_mut) {
                        other.velocity = velocity;
                    }
                }
                resolved += 1;
            }
        }

        let scale = self.config.tick_scale();
        if let Some(object) = self.world.get_mut(id) {
            body.commit(&mut object.transform, scale);
            if let Some(slot) = object.body_mut() {
                *slot = body;
            }
        }
        Ok(resolved)
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A tick hit an unrecoverable physics condition
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// The engine was halted and accepts no more ticks
    #[error("Engine is halted")]
    Halted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
