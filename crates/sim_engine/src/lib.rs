//! # Sim Engine
//!
//! The simulation core of a small real-time object engine: a fixed-rate
//! tick loop that moves objects, finds contacts through a spatial index and
//! resolves them with a simple momentum exchange.
//!
//! ## Features
//!
//! - **Spatial Index**: three interchangeable grid variants behind one trait
//! - **Colliders**: circle and rectangle shapes, plus an inverting decorator
//! - **Physics**: velocity integration, damping with a rest snap, contact resolution
//! - **Parallel Detection**: read-only contact detection on rayon (`parallel` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sim_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(SimulationConfig::default())?;
//!
//!     let body = PhysicsBody::new(1.0, 0.98).with_velocity(Vec3::new(1.0, 0.0, 0.0));
//!     let collider = ColliderComponent::new(ShapeCollider::circle(0.5)).with_active(true);
//!     engine
//!         .world_mut()
//!         .spawn(GameObject::at(Vec3::zeros()).with_body(body).with_collider(collider));
//!
//!     engine.run_ticks(50)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod config;
pub mod core;

pub mod foundation;
pub mod physics;
pub mod scene;
pub mod spatial;

mod engine;


pub use engine::{Engine, EngineError, EngineState, TickReport};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::SimulationConfig,
        foundation::math::{Quat, Transform, Vec2, Vec3},
        physics::{
            Collider, ColliderComponent, ColliderType, Collision, InverseCollider, PhysicsBody,
            PhysicsError, Shape, ShapeCollider,
        },
        scene::{GameObject, ObjectId, RenderHandle, World},
        spatial::{Grid, GridEntry, IndexKind, SpatialIndex},
        Engine, EngineError, EngineState, TickReport,
    };
}
