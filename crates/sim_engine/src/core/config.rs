//! # Simulation Configuration
//!
//! Settings for the tick loop, the world's gravity, which spatial index
//! backs the world, and logging. Loadable from TOML or RON through the
//! [`Config`] trait.
//!
//! ```toml
//! tick_interval_ms = 20
//! gravity = [0.0, 0.0, 0.0]
//! index_kind = "Packed"
//! reindex_each_tick = false
//! parallel_detection = true
//! log_level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::foundation::math::{constants, Vec3};
use crate::spatial::IndexKind;

pub use crate::config::{Config, ConfigError};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 20;

/// # Simulation Configuration
///
/// Core simulation behavior: tick rate, gravity, index strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed interval between ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Gravity applied to every body without its own override
    pub gravity: Vec3,
    /// Which spatial index backs the world
    pub index_kind: IndexKind,
    /// Clear and re-insert every object into the index after each tick
    pub reindex_each_tick: bool,
    /// Run collider detection on the rayon pool (needs the `parallel` feature)
    pub parallel_detection: bool,
    /// Default log filter for the host's logger (see `foundation::logging::init_with_level`)
    pub log_level: String,
}

impl SimulationConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            gravity: Vec3::zeros(),
            index_kind: IndexKind::default(),
            reindex_each_tick: false,
            parallel_detection: true,
            log_level: "info".to_string(),
        }
    }

    /// Set the tick interval
    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    /// Set world gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Select the spatial index strategy
    pub fn with_index_kind(mut self, kind: IndexKind) -> Self {
        self.index_kind = kind;
        self
    }

    /// Re-key the index after every tick
    pub fn with_reindex_each_tick(mut self, enabled: bool) -> Self {
        self.reindex_each_tick = enabled;
        self
    }

    /// Enable or disable parallel detection
    pub fn with_parallel_detection(mut self, enabled: bool) -> Self {
        self.parallel_detection = enabled;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Tick interval as a duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Per-tick position scale: `tick_interval / 100`
    #[allow(clippy::cast_precision_loss)]
    pub fn tick_scale(&self) -> f32 {
        self.tick_interval_ms as f32 / constants::TICK_SCALE_DIVISOR
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("Tick interval must be at least 1 ms".to_string()));
        }

        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid(format!("Gravity must be finite, got {:?}", self.gravity)));
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("Log level cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for SimulationConfig {}
