//! # Core Engine Module
//!
//! Shared configuration used by every simulation subsystem.

pub mod config;

pub use config::{Config, ConfigError, SimulationConfig, DEFAULT_TICK_INTERVAL_MS};
