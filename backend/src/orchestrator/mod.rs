//! Orchestrator - the simulation driver
//!
//! See `engine.rs` for the run loop and `fingerprint.rs` for input hashing.

pub mod engine;
pub mod fingerprint;

// Re-export main types for convenience
pub use engine::{
    simulate, OpeningHours, ServerConfig, SimulationDriver, SimulationError, SimulatorConfig,
    DEFAULT_OVERTIME_SECONDS,
};
pub use fingerprint::compute_config_hash;
