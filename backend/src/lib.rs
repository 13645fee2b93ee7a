//! Checkout Simulator Core - Rust Engine
//!
//! Discrete-time simulation of supermarket checkout lines with deterministic
//! execution.
//!
//! # Architecture
//!
//! - **core**: Clock time (seconds since midnight)
//! - **models**: Domain types (WorkloadCustomer, CheckoutServer, Product, Event)
//! - **policy**: Queueing disciplines (FIFO, two-class priority)
//! - **orchestrator**: Simulation driver and run fingerprints
//! - **catalog**: Scenarios, products and persistence
//! - **arrivals**: Synthetic customer streams
//! - **report**: Per-server and overall statistics
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All times are whole seconds (u64)
//! 2. A server's clock never moves backwards within a run
//! 3. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod arrivals;
pub mod catalog;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod report;
pub mod rng;

// Re-exports for convenience
pub use arrivals::{ArrivalConfig, ArrivalGenerator};
pub use catalog::{CatalogError, Scenario};
pub use core::time::{ClockTime, TimeError};
pub use models::{
    customer::{CustomerError, WorkloadCustomer},
    event::{Event, EventLog},
    product::{Product, Purchase},
    server::{CheckoutServer, QueuedCustomer, ServerError, ServerState},
};
pub use orchestrator::{
    simulate, OpeningHours, ServerConfig, SimulationDriver, SimulationError, SimulatorConfig,
};
pub use policy::{CheckoutPolicy, ServiceTimes};
pub use report::{CustomerStatistics, OverallStatistics, ServerStatistics, SimulationReport};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn checkout_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PyCheckoutSimulator>()?;
    Ok(())
}
