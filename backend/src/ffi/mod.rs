//! Python bindings (feature `pyo3`)
//!
//! The boundary is JSON in, JSON out: scenarios and configurations cross as
//! strings so the Python side can reuse the same files as the CLI.

pub mod simulator;
pub mod types;
