//! Deterministic random number generation
//!
//! Only synthetic arrivals draw random numbers; the simulation itself is
//! deterministic. Any randomness MUST go through this module so a seed
//! reproduces a scenario exactly.

mod xorshift;

pub use xorshift::RngManager;
