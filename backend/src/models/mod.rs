//! Domain models for the checkout simulator

pub mod customer;
pub mod event;
pub mod product;
pub mod server;

// Re-exports
pub use customer::{CustomerError, WorkloadCustomer};
pub use event::{Event, EventLog};
pub use product::{Product, Purchase};
pub use server::{CheckoutServer, QueuedCustomer, ServerError, ServerState};
