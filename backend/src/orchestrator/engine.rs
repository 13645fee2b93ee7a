//! Simulation driver
//!
//! Runs one simulated day over a set of checkout servers:
//!
//! ```text
//! 1. Restart every server at opening time
//! 2. Order customers by arrival (stable for equal arrival times)
//! 3. For each customer:
//!    a. advance every server's clock to the arrival time
//!    b. let the customer pick the server with the lowest wait + service
//!    c. admit the customer there
//! 4. Advance every server to closing time + overtime to drain the queues
//! 5. Remove the overtime window from each server's clock and idle time
//! ```
//!
//! All servers are advanced before a selection is made, so every choice sees
//! servers synchronized to the same instant.
//!
//! # Example
//!
//! ```rust
//! use checkout_simulator_core_rs::orchestrator::{
//!     OpeningHours, ServerConfig, SimulationDriver, SimulatorConfig,
//! };
//! use checkout_simulator_core_rs::policy::CheckoutPolicy;
//! use checkout_simulator_core_rs::{ClockTime, WorkloadCustomer};
//!
//! let config = SimulatorConfig {
//!     servers: vec![
//!         ServerConfig::new("Till 1", CheckoutPolicy::Fifo),
//!         ServerConfig::new("Express", CheckoutPolicy::Priority { threshold: 5 }),
//!     ],
//!     ..SimulatorConfig::default()
//! };
//! let hours = OpeningHours::new(ClockTime::from_hms(9, 0, 0), ClockTime::from_hms(10, 0, 0));
//! let mut driver = SimulationDriver::new(&config, hours).unwrap();
//!
//! let mut customers = vec![
//!     WorkloadCustomer::new(ClockTime::from_hms(9, 0, 0), 12),
//!     WorkloadCustomer::new(ClockTime::from_hms(9, 0, 5), 2),
//! ];
//! driver.run(&mut customers).unwrap();
//!
//! assert_eq!(customers[0].served_by(), Some(0));
//! assert_eq!(customers[1].served_by(), Some(1));
//! ```

use crate::core::time::{ClockTime, SECONDS_PER_DAY};
use crate::models::customer::WorkloadCustomer;
use crate::models::event::{Event, EventLog};
use crate::models::server::{CheckoutServer, ServerError};
use crate::policy::{CheckoutPolicy, ServiceTimes};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Overtime appended after closing to drain the queues (15 minutes)
pub const DEFAULT_OVERTIME_SECONDS: u64 = 15 * 60;

// ============================================================================
// Configuration Types
// ============================================================================

/// Server line-up and timing constants for a run
///
/// Opening and closing times belong to the scenario, not to the line-up, so
/// the same configuration can be compared across scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Label for reports (e.g. "2 FIFO + 1 express")
    #[serde(default)]
    pub label: String,

    /// Servers in registration order; ties in selection go to the first
    pub servers: Vec<ServerConfig>,

    /// Drain window after closing, excluded from reported idle time
    #[serde(default = "default_overtime_seconds")]
    pub overtime_seconds: u64,

    /// Service-time constants applied to every server
    #[serde(default)]
    pub service_times: ServiceTimes,
}

fn default_overtime_seconds() -> u64 {
    DEFAULT_OVERTIME_SECONDS
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            servers: Vec::new(),
            overtime_seconds: DEFAULT_OVERTIME_SECONDS,
            service_times: ServiceTimes::default(),
        }
    }
}

impl SimulatorConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::InvalidConfig(e.to_string()))
    }

    /// Check that server names are unique and timing constants fit in a day
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (field, value) in [
            ("overtime_seconds", self.overtime_seconds),
            ("service_times.interaction_seconds", self.service_times.interaction_seconds),
            ("service_times.per_item_seconds", self.service_times.per_item_seconds),
        ] {
            if value > SECONDS_PER_DAY {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} = {} exceeds one day ({} seconds)",
                    field, value, SECONDS_PER_DAY
                )));
            }
        }

        let mut seen = HashSet::new();
        for server in &self.servers {
            if !seen.insert(server.name.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate server name '{}'",
                    server.name
                )));
            }
        }
        Ok(())
    }

    /// Instantiate the configured servers
    pub fn build_servers(&self) -> Vec<CheckoutServer> {
        self.servers
            .iter()
            .map(|server| {
                CheckoutServer::new(server.name.clone(), server.policy)
                    .with_service_times(self.service_times)
            })
            .collect()
    }
}

/// One configured checkout server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,

    #[serde(default)]
    pub policy: CheckoutPolicy,
}

impl ServerConfig {
    pub fn new(name: impl Into<String>, policy: CheckoutPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }
}

/// Opening window of the simulated day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open_time: ClockTime,
    pub closing_time: ClockTime,
    pub overtime_seconds: u64,
}

impl OpeningHours {
    /// Hours with the default overtime window
    pub fn new(open_time: ClockTime, closing_time: ClockTime) -> Self {
        Self {
            open_time,
            closing_time,
            overtime_seconds: DEFAULT_OVERTIME_SECONDS,
        }
    }

    pub fn with_overtime(mut self, overtime_seconds: u64) -> Self {
        self.overtime_seconds = overtime_seconds;
        self
    }

    /// Instant up to which servers keep working after the last arrival
    pub fn drain_until(&self) -> ClockTime {
        self.closing_time.plus_seconds(self.overtime_seconds)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.closing_time < self.open_time {
            return Err(SimulationError::InvalidConfig(format!(
                "closing time {} is before opening time {}",
                self.closing_time, self.open_time
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a simulation run
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Cannot run a simulation without checkout servers")]
    EmptyServerSet,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Server(#[from] ServerError),
}

// ============================================================================
// Driver
// ============================================================================

/// Owns a server line-up and replays customer streams through it
///
/// Servers are built once and restarted at the beginning of every run, so
/// the same driver can process several customer streams in turn.
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    hours: OpeningHours,
    servers: Vec<CheckoutServer>,
    event_log: EventLog,
}

impl SimulationDriver {
    /// Build the configured servers
    ///
    /// The configuration's overtime replaces the one in `hours`.
    ///
    /// # Errors
    /// `InvalidConfig` for duplicate server names or closing before opening
    pub fn new(config: &SimulatorConfig, hours: OpeningHours) -> Result<Self, SimulationError> {
        config.validate()?;
        Self::from_servers(
            config.build_servers(),
            hours.with_overtime(config.overtime_seconds),
        )
    }

    /// Drive an already-built server line-up
    pub fn from_servers(
        servers: Vec<CheckoutServer>,
        hours: OpeningHours,
    ) -> Result<Self, SimulationError> {
        hours.validate()?;
        Ok(Self {
            hours,
            servers,
            event_log: EventLog::new(),
        })
    }

    /// Simulate one day with `customers`
    ///
    /// Outcome fields of every customer are reset first, then rewritten.
    pub fn run(&mut self, customers: &mut [WorkloadCustomer]) -> Result<(), SimulationError> {
        self.event_log.clear();
        drive(&mut self.servers, customers, &self.hours, &mut self.event_log)
    }

    pub fn hours(&self) -> &OpeningHours {
        &self.hours
    }

    pub fn servers(&self) -> &[CheckoutServer] {
        &self.servers
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }
}

/// Simulate one day over borrowed servers without keeping an event log
///
/// # Errors
/// - `EmptyServerSet` if `servers` is empty
/// - `InvalidConfig` if closing is before opening
/// - `Server(ClockRegression)` if a customer arrives before opening or after
///   the overtime window
pub fn simulate(
    servers: &mut [CheckoutServer],
    customers: &mut [WorkloadCustomer],
    hours: &OpeningHours,
) -> Result<(), SimulationError> {
    let mut scratch = EventLog::new();
    drive(servers, customers, hours, &mut scratch)
}

fn drive(
    servers: &mut [CheckoutServer],
    customers: &mut [WorkloadCustomer],
    hours: &OpeningHours,
    log: &mut EventLog,
) -> Result<(), SimulationError> {
    if servers.is_empty() {
        return Err(SimulationError::EmptyServerSet);
    }
    hours.validate()?;

    for server in servers.iter_mut() {
        server.restart(hours.open_time);
    }
    for customer in customers.iter_mut() {
        customer.reset_outcome();
    }

    // Stable sort keeps input order for simultaneous arrivals
    let mut order: Vec<usize> = (0..customers.len()).collect();
    order.sort_by_key(|&index| customers[index].arrival_time());

    for index in order {
        let arrival = customers[index].arrival_time();
        if arrival >= hours.closing_time {
            warn!(customer = %customers[index].id(), %arrival, closing = %hours.closing_time, "arrival at or after closing time");
        }

        for server in servers.iter_mut() {
            server.advance_until(arrival, customers)?;
        }

        let customer = &customers[index];
        log.log(Event::CustomerArrived {
            time: arrival,
            customer_id: customer.id().to_string(),
            item_count: customer.item_count(),
        });

        if customer.item_count() == 0 {
            debug!(customer = %customer.id(), %arrival, "customer without items skipped");
            log.log(Event::CustomerSkipped {
                time: arrival,
                customer_id: customer.id().to_string(),
            });
            continue;
        }

        let chosen = customer
            .select_server(servers)
            .ok_or(SimulationError::EmptyServerSet)?;
        let expected_wait = servers[chosen].expected_waiting_time(customer);

        let customer = &mut customers[index];
        servers[chosen].admit(index, customer);
        customer.assign_server(chosen);

        debug!(
            customer = %customer.id(),
            server = %servers[chosen].name(),
            items = customer.item_count(),
            expected_wait,
            %arrival,
            "customer admitted"
        );
        log.log(Event::CustomerAdmitted {
            time: arrival,
            customer_id: customer.id().to_string(),
            server: servers[chosen].name().to_string(),
            expected_wait,
        });
    }

    let drain_until = hours.drain_until();
    let mut still_queued = 0;
    for server in servers.iter_mut() {
        server.advance_until(drain_until, customers)?;
        still_queued += server.queue_length();
        server.discount_overtime(hours.overtime_seconds);
    }

    if still_queued > 0 {
        warn!(still_queued, %drain_until, "customers left unserved after overtime");
    }
    log.log(Event::ServersDrained {
        time: drain_until,
        overtime_seconds: hours.overtime_seconds,
        still_queued,
    });

    info!(
        customers = customers.len(),
        servers = servers.len(),
        served = servers.iter().map(CheckoutServer::served_count).sum::<usize>(),
        "simulation finished"
    );
    Ok(())
}
