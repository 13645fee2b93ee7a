//! Event logging for simulation runs.
//!
//! The driver records one event per significant decision so a run can be
//! audited afterwards: which customer arrived when, where it went, and what
//! wait the customer expected when choosing.
//!
//! # Example
//!
//! ```rust
//! use checkout_simulator_core_rs::models::{Event, EventLog};
//! use checkout_simulator_core_rs::ClockTime;
//!
//! let mut log = EventLog::new();
//! log.log(Event::CustomerSkipped {
//!     time: ClockTime::from_hms(9, 15, 0),
//!     customer_id: "cust_00003".to_string(),
//! });
//!
//! assert_eq!(log.events_of_type("CustomerSkipped").len(), 1);
//! ```

use crate::core::time::ClockTime;

/// Simulation event capturing a driver decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Customer reached the checkout area
    CustomerArrived {
        time: ClockTime,
        customer_id: String,
        item_count: u32,
    },

    /// Customer joined a server's queue
    CustomerAdmitted {
        time: ClockTime,
        customer_id: String,
        server: String,
        expected_wait: u64,
    },

    /// Customer without items left without queueing
    CustomerSkipped { time: ClockTime, customer_id: String },

    /// All servers worked through closing time plus overtime
    ServersDrained {
        time: ClockTime,
        overtime_seconds: u64,
        still_queued: usize,
    },
}

impl Event {
    /// Simulated instant of the event
    pub fn time(&self) -> ClockTime {
        match self {
            Event::CustomerArrived { time, .. } => *time,
            Event::CustomerAdmitted { time, .. } => *time,
            Event::CustomerSkipped { time, .. } => *time,
            Event::ServersDrained { time, .. } => *time,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::CustomerArrived { .. } => "CustomerArrived",
            Event::CustomerAdmitted { .. } => "CustomerAdmitted",
            Event::CustomerSkipped { .. } => "CustomerSkipped",
            Event::ServersDrained { .. } => "ServersDrained",
        }
    }

    /// Customer ID if the event concerns one customer
    pub fn customer_id(&self) -> Option<&str> {
        match self {
            Event::CustomerArrived { customer_id, .. } => Some(customer_id),
            Event::CustomerAdmitted { customer_id, .. } => Some(customer_id),
            Event::CustomerSkipped { customer_id, .. } => Some(customer_id),
            Event::ServersDrained { .. } => None,
        }
    }

    /// Server name if the event concerns one server
    pub fn server(&self) -> Option<&str> {
        match self {
            Event::CustomerAdmitted { server, .. } => Some(server),
            _ => None,
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific customer
    pub fn events_for_customer(&self, customer_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.customer_id() == Some(customer_id))
            .collect()
    }

    /// Get admissions to a specific server
    pub fn events_for_server(&self, server: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.server() == Some(server))
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
