//! Checkout Policy Module
//!
//! A policy decides two things for a checkout server:
//! - **where** a newly admitted customer is placed in the waiting queue
//! - **how long** a hypothetical newcomer would wait if admitted now
//!
//! Policies are stateless. A server holds one `CheckoutPolicy` value and
//! dispatches on its tag; the server's own state (remaining service of the
//! customer at the till, the waiting queue) is passed in.
//!
//! Available policies:
//! 1. **Fifo**: customers are served strictly in admission order
//! 2. **Priority**: customers with at most `threshold` items overtake every
//!    queued customer with more items, but never the one already being served
//!
//! # Example
//!
//! ```rust
//! use checkout_simulator_core_rs::policy::{CheckoutPolicy, ServiceTimes};
//!
//! let times = ServiceTimes::default();
//! assert_eq!(times.expected_service_time(0), 0);
//! assert_eq!(times.expected_service_time(3), 26);
//!
//! let express = CheckoutPolicy::Priority { threshold: 5 };
//! assert!(express.is_small(5));
//! assert!(!express.is_small(6));
//! assert!(!CheckoutPolicy::Fifo.is_small(1));
//! ```

use crate::models::server::QueuedCustomer;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

mod fifo;
mod priority;

/// Seconds spent with every customer regardless of basket size
pub const DEFAULT_INTERACTION_SECONDS: u64 = 20;

/// Seconds needed to scan a single item
pub const DEFAULT_PER_ITEM_SECONDS: u64 = 2;

/// Service-time constants shared by all policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTimes {
    /// Fixed greeting/payment overhead per customer (seconds)
    pub interaction_seconds: u64,

    /// Scan time per item (seconds)
    pub per_item_seconds: u64,
}

impl Default for ServiceTimes {
    fn default() -> Self {
        Self {
            interaction_seconds: DEFAULT_INTERACTION_SECONDS,
            per_item_seconds: DEFAULT_PER_ITEM_SECONDS,
        }
    }
}

impl ServiceTimes {
    /// Net checkout duration for a basket of `item_count` items
    ///
    /// An empty basket generates no service demand at all. Saturates at
    /// `u64::MAX`.
    pub fn expected_service_time(&self, item_count: u32) -> u64 {
        if item_count == 0 {
            return 0;
        }
        u64::from(item_count)
            .saturating_mul(self.per_item_seconds)
            .saturating_add(self.interaction_seconds)
    }
}

/// Queueing discipline of a checkout server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckoutPolicy {
    /// First-in-first-out
    #[default]
    Fifo,

    /// Two-class priority: small baskets go ahead of large ones
    Priority {
        /// Maximum item count eligible for priority placement
        threshold: u32,
    },
}

impl CheckoutPolicy {
    /// Whether a basket of `item_count` items qualifies for priority placement
    ///
    /// Always `false` under FIFO.
    pub fn is_small(&self, item_count: u32) -> bool {
        match self {
            CheckoutPolicy::Fifo => false,
            CheckoutPolicy::Priority { threshold } => item_count <= *threshold,
        }
    }

    /// Expected wait for a candidate with `item_count` items
    ///
    /// # Arguments
    /// * `remaining_in_service` - Seconds left for the customer at the till (0 if idle)
    /// * `queue` - Customers waiting behind the till, head first
    /// * `item_count` - Basket size of the candidate
    ///
    /// The queue is never reordered; only the customers that would still be
    /// ahead of the candidate after admission contribute.
    pub fn expected_waiting_time(
        &self,
        remaining_in_service: u64,
        queue: &VecDeque<QueuedCustomer>,
        item_count: u32,
    ) -> u64 {
        let queued = match self {
            CheckoutPolicy::Fifo => fifo::queued_work_ahead(queue),
            CheckoutPolicy::Priority { threshold } => {
                priority::queued_work_ahead(queue, item_count, *threshold)
            }
        };
        remaining_in_service.saturating_add(queued)
    }

    /// Queue position at which a customer with `item_count` items is inserted
    pub fn admission_index(&self, queue: &VecDeque<QueuedCustomer>, item_count: u32) -> usize {
        match self {
            CheckoutPolicy::Fifo => fifo::admission_index(queue),
            CheckoutPolicy::Priority { threshold } => {
                priority::admission_index(queue, item_count, *threshold)
            }
        }
    }
}

impl fmt::Display for CheckoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutPolicy::Fifo => write!(f, "FIFO"),
            CheckoutPolicy::Priority { threshold } => write!(f, "Priority(<={})", threshold),
        }
    }
}
