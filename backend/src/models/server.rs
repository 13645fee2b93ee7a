//! Checkout server model
//!
//! A checkout server ("cashier") owns a waiting queue, a virtual clock, a
//! till slot holding at most one customer, and running statistics.
//!
//! # Time advance
//!
//! `advance_until` moves the clock forward to a target instant and does all
//! the work that fits in between: finishing the customer at the till,
//! starting and finishing queued customers, and idling once the queue runs
//! dry. Service that does not fit is carried over in `remaining_service_time`
//! and picked up by the next call, so calls compose: advancing to `t1` and
//! then to `t2` is identical to advancing to `t2` directly.
//!
//! # Waiting time accounting
//!
//! When a customer reaches the till, every customer still queued behind it is
//! charged its full service duration, including the part that overflows past
//! the current target. A newcomer admitted while someone is at the till is
//! charged that customer's remaining service up front. Both together make a
//! customer's waiting time equal to its service start minus its arrival.
//!
//! # Critical Invariants
//!
//! 1. The clock never moves backwards within a run
//! 2. `in_service` is set iff `remaining_service_time > 0` (zero-length
//!    service completes on the spot)
//! 3. `max_queue_length` covers every length observed at admission

use super::customer::WorkloadCustomer;
use crate::core::time::ClockTime;
use crate::policy::{CheckoutPolicy, ServiceTimes};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::trace;

/// Errors raised while advancing a server
#[derive(Debug, Error, PartialEq)]
pub enum ServerError {
    #[error("Clock regression on server {server}: requested {target} but clock is at {current}")]
    ClockRegression {
        server: String,
        current: ClockTime,
        target: ClockTime,
    },

    #[error("Customer index {index} out of range ({len} customers)")]
    UnknownCustomer { index: usize, len: usize },
}

/// Queue entry: a reference into the customer list plus what the policy
/// needs to know without touching the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedCustomer {
    /// Index into the customer slice handed to the server
    pub customer: usize,

    /// Basket size
    pub item_count: u32,

    /// Service duration assigned at admission (seconds)
    pub service_seconds: u64,
}

/// Coarse server state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Serving,
}

/// A checkout server with its queue, clock and statistics
///
/// # Example
/// ```
/// use checkout_simulator_core_rs::{CheckoutServer, ClockTime, WorkloadCustomer};
///
/// let open = ClockTime::from_hms(9, 0, 0);
/// let mut customers = vec![
///     WorkloadCustomer::new(open, 3),
///     WorkloadCustomer::new(open, 3),
/// ];
///
/// let mut server = CheckoutServer::fifo("Till 1");
/// server.restart(open);
/// server.admit(0, &mut customers[0]);
/// server.admit(1, &mut customers[1]);
/// server.advance_until(ClockTime::from_hms(9, 10, 0), &mut customers).unwrap();
///
/// assert_eq!(server.total_service_seconds(), 52);
/// assert_eq!(server.total_idle_seconds(), 548);
/// assert_eq!(customers[1].actual_waiting_time(), 26);
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutServer {
    /// Name used in reports
    name: String,

    /// Queueing discipline
    policy: CheckoutPolicy,

    /// Service-time constants
    service_times: ServiceTimes,

    /// Customers waiting behind the till, head first
    queue: VecDeque<QueuedCustomer>,

    /// Current simulated instant
    clock: ClockTime,

    /// Customer at the till
    in_service: Option<QueuedCustomer>,

    /// Seconds left for `in_service`; carried over between calls
    remaining_service_time: u64,

    total_idle_seconds: u64,
    max_queue_length: usize,
    served_count: usize,
    total_wait_seconds: u64,
    max_wait_seconds: u64,
    total_service_seconds: u64,

    /// Customer indices in the order they finished
    completion_order: Vec<usize>,
}

impl CheckoutServer {
    /// Create a server with the default service times
    pub fn new(name: impl Into<String>, policy: CheckoutPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
            service_times: ServiceTimes::default(),
            queue: VecDeque::new(),
            clock: ClockTime::MIDNIGHT,
            in_service: None,
            remaining_service_time: 0,
            total_idle_seconds: 0,
            max_queue_length: 0,
            served_count: 0,
            total_wait_seconds: 0,
            max_wait_seconds: 0,
            total_service_seconds: 0,
            completion_order: Vec::new(),
        }
    }

    /// Shorthand for a FIFO server
    pub fn fifo(name: impl Into<String>) -> Self {
        Self::new(name, CheckoutPolicy::Fifo)
    }

    /// Shorthand for a priority server
    pub fn priority(name: impl Into<String>, threshold: u32) -> Self {
        Self::new(name, CheckoutPolicy::Priority { threshold })
    }

    /// Override the service-time constants
    pub fn with_service_times(mut self, service_times: ServiceTimes) -> Self {
        self.service_times = service_times;
        self
    }

    // ========================================================================
    // Simulation operations
    // ========================================================================

    /// Reset to a fresh run starting at `open_time`
    pub fn restart(&mut self, open_time: ClockTime) {
        self.queue.clear();
        self.clock = open_time;
        self.in_service = None;
        self.remaining_service_time = 0;
        self.total_idle_seconds = 0;
        self.max_queue_length = 0;
        self.served_count = 0;
        self.total_wait_seconds = 0;
        self.max_wait_seconds = 0;
        self.total_service_seconds = 0;
        self.completion_order.clear();
    }

    /// Net checkout duration for `item_count` items
    pub fn expected_service_time(&self, item_count: u32) -> u64 {
        self.service_times.expected_service_time(item_count)
    }

    /// How long `candidate` would wait if admitted now
    pub fn expected_waiting_time(&self, candidate: &WorkloadCustomer) -> u64 {
        self.policy.expected_waiting_time(
            self.remaining_service_time,
            &self.queue,
            candidate.item_count(),
        )
    }

    /// Add a customer to the queue
    ///
    /// `index` is the customer's position in the slice later passed to
    /// `advance_until`. Customers without items are ignored.
    ///
    /// # Returns
    /// `true` if the customer was queued
    pub fn admit(&mut self, index: usize, customer: &mut WorkloadCustomer) -> bool {
        let item_count = customer.item_count();
        if item_count == 0 {
            return false;
        }

        let service_seconds = self.expected_service_time(item_count);
        customer.record_admission(service_seconds, self.remaining_service_time);

        let position = self.policy.admission_index(&self.queue, item_count);
        self.queue.insert(
            position,
            QueuedCustomer {
                customer: index,
                item_count,
                service_seconds,
            },
        );

        self.max_queue_length = self.max_queue_length.max(self.queue_length());
        self.served_count += 1;

        trace!(
            server = %self.name,
            customer = index,
            item_count,
            position,
            clock = %self.clock,
            "customer queued"
        );
        true
    }

    /// Do all work that fits before `target` and move the clock there
    ///
    /// # Errors
    /// - `ClockRegression` if `target` is before the current clock
    /// - `UnknownCustomer` if a queued index is outside `customers`
    pub fn advance_until(
        &mut self,
        target: ClockTime,
        customers: &mut [WorkloadCustomer],
    ) -> Result<(), ServerError> {
        if target < self.clock {
            return Err(ServerError::ClockRegression {
                server: self.name.clone(),
                current: self.clock,
                target,
            });
        }

        while let Some(available) = target.seconds_since(self.clock).filter(|gap| *gap > 0) {
            match self.in_service {
                Some(current) if self.remaining_service_time <= available => {
                    self.clock = self.clock.plus_seconds(self.remaining_service_time);
                    self.complete(current, customers)?;
                }
                Some(_) => {
                    // Carry the rest of this customer into the next call
                    self.remaining_service_time -= available;
                    self.clock = target;
                }
                None => match self.queue.pop_front() {
                    Some(next) => self.start(next, customers)?,
                    None => {
                        self.total_idle_seconds += available;
                        self.clock = target;
                    }
                },
            }
        }

        Ok(())
    }

    /// Remove the overtime window from the clock and idle time
    ///
    /// Idle time never goes below zero: overtime spent serving is not idle
    /// time to begin with.
    pub fn discount_overtime(&mut self, overtime_seconds: u64) {
        self.clock = self.clock.minus_seconds(overtime_seconds);
        self.total_idle_seconds = self.total_idle_seconds.saturating_sub(overtime_seconds);
    }

    fn start(
        &mut self,
        next: QueuedCustomer,
        customers: &mut [WorkloadCustomer],
    ) -> Result<(), ServerError> {
        for queued in &self.queue {
            customer_mut(customers, queued.customer)?.add_waiting_time(next.service_seconds);
        }
        trace!(
            server = %self.name,
            customer = next.customer,
            service_seconds = next.service_seconds,
            clock = %self.clock,
            "service started"
        );
        self.in_service = Some(next);
        self.remaining_service_time = next.service_seconds;
        Ok(())
    }

    fn complete(
        &mut self,
        finished: QueuedCustomer,
        customers: &mut [WorkloadCustomer],
    ) -> Result<(), ServerError> {
        let waited = customer_mut(customers, finished.customer)?.actual_waiting_time();
        self.total_wait_seconds += waited;
        self.max_wait_seconds = self.max_wait_seconds.max(waited);
        self.total_service_seconds += finished.service_seconds;
        self.completion_order.push(finished.customer);
        self.in_service = None;
        self.remaining_service_time = 0;
        trace!(
            server = %self.name,
            customer = finished.customer,
            waited,
            clock = %self.clock,
            "service completed"
        );
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> CheckoutPolicy {
        self.policy
    }

    pub fn service_times(&self) -> ServiceTimes {
        self.service_times
    }

    pub fn clock(&self) -> ClockTime {
        self.clock
    }

    pub fn state(&self) -> ServerState {
        if self.in_service.is_some() {
            ServerState::Serving
        } else {
            ServerState::Idle
        }
    }

    /// Index of the customer at the till
    pub fn in_service(&self) -> Option<usize> {
        self.in_service.map(|current| current.customer)
    }

    pub fn remaining_service_time(&self) -> u64 {
        self.remaining_service_time
    }

    /// Seconds already spent on the customer at the till
    pub fn elapsed_service_time(&self) -> u64 {
        self.in_service
            .map_or(0, |current| current.service_seconds - self.remaining_service_time)
    }

    /// Waiting customers, head first
    pub fn queue(&self) -> &VecDeque<QueuedCustomer> {
        &self.queue
    }

    /// Customers at this server: queued plus the one at the till
    pub fn queue_length(&self) -> usize {
        self.queue.len() + usize::from(self.in_service.is_some())
    }

    pub fn total_idle_seconds(&self) -> u64 {
        self.total_idle_seconds
    }

    pub fn max_queue_length(&self) -> usize {
        self.max_queue_length
    }

    pub fn served_count(&self) -> usize {
        self.served_count
    }

    pub fn total_wait_seconds(&self) -> u64 {
        self.total_wait_seconds
    }

    pub fn max_wait_seconds(&self) -> u64 {
        self.max_wait_seconds
    }

    pub fn total_service_seconds(&self) -> u64 {
        self.total_service_seconds
    }

    /// Customer indices in completion order
    pub fn completion_order(&self) -> &[usize] {
        &self.completion_order
    }

    /// Mean waiting time per admitted customer (0 when nobody was admitted)
    pub fn average_waiting_time(&self) -> f64 {
        per_customer(self.total_wait_seconds, self.served_count)
    }

    /// Mean checkout duration per admitted customer (0 when nobody was admitted)
    pub fn average_service_time(&self) -> f64 {
        per_customer(self.total_service_seconds, self.served_count)
    }
}

fn per_customer(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

fn customer_mut(
    customers: &mut [WorkloadCustomer],
    index: usize,
) -> Result<&mut WorkloadCustomer, ServerError> {
    let len = customers.len();
    customers
        .get_mut(index)
        .ok_or(ServerError::UnknownCustomer { index, len })
}
