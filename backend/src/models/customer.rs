//! Workload customer model
//!
//! A customer arrives at a given instant carrying a basket of items. The
//! basket size is the customer's workload: it determines how long checkout
//! takes. Everything else (zip code, individual purchases) only feeds the
//! customer statistics.
//!
//! Outcome fields (`actual_service_duration`, `actual_waiting_time`,
//! `served_by`) are written by the simulation and survive the run so they
//! can be inspected afterwards.

use super::product::Purchase;
use super::server::CheckoutServer;
use crate::core::time::ClockTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building customers
#[derive(Debug, Error, PartialEq)]
pub enum CustomerError {
    #[error("Invalid workload: item count {count} is not a valid basket size")]
    InvalidWorkload { count: i64 },
}

/// A customer queueing for checkout
///
/// # Example
/// ```
/// use checkout_simulator_core_rs::{ClockTime, WorkloadCustomer};
///
/// let customer = WorkloadCustomer::new(ClockTime::from_hms(9, 0, 0), 3);
/// assert_eq!(customer.item_count(), 3);
/// assert_eq!(customer.actual_waiting_time(), 0);
/// assert!(customer.served_by().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadCustomer {
    /// Unique customer identifier
    id: String,

    /// Instant the customer joins the checkout area
    arrival_time: ClockTime,

    /// Basket size; zero-item customers are never admitted
    item_count: u32,

    /// Grouping key for statistics (zip code)
    group_key: String,

    /// Basket contents; `item_count` is their sum when non-empty
    purchases: Vec<Purchase>,

    /// Checkout duration assigned on admission (seconds)
    actual_service_duration: u64,

    /// Seconds spent queueing before reaching the till
    actual_waiting_time: u64,

    /// Index of the server the customer chose
    served_by: Option<usize>,
}

impl WorkloadCustomer {
    /// Create a customer with a plain item count and a random UUID
    pub fn new(arrival_time: ClockTime, item_count: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            arrival_time,
            item_count,
            group_key: String::new(),
            purchases: Vec::new(),
            actual_service_duration: 0,
            actual_waiting_time: 0,
            served_by: None,
        }
    }

    /// Create a customer from an untrusted signed item count
    ///
    /// # Errors
    /// `CustomerError::InvalidWorkload` if `item_count` is negative
    pub fn checked(arrival_time: ClockTime, item_count: i64) -> Result<Self, CustomerError> {
        let count = u32::try_from(item_count)
            .map_err(|_| CustomerError::InvalidWorkload { count: item_count })?;
        Ok(Self::new(arrival_time, count))
    }

    /// Create a customer whose workload is the sum of its purchases
    ///
    /// The item count saturates at `u32::MAX`; use `checked_from_purchases`
    /// for untrusted baskets.
    pub fn from_purchases(
        arrival_time: ClockTime,
        group_key: impl Into<String>,
        purchases: Vec<Purchase>,
    ) -> Self {
        let item_count = purchases
            .iter()
            .fold(0u32, |total, purchase| total.saturating_add(purchase.count()));
        Self::with_basket(arrival_time, group_key.into(), purchases, item_count)
    }

    /// Create a customer from an untrusted basket
    ///
    /// # Errors
    /// `CustomerError::InvalidWorkload` if the purchase counts add up past
    /// `u32::MAX`
    pub fn checked_from_purchases(
        arrival_time: ClockTime,
        group_key: impl Into<String>,
        purchases: Vec<Purchase>,
    ) -> Result<Self, CustomerError> {
        let mut item_count: u32 = 0;
        let mut total = 0i64;
        for purchase in &purchases {
            total += i64::from(purchase.count());
            item_count = item_count
                .checked_add(purchase.count())
                .ok_or(CustomerError::InvalidWorkload { count: total })?;
        }
        Ok(Self::with_basket(arrival_time, group_key.into(), purchases, item_count))
    }

    fn with_basket(
        arrival_time: ClockTime,
        group_key: String,
        purchases: Vec<Purchase>,
        item_count: u32,
    ) -> Self {
        Self {
            group_key,
            purchases,
            ..Self::new(arrival_time, item_count)
        }
    }

    /// Replace the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the statistics grouping key
    pub fn with_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = group_key.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn arrival_time(&self) -> ClockTime {
        self.arrival_time
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    pub fn actual_service_duration(&self) -> u64 {
        self.actual_service_duration
    }

    pub fn actual_waiting_time(&self) -> u64 {
        self.actual_waiting_time
    }

    pub fn served_by(&self) -> Option<usize> {
        self.served_by
    }

    /// Pick the server with the lowest expected total time (wait + service)
    ///
    /// Ties go to the server listed first. Returns `None` only when
    /// `servers` is empty.
    pub fn select_server(&self, servers: &[CheckoutServer]) -> Option<usize> {
        servers
            .iter()
            .enumerate()
            .min_by_key(|(_, server)| {
                server
                    .expected_waiting_time(self)
                    .saturating_add(server.expected_service_time(self.item_count))
            })
            .map(|(index, _)| index)
    }

    /// Forget the outcome of a previous run
    pub fn reset_outcome(&mut self) {
        self.actual_service_duration = 0;
        self.actual_waiting_time = 0;
        self.served_by = None;
    }

    pub(crate) fn record_admission(&mut self, service_seconds: u64, initial_wait: u64) {
        self.actual_service_duration = service_seconds;
        self.actual_waiting_time = initial_wait;
    }

    pub(crate) fn add_waiting_time(&mut self, seconds: u64) {
        self.actual_waiting_time = self.actual_waiting_time.saturating_add(seconds);
    }

    pub(crate) fn assign_server(&mut self, server: usize) {
        self.served_by = Some(server);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_count_from_purchases() {
        let customer = WorkloadCustomer::from_purchases(
            ClockTime::from_hms(10, 0, 0),
            "1015KE",
            vec![Purchase::new("A1", 2), Purchase::new("B2", 5)],
        );
        assert_eq!(customer.item_count(), 7);
        assert_eq!(customer.group_key(), "1015KE");
    }

    #[test]
    fn test_checked_basket_rejects_overflowing_total() {
        let result = WorkloadCustomer::checked_from_purchases(
            ClockTime::from_hms(10, 0, 0),
            "1015KE",
            vec![Purchase::new("A1", 3_000_000_000), Purchase::new("B2", 3_000_000_000)],
        );
        assert_eq!(
            result.unwrap_err(),
            CustomerError::InvalidWorkload { count: 6_000_000_000 }
        );
    }

    #[test]
    fn test_unchecked_basket_saturates() {
        let customer = WorkloadCustomer::from_purchases(
            ClockTime::from_hms(10, 0, 0),
            "1015KE",
            vec![Purchase::new("A1", u32::MAX), Purchase::new("B2", 1)],
        );
        assert_eq!(customer.item_count(), u32::MAX);
    }

    #[test]
    fn test_checked_rejects_negative_items() {
        let result = WorkloadCustomer::checked(ClockTime::from_hms(10, 0, 0), -1);
        assert_eq!(
            result.unwrap_err(),
            CustomerError::InvalidWorkload { count: -1 }
        );
    }

    #[test]
    fn test_select_server_empty_list() {
        let customer = WorkloadCustomer::new(ClockTime::from_hms(10, 0, 0), 4);
        assert_eq!(customer.select_server(&[]), None);
    }

    #[test]
    fn test_reset_outcome() {
        let mut customer = WorkloadCustomer::new(ClockTime::from_hms(10, 0, 0), 4);
        customer.record_admission(28, 12);
        customer.assign_server(1);
        customer.add_waiting_time(5);
        assert_eq!(customer.actual_waiting_time(), 17);

        customer.reset_outcome();
        assert_eq!(customer.actual_service_duration(), 0);
        assert_eq!(customer.actual_waiting_time(), 0);
        assert_eq!(customer.served_by(), None);
    }
}
