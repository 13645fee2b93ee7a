//! Arrival generation module for deterministic customer creation.
//!
//! Produces synthetic customer streams for experiments. All generation is
//! deterministic based on the RNG seed.
//!
//! # Key Principles
//!
//! 1. **Determinism**: Same seed + same config + same catalog → same customers
//! 2. **Arrival window**: arrivals are spread uniformly over the opening
//!    hours, ending a minute before closing so the servers can finish
//! 3. **Skewed baskets**: the product of two uniforms makes small baskets
//!    common and large ones rare, while the mean stays at `average_items`
//!
//! # Example
//!
//! ```
//! use checkout_simulator_core_rs::arrivals::{ArrivalConfig, ArrivalGenerator};
//! use checkout_simulator_core_rs::{ClockTime, Product, RngManager};
//!
//! let products = vec![
//!     Product::new("A1", "Apples", 1.99),
//!     Product::new("B2", "Bread", 2.49),
//! ];
//! let config = ArrivalConfig { num_customers: 10, average_items: 3 };
//! let mut rng = RngManager::new(42);
//! let mut generator = ArrivalGenerator::new(config);
//!
//! let customers = generator.generate(
//!     &products,
//!     ClockTime::from_hms(8, 0, 0),
//!     ClockTime::from_hms(20, 0, 0),
//!     &mut rng,
//! );
//! assert_eq!(customers.len(), 10);
//! assert!(customers.iter().all(|c| c.item_count() >= 1));
//! ```

use crate::core::time::ClockTime;
use crate::models::{Product, Purchase, WorkloadCustomer};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Minimum length of the arrival window (seconds)
const MIN_ARRIVAL_WINDOW: u64 = 60;

/// Configuration for synthetic customer arrivals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalConfig {
    /// Number of customers to create
    pub num_customers: usize,

    /// Mean basket size
    pub average_items: u32,
}

/// Generator for synthetic customers
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    config: ArrivalConfig,

    /// Next customer ID counter
    next_customer_id: usize,
}

impl ArrivalGenerator {
    pub fn new(config: ArrivalConfig) -> Self {
        Self {
            config,
            next_customer_id: 0,
        }
    }

    /// Continue numbering after `existing` customers
    pub fn starting_at(mut self, existing: usize) -> Self {
        self.next_customer_id = existing;
        self
    }

    /// Generate `num_customers` customers arriving between opening and
    /// closing time
    ///
    /// With an empty catalog customers still get an item count, just no
    /// individual purchases.
    pub fn generate(
        &mut self,
        products: &[Product],
        open_time: ClockTime,
        closing_time: ClockTime,
        rng: &mut RngManager,
    ) -> Vec<WorkloadCustomer> {
        let window = closing_time
            .seconds_since(open_time)
            .unwrap_or(0)
            .saturating_sub(MIN_ARRIVAL_WINDOW)
            .max(MIN_ARRIVAL_WINDOW);

        // Shuffled in place across customers, like drawing from a shelf
        let mut shelf: Vec<&Product> = products.iter().collect();

        let mut customers = Vec::with_capacity(self.config.num_customers);
        for _ in 0..self.config.num_customers {
            let offset = rng.range(0, window as i64) as u64;
            let arrival = open_time.plus_seconds(offset);
            let zip_code = random_zip_code(rng);
            let item_count = self.random_item_count(rng);

            let id = format!("cust_{:05}", self.next_customer_id);
            self.next_customer_id += 1;

            let customer = if shelf.is_empty() {
                WorkloadCustomer::new(arrival, item_count).with_group_key(zip_code)
            } else {
                let purchases = spread_over_products(item_count, &mut shelf, rng);
                WorkloadCustomer::from_purchases(arrival, zip_code, purchases)
            };
            customers.push(customer.with_id(id));
        }
        customers
    }

    /// `1 + floor((4·avg − 1) · u1 · u2)`
    fn random_item_count(&self, rng: &mut RngManager) -> u32 {
        let spread = (4 * self.config.average_items).saturating_sub(1) as f64;
        1 + (spread * rng.next_f64() * rng.next_f64()) as u32
    }
}

/// Split `item_count` into random chunks over distinct products
///
/// Each pick is moved past the end of the available range so a customer
/// buys a product at most once until the shelf runs out.
fn spread_over_products(
    item_count: u32,
    shelf: &mut [&Product],
    rng: &mut RngManager,
) -> Vec<Purchase> {
    let mut picks: Vec<(String, u32)> = Vec::new();
    let mut remaining = item_count;
    let mut upper = shelf.len();

    while remaining > 0 {
        if upper == 0 {
            upper = shelf.len();
        }
        let count = 1 + rng.below(remaining as usize) as u32;
        let index = rng.below(upper);
        let product: &Product = shelf[index];
        upper -= 1;
        shelf.swap(upper, index);

        match picks.iter_mut().find(|(code, _)| code == product.code()) {
            Some((_, total)) => *total += count,
            None => picks.push((product.code().to_string(), count)),
        }
        remaining -= count;
    }

    picks
        .into_iter()
        .map(|(code, count)| Purchase::new(code, count))
        .collect()
}

/// Dutch-style zip code: four digits and two letters
///
/// Five neighbourhoods (`1013`..`1017`), each with four letter combinations.
pub fn random_zip_code(rng: &mut RngManager) -> String {
    let district = rng.below(5) as u8;
    let first = rng.below(2) as u8;
    let second = rng.below(2) as u8;
    format!(
        "{}{}{}",
        1013 + u32::from(district),
        (b'A' + district + 9 * first + second) as char,
        (b'D' + district + 3 * first + 7 * second) as char
    )
}
