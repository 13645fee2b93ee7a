//! Product and purchase model
//!
//! Products only matter to customer statistics (revenue, popularity). The
//! scheduling core never looks at them: a customer's workload is the plain
//! item count derived from its purchases.

use super::customer::CustomerError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A product sold in the supermarket
///
/// Identity is the product code: two products with the same code are the
/// same product, whatever their description or price.
///
/// # Example
/// ```
/// use checkout_simulator_core_rs::Product;
///
/// let milk = Product::new("A001", "Milk 1L", 1.09);
/// let same_code = Product::new("A001", "Whole milk", 1.19);
/// assert_eq!(milk, same_code);
/// assert_eq!(milk.to_string(), "Milk 1L");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    code: String,
    description: String,
    price: f64,
}

impl Product {
    pub fn new(code: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            price,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for Product {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Product {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// A number of units of one product in a customer's basket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    product_code: String,
    count: u32,
}

impl Purchase {
    pub fn new(product_code: impl Into<String>, count: u32) -> Self {
        Self {
            product_code: product_code.into(),
            count,
        }
    }

    /// Build a purchase from an untrusted signed count
    ///
    /// # Errors
    /// `CustomerError::InvalidWorkload` if `count` is negative or too large
    pub fn checked(product_code: impl Into<String>, count: i64) -> Result<Self, CustomerError> {
        let count = u32::try_from(count).map_err(|_| CustomerError::InvalidWorkload { count })?;
        Ok(Self::new(product_code, count))
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
