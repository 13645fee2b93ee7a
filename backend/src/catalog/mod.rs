//! Scenario catalog and persistence
//!
//! A scenario bundles everything a simulated day needs apart from the server
//! line-up: opening hours, the product catalog and the customers with their
//! baskets. Scenarios are stored as JSON:
//!
//! ```json
//! {
//!   "name": "weekday",
//!   "open_time": "08:00:00",
//!   "closing_time": "20:00:00",
//!   "products": [{ "code": "A1", "description": "Apples", "price": 1.99 }],
//!   "customers": [
//!     { "arrival_time": "08:03:12", "zip_code": "1015KE",
//!       "purchases": [{ "product": "A1", "count": 3 }] },
//!     { "arrival_time": "08:04:00", "item_count": 7 }
//!   ]
//! }
//! ```
//!
//! Customers without purchases carry a plain `item_count`. Counts are read
//! as signed integers so a negative basket is reported as an invalid
//! workload rather than a parse error.

use crate::arrivals::{ArrivalConfig, ArrivalGenerator};
use crate::core::time::ClockTime;
use crate::models::{CustomerError, Product, Purchase, WorkloadCustomer};
use crate::orchestrator::{compute_config_hash, OpeningHours, SimulationError, SimulatorConfig};
use crate::report::{CustomerStatistics, ZipCodeSummary};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while loading, saving or extending a scenario
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown product code '{code}' for customer {customer}")]
    UnknownProduct { code: String, customer: String },

    #[error("Duplicate product code '{0}'")]
    DuplicateProduct(String),

    #[error(transparent)]
    Customer(#[from] CustomerError),
}

// ============================================================================
// File format
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ScenarioFile {
    name: String,
    open_time: ClockTime,
    closing_time: ClockTime,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    customers: Vec<CustomerRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CustomerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    arrival_time: ClockTime,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    zip_code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    purchases: Vec<PurchaseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_count: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PurchaseRecord {
    product: String,
    count: i64,
}

// ============================================================================
// Scenario
// ============================================================================

/// Opening hours, products and customers of one simulated day
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    open_time: ClockTime,
    closing_time: ClockTime,
    products: BTreeMap<String, Product>,
    customers: Vec<WorkloadCustomer>,
}

impl Scenario {
    /// Empty scenario
    pub fn new(name: impl Into<String>, open_time: ClockTime, closing_time: ClockTime) -> Self {
        Self {
            name: name.into(),
            open_time,
            closing_time,
            products: BTreeMap::new(),
            customers: Vec::new(),
        }
    }

    /// Parse a scenario from JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: ScenarioFile = serde_json::from_str(json)?;
        let mut scenario = Scenario::new(file.name, file.open_time, file.closing_time);

        for product in file.products {
            scenario.add_product(product)?;
        }
        for (index, record) in file.customers.into_iter().enumerate() {
            let customer = record.into_customer(index)?;
            scenario.add_customer(customer)?;
        }
        Ok(scenario)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    /// Load a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let scenario = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            products = scenario.products.len(),
            customers = scenario.customers.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Write the scenario to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Add a product to the catalog
    ///
    /// # Errors
    /// `DuplicateProduct` if the code is already present
    pub fn add_product(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.products.contains_key(product.code()) {
            return Err(CatalogError::DuplicateProduct(product.code().to_string()));
        }
        self.products.insert(product.code().to_string(), product);
        Ok(())
    }

    /// Add a customer whose purchases must refer to catalog products
    ///
    /// # Errors
    /// `UnknownProduct` for a purchase of a product not in the catalog
    pub fn add_customer(&mut self, customer: WorkloadCustomer) -> Result<(), CatalogError> {
        if let Some(unknown) = customer
            .purchases()
            .iter()
            .find(|purchase| !self.products.contains_key(purchase.product_code()))
        {
            return Err(CatalogError::UnknownProduct {
                code: unknown.product_code().to_string(),
                customer: customer.id().to_string(),
            });
        }
        self.customers.push(customer);
        Ok(())
    }

    /// Append synthetic customers drawn from this catalog
    pub fn add_random_customers(&mut self, config: ArrivalConfig, rng: &mut RngManager) {
        let products: Vec<Product> = self.products.values().cloned().collect();
        let mut generator = ArrivalGenerator::new(config).starting_at(self.customers.len());
        let generated = generator.generate(&products, self.open_time, self.closing_time, rng);
        info!(count = generated.len(), average_items = config.average_items, "random customers added");
        self.customers.extend(generated);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn open_time(&self) -> ClockTime {
        self.open_time
    }

    pub fn closing_time(&self) -> ClockTime {
        self.closing_time
    }

    /// Opening hours with the default overtime window
    pub fn opening_hours(&self) -> OpeningHours {
        OpeningHours::new(self.open_time, self.closing_time)
    }

    /// Products ordered by code
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn product(&self, code: &str) -> Option<&Product> {
        self.products.get(code)
    }

    pub fn customers(&self) -> &[WorkloadCustomer] {
        &self.customers
    }

    // ========================================================================
    // Customer statistics
    // ========================================================================

    /// Items bought by all customers together
    pub fn total_number_of_items(&self) -> u64 {
        self.customers
            .iter()
            .map(|customer| u64::from(customer.item_count()))
            .sum()
    }

    /// Amount paid by one customer
    pub fn bill(&self, customer: &WorkloadCustomer) -> f64 {
        customer
            .purchases()
            .iter()
            .filter_map(|purchase| {
                self.products
                    .get(purchase.product_code())
                    .map(|product| product.price() * f64::from(purchase.count()))
            })
            .sum()
    }

    /// Revenue per zip code, ordered by zip code
    pub fn revenue_by_zip_code(&self) -> BTreeMap<String, f64> {
        let mut revenues = BTreeMap::new();
        for customer in &self.customers {
            *revenues.entry(customer.group_key().to_string()).or_insert(0.0) += self.bill(customer);
        }
        revenues
    }

    /// Product with the most units sold per zip code
    ///
    /// Ties go to the smallest product code. Zip codes without purchases are
    /// absent.
    pub fn most_bought_product_by_zip_code(&self) -> BTreeMap<String, &Product> {
        let mut counts: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
        for customer in &self.customers {
            let per_product = counts.entry(customer.group_key()).or_default();
            for purchase in customer.purchases() {
                *per_product.entry(purchase.product_code()).or_insert(0) +=
                    u64::from(purchase.count());
            }
        }

        counts
            .into_iter()
            .filter_map(|(zip_code, per_product)| {
                // Reverse iteration + max_by_key keeps the first code on ties
                let (code, _) = per_product
                    .into_iter()
                    .rev()
                    .max_by_key(|(_, count)| *count)?;
                let product = self.products.get(code)?;
                Some((zip_code.to_string(), product))
            })
            .collect()
    }

    /// Summary of the customer stream for reporting
    pub fn customer_statistics(&self) -> CustomerStatistics {
        let popular = self.most_bought_product_by_zip_code();
        let zip_codes = self
            .revenue_by_zip_code()
            .into_iter()
            .map(|(zip_code, revenue)| ZipCodeSummary {
                most_bought: popular
                    .get(&zip_code)
                    .map(|product| product.description().to_string()),
                zip_code,
                revenue,
            })
            .collect();

        CustomerStatistics {
            scenario: self.name.clone(),
            open_time: self.open_time,
            closing_time: self.closing_time,
            customers: self.customers.len(),
            total_items: self.total_number_of_items(),
            products: self.products.len(),
            zip_codes,
        }
    }

    /// SHA256 fingerprint of this scenario together with a server line-up
    ///
    /// Customer ids are left out: they never influence a run, and customers
    /// built in code carry random ones.
    pub fn fingerprint(&self, config: &SimulatorConfig) -> Result<String, SimulationError> {
        let mut file = self.to_file();
        for record in &mut file.customers {
            record.id = None;
        }
        compute_config_hash(&(file, config))
    }

    fn to_file(&self) -> ScenarioFile {
        ScenarioFile {
            name: self.name.clone(),
            open_time: self.open_time,
            closing_time: self.closing_time,
            products: self.products.values().cloned().collect(),
            customers: self.customers.iter().map(CustomerRecord::from).collect(),
        }
    }
}

impl CustomerRecord {
    fn into_customer(self, index: usize) -> Result<WorkloadCustomer, CatalogError> {
        let id = self.id.unwrap_or_else(|| format!("cust_{:05}", index));

        let customer = if self.purchases.is_empty() {
            WorkloadCustomer::checked(self.arrival_time, self.item_count.unwrap_or(0))?
                .with_group_key(self.zip_code)
        } else {
            let purchases = self
                .purchases
                .into_iter()
                .map(|record| Purchase::checked(record.product, record.count))
                .collect::<Result<Vec<_>, _>>()?;
            WorkloadCustomer::checked_from_purchases(self.arrival_time, self.zip_code, purchases)?
        };
        Ok(customer.with_id(id))
    }
}

impl From<&WorkloadCustomer> for CustomerRecord {
    fn from(customer: &WorkloadCustomer) -> Self {
        let purchases: Vec<PurchaseRecord> = customer
            .purchases()
            .iter()
            .map(|purchase| PurchaseRecord {
                product: purchase.product_code().to_string(),
                count: i64::from(purchase.count()),
            })
            .collect();
        let item_count = purchases
            .is_empty()
            .then(|| i64::from(customer.item_count()));

        Self {
            id: Some(customer.id().to_string()),
            arrival_time: customer.arrival_time(),
            zip_code: customer.group_key().to_string(),
            purchases,
            item_count,
        }
    }
}
