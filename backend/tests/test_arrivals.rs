//! Synthetic arrival tests

use checkout_simulator_core_rs::arrivals::{random_zip_code, ArrivalConfig, ArrivalGenerator};
use checkout_simulator_core_rs::{ClockTime, Product, RngManager, WorkloadCustomer};

fn shelf() -> Vec<Product> {
    vec![
        Product::new("A1", "Apples", 0.40),
        Product::new("B2", "Bread", 2.10),
        Product::new("C3", "Cheese", 4.75),
        Product::new("D4", "Dates", 3.20),
    ]
}

fn generate(seed: u64, num_customers: usize, average_items: u32) -> Vec<WorkloadCustomer> {
    let mut generator = ArrivalGenerator::new(ArrivalConfig {
        num_customers,
        average_items,
    });
    generator.generate(
        &shelf(),
        ClockTime::from_hms(8, 0, 0),
        ClockTime::from_hms(20, 0, 0),
        &mut RngManager::new(seed),
    )
}

#[test]
fn test_same_seed_same_customers() {
    let a = generate(2024, 100, 6);
    let b = generate(2024, 100, 6);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.id(), y.id());
        assert_eq!(x.arrival_time(), y.arrival_time());
        assert_eq!(x.item_count(), y.item_count());
        assert_eq!(x.purchases(), y.purchases());
    }
}

#[test]
fn test_different_seed_different_customers() {
    let a = generate(1, 50, 6);
    let b = generate(2, 50, 6);
    let same = a
        .iter()
        .zip(&b)
        .filter(|(x, y)| x.arrival_time() == y.arrival_time())
        .count();
    assert!(same < 5);
}

#[test]
fn test_arrivals_stop_a_minute_before_closing() {
    let closing_window = ClockTime::from_hms(19, 59, 0);
    for customer in generate(11, 500, 3) {
        assert!(customer.arrival_time() >= ClockTime::from_hms(8, 0, 0));
        assert!(customer.arrival_time() < closing_window);
    }
}

#[test]
fn test_item_counts_follow_average() {
    let customers = generate(8, 4000, 5);
    let total: u64 = customers.iter().map(|c| u64::from(c.item_count())).sum();
    let mean = total as f64 / customers.len() as f64;
    // 1 + floor(19·u1·u2) averages about 5.3
    assert!((4.5..6.5).contains(&mean), "mean basket {}", mean);
    assert!(customers.iter().all(|c| (1..=20).contains(&c.item_count())));
}

#[test]
fn test_purchases_match_item_count() {
    for customer in generate(3, 200, 8) {
        let bought: u32 = customer.purchases().iter().map(|p| p.count()).sum();
        assert_eq!(bought, customer.item_count());
    }
}

#[test]
fn test_ids_continue_numbering() {
    let mut generator = ArrivalGenerator::new(ArrivalConfig {
        num_customers: 3,
        average_items: 2,
    })
    .starting_at(10);
    let customers = generator.generate(
        &[],
        ClockTime::from_hms(8, 0, 0),
        ClockTime::from_hms(9, 0, 0),
        &mut RngManager::new(1),
    );
    let ids: Vec<&str> = customers.iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["cust_00010", "cust_00011", "cust_00012"]);
}

#[test]
fn test_zip_codes_cover_five_districts() {
    let mut rng = RngManager::new(42);
    let mut districts: Vec<String> = (0..500).map(|_| random_zip_code(&mut rng)[..4].to_string()).collect();
    districts.sort();
    districts.dedup();
    assert_eq!(districts, vec!["1013", "1014", "1015", "1016", "1017"]);
}
