//! Report tests
//!
//! Statistics gathered from real runs, JSON output and table rendering.

use checkout_simulator_core_rs::{
    CheckoutPolicy, ClockTime, OpeningHours, ServerConfig, SimulationDriver, SimulationReport,
    SimulatorConfig, WorkloadCustomer,
};

fn at(h: u32, m: u32, s: u32) -> ClockTime {
    ClockTime::from_hms(h, m, s)
}

fn run_report(customers: &mut [WorkloadCustomer]) -> SimulationReport {
    let config = SimulatorConfig {
        label: "mixed".to_string(),
        servers: vec![
            ServerConfig::new("Till 1", CheckoutPolicy::Fifo),
            ServerConfig::new("Express", CheckoutPolicy::Priority { threshold: 5 }),
        ],
        ..SimulatorConfig::default()
    };
    let hours = OpeningHours::new(at(9, 0, 0), at(10, 0, 0));
    let mut driver = SimulationDriver::new(&config, hours).unwrap();
    driver.run(customers).unwrap();
    SimulationReport::new("morning", &config.label, *driver.hours(), "f00d", driver.servers())
}

#[test]
fn test_report_reflects_run() {
    // Three equal customers at opening: Till 1 takes two, Express one
    let mut customers = vec![
        WorkloadCustomer::new(at(9, 0, 0), 5),
        WorkloadCustomer::new(at(9, 0, 0), 5),
        WorkloadCustomer::new(at(9, 0, 0), 5),
    ];
    let report = run_report(&mut customers);

    let till = &report.servers[0];
    assert_eq!(till.name, "Till 1");
    assert_eq!(till.served_count, 2);
    assert_eq!(till.max_wait_seconds, 30);
    assert_eq!(till.average_wait_seconds, 15.0);
    assert_eq!(till.max_queue_length, 2);
    assert_eq!(till.total_idle_seconds, 3600 - 60);

    let express = &report.servers[1];
    assert_eq!(express.served_count, 1);
    assert_eq!(express.average_wait_seconds, 0.0);

    assert_eq!(report.overall.served_count, 3);
    assert_eq!(report.overall.average_wait_seconds, 7.5);
    assert_eq!(report.overall.weighted_average_wait_seconds, 10.0);
    assert_eq!(report.overall.max_wait_seconds, 30);
    assert_eq!(report.overall.total_idle_seconds, 2 * 3600 - 90);
}

#[test]
fn test_weighted_service_average_counts_customers() {
    // Till 1 serves one 60s basket, Express two 24s baskets
    let mut customers = vec![
        WorkloadCustomer::new(at(9, 0, 0), 20),
        WorkloadCustomer::new(at(9, 0, 0), 2),
        WorkloadCustomer::new(at(9, 0, 0), 2),
    ];
    let report = run_report(&mut customers);

    assert_eq!(report.servers[0].served_count, 1);
    assert_eq!(report.servers[1].served_count, 2);
    assert_eq!(report.overall.average_service_seconds, (60.0 + 24.0) / 2.0);
    assert_eq!(report.overall.weighted_average_service_seconds, 108.0 / 3.0);
}

#[test]
fn test_report_json_shape() {
    let mut customers = vec![WorkloadCustomer::new(at(9, 30, 0), 2)];
    let report = run_report(&mut customers);
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(value["scenario"], "morning");
    assert_eq!(value["label"], "mixed");
    assert_eq!(value["fingerprint"], "f00d");
    assert_eq!(value["hours"]["open_time"], "09:00:00");
    assert_eq!(value["hours"]["overtime_seconds"], 900);
    assert_eq!(value["servers"].as_array().unwrap().len(), 2);
    assert_eq!(value["servers"][1]["policy"], "Priority(<=5)");
    assert_eq!(value["overall"]["served_count"], 1);
}

#[test]
fn test_empty_day_reports_zero_averages() {
    let report = run_report(&mut []);
    for server in &report.servers {
        assert_eq!(server.served_count, 0);
        assert_eq!(server.average_wait_seconds, 0.0);
        assert_eq!(server.average_service_seconds, 0.0);
        assert_eq!(server.total_idle_seconds, 3600);
    }
    assert_eq!(report.overall.weighted_average_wait_seconds, 0.0);
}

#[test]
fn test_table_has_header_servers_and_overall() {
    let mut customers = vec![WorkloadCustomer::new(at(9, 0, 0), 5)];
    let table = run_report(&mut customers).to_string();
    let lines: Vec<&str> = table.lines().collect();

    assert!(lines[0].contains("morning"));
    assert!(lines[1].contains("f00d"));
    assert!(lines[2].starts_with("Server"));
    assert!(lines[3].starts_with("Till 1"));
    assert!(lines[4].starts_with("Express"));
    assert!(lines[5].starts_with("Overall"));
}
