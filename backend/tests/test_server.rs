//! CheckoutServer tests
//!
//! Time advance, waiting-time accounting and statistics of a single server,
//! driven by hand without the simulation driver.

use checkout_simulator_core_rs::{
    CheckoutServer, ClockTime, ServerError, ServerState, ServiceTimes, WorkloadCustomer,
};

fn at(h: u32, m: u32, s: u32) -> ClockTime {
    ClockTime::from_hms(h, m, s)
}

#[test]
fn test_two_customers_drained_over_ten_minutes() {
    let open = at(9, 0, 0);
    let mut customers = vec![WorkloadCustomer::new(open, 3), WorkloadCustomer::new(open, 3)];
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);

    assert!(server.admit(0, &mut customers[0]));
    assert!(server.admit(1, &mut customers[1]));
    server.advance_until(at(9, 10, 0), &mut customers).unwrap();

    assert_eq!(server.total_service_seconds(), 52);
    assert_eq!(server.total_idle_seconds(), 548);
    assert_eq!(server.served_count(), 2);
    assert_eq!(customers[0].actual_waiting_time(), 0);
    assert_eq!(customers[1].actual_waiting_time(), 26);
    assert_eq!(customers[0].actual_service_duration(), 26);
    assert_eq!(server.max_wait_seconds(), 26);
    assert_eq!(server.average_waiting_time(), 13.0);
    assert_eq!(server.completion_order(), &[0, 1]);
    assert_eq!(server.state(), ServerState::Idle);
}

#[test]
fn test_service_carries_over_between_advances() {
    let open = at(9, 0, 0);
    let mut customers = vec![WorkloadCustomer::new(open, 10)];
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);
    server.admit(0, &mut customers[0]);

    server.advance_until(at(9, 0, 10), &mut customers).unwrap();
    assert_eq!(server.state(), ServerState::Serving);
    assert_eq!(server.in_service(), Some(0));
    assert_eq!(server.remaining_service_time(), 30);
    assert_eq!(server.elapsed_service_time(), 10);

    server.advance_until(at(9, 0, 40), &mut customers).unwrap();
    assert_eq!(server.state(), ServerState::Idle);
    assert_eq!(server.remaining_service_time(), 0);
    assert_eq!(server.total_service_seconds(), 40);
    assert_eq!(server.total_idle_seconds(), 0);
}

#[test]
fn test_split_advance_matches_single_advance() {
    let open = at(9, 0, 0);
    let build = || {
        vec![
            WorkloadCustomer::new(open, 4),
            WorkloadCustomer::new(open, 9),
            WorkloadCustomer::new(open, 1),
        ]
    };

    let mut single_customers = build();
    let mut single = CheckoutServer::fifo("A");
    single.restart(open);
    for i in 0..3 {
        single.admit(i, &mut single_customers[i]);
    }
    single.advance_until(at(9, 5, 0), &mut single_customers).unwrap();

    let mut split_customers = build();
    let mut split = CheckoutServer::fifo("A");
    split.restart(open);
    for i in 0..3 {
        split.admit(i, &mut split_customers[i]);
    }
    for step in [7, 29, 30, 31, 64, 120, 300] {
        split
            .advance_until(open.plus_seconds(step), &mut split_customers)
            .unwrap();
    }

    assert_eq!(split.total_idle_seconds(), single.total_idle_seconds());
    assert_eq!(split.total_service_seconds(), single.total_service_seconds());
    assert_eq!(split.total_wait_seconds(), single.total_wait_seconds());
    for (a, b) in split_customers.iter().zip(&single_customers) {
        assert_eq!(a.actual_waiting_time(), b.actual_waiting_time());
    }
}

#[test]
fn test_clock_regression_is_rejected() {
    let mut customers: Vec<WorkloadCustomer> = Vec::new();
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(at(9, 0, 0));
    server.advance_until(at(9, 30, 0), &mut customers).unwrap();

    let err = server.advance_until(at(9, 29, 59), &mut customers).unwrap_err();
    assert_eq!(
        err,
        ServerError::ClockRegression {
            server: "Till 1".to_string(),
            current: at(9, 30, 0),
            target: at(9, 29, 59),
        }
    );
    assert_eq!(server.clock(), at(9, 30, 0));
}

#[test]
fn test_advance_to_current_instant_is_noop() {
    let open = at(9, 0, 0);
    let mut customers = vec![WorkloadCustomer::new(open, 2)];
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);
    server.admit(0, &mut customers[0]);

    server.advance_until(open, &mut customers).unwrap();
    assert_eq!(server.clock(), open);
    assert_eq!(server.queue().len(), 1);
    assert_eq!(server.in_service(), None);
}

#[test]
fn test_zero_item_customer_not_admitted() {
    let open = at(9, 0, 0);
    let mut customer = WorkloadCustomer::new(open, 0);
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);

    assert!(!server.admit(0, &mut customer));
    assert_eq!(server.queue_length(), 0);
    assert_eq!(server.served_count(), 0);
}

#[test]
fn test_unknown_customer_index_is_reported() {
    let open = at(9, 0, 0);
    let mut outsider = WorkloadCustomer::new(open, 2);
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);
    server.admit(5, &mut outsider);

    let mut customers: Vec<WorkloadCustomer> = Vec::new();
    let result = server.advance_until(at(9, 1, 0), &mut customers);
    assert!(matches!(result, Err(ServerError::UnknownCustomer { index: 5, .. })));
}

#[test]
fn test_restart_resets_everything() {
    let open = at(9, 0, 0);
    let mut customers = vec![WorkloadCustomer::new(open, 6), WorkloadCustomer::new(open, 6)];
    let mut server = CheckoutServer::priority("Express", 5);
    server.restart(open);
    server.admit(0, &mut customers[0]);
    server.admit(1, &mut customers[1]);
    server.advance_until(at(9, 0, 20), &mut customers).unwrap();

    server.restart(at(10, 0, 0));
    assert_eq!(server.clock(), at(10, 0, 0));
    assert_eq!(server.queue_length(), 0);
    assert_eq!(server.remaining_service_time(), 0);
    assert_eq!(server.total_idle_seconds(), 0);
    assert_eq!(server.max_queue_length(), 0);
    assert_eq!(server.served_count(), 0);
    assert_eq!(server.total_wait_seconds(), 0);
    assert_eq!(server.max_wait_seconds(), 0);
    assert_eq!(server.total_service_seconds(), 0);
    assert!(server.completion_order().is_empty());
}

#[test]
fn test_max_queue_length_counts_customer_at_till() {
    let open = at(9, 0, 0);
    let mut customers: Vec<WorkloadCustomer> =
        (0..3).map(|_| WorkloadCustomer::new(open, 5)).collect();
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);

    server.admit(0, &mut customers[0]);
    server.advance_until(at(9, 0, 1), &mut customers).unwrap();
    server.admit(1, &mut customers[1]);
    server.admit(2, &mut customers[2]);

    assert_eq!(server.queue_length(), 3);
    assert_eq!(server.max_queue_length(), 3);
}

#[test]
fn test_custom_service_times() {
    let times = ServiceTimes {
        interaction_seconds: 5,
        per_item_seconds: 1,
    };
    let server = CheckoutServer::fifo("Fast").with_service_times(times);
    assert_eq!(server.expected_service_time(10), 15);
    assert_eq!(server.expected_service_time(0), 0);
}

#[test]
fn test_discount_overtime_saturates_idle_time() {
    let open = at(9, 0, 0);
    let mut customers = vec![WorkloadCustomer::new(open, 100)];
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);
    server.admit(0, &mut customers[0]);
    server.advance_until(at(9, 5, 0), &mut customers).unwrap();

    // 220s of service, 80s idle; a 120s overtime window must not go negative
    assert_eq!(server.total_idle_seconds(), 80);
    server.discount_overtime(120);
    assert_eq!(server.total_idle_seconds(), 0);
    assert_eq!(server.clock(), at(9, 3, 0));
}

#[test]
fn test_time_is_conserved_mid_service() {
    let open = at(9, 0, 0);
    let mut customers = vec![
        WorkloadCustomer::new(open, 4),
        WorkloadCustomer::new(open.plus_seconds(100), 30),
    ];
    let mut server = CheckoutServer::fifo("Till 1");
    server.restart(open);

    server.admit(0, &mut customers[0]);
    server.advance_until(open.plus_seconds(100), &mut customers).unwrap();
    server.admit(1, &mut customers[1]);

    for step in [130, 150, 171, 300] {
        let now = open.plus_seconds(step);
        server.advance_until(now, &mut customers).unwrap();
        assert_eq!(
            server.total_service_seconds() + server.total_idle_seconds() + server.elapsed_service_time(),
            now.seconds_since(open).unwrap()
        );
    }
}
