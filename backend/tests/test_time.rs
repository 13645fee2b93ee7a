//! Tests for ClockTime
//!
//! Clock times are the only notion of time in the simulator: whole seconds
//! since midnight, parsed from and printed as HH:MM:SS.

use checkout_simulator_core_rs::{ClockTime, TimeError};

#[test]
fn test_from_hms_counts_seconds_from_midnight() {
    let time = ClockTime::from_hms(9, 30, 15);
    assert_eq!(time.seconds_from_midnight(), 9 * 3600 + 30 * 60 + 15);
    assert_eq!(ClockTime::from_seconds(34_215), time);
}

#[test]
fn test_ordering_follows_seconds() {
    let open = ClockTime::from_hms(8, 0, 0);
    let close = ClockTime::from_hms(20, 0, 0);
    assert!(open < close);
    assert_eq!(close.seconds_since(open), Some(12 * 3600));
    assert_eq!(open.seconds_since(close), None);
}

#[test]
fn test_plus_and_minus_seconds() {
    let time = ClockTime::from_hms(9, 59, 50);
    assert_eq!(time.plus_seconds(15), ClockTime::from_hms(10, 0, 5));
    assert_eq!(time.minus_seconds(50), ClockTime::from_hms(9, 59, 0));
    assert_eq!(ClockTime::MIDNIGHT.minus_seconds(1), ClockTime::MIDNIGHT);
}

#[test]
fn test_parse_and_display_agree() {
    for text in ["00:00:00", "08:05:09", "23:59:59"] {
        let time: ClockTime = text.parse().unwrap();
        assert_eq!(time.to_string(), text);
    }
}

#[test]
fn test_parse_rejects_out_of_range() {
    assert!(matches!(
        "25:00:00".parse::<ClockTime>(),
        Err(TimeError::InvalidClockTime(_))
    ));
    assert!(matches!(
        "12:61".parse::<ClockTime>(),
        Err(TimeError::InvalidClockTime(_))
    ));
}

#[test]
fn test_serde_uses_clock_strings() {
    let time = ClockTime::from_hms(17, 30, 0);
    let json = serde_json::to_string(&time).unwrap();
    assert_eq!(json, "\"17:30:00\"");

    let parsed: ClockTime = serde_json::from_str("\"07:45\"").unwrap();
    assert_eq!(parsed, ClockTime::from_hms(7, 45, 0));

    assert!(serde_json::from_str::<ClockTime>("\"later\"").is_err());
}
