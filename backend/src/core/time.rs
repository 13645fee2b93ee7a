//! Virtual time for the simulation
//!
//! Servers and customers live on a single simulated day. Every instant is a
//! whole number of seconds since midnight; no operation ever consults the
//! real wall clock.
//!
//! Instants past midnight are representable (closing time plus the overtime
//! window can run over), they are simply displayed with an hour of 24 or more.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Seconds in one simulated day
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Errors produced when parsing clock times
#[derive(Debug, Error, PartialEq)]
pub enum TimeError {
    #[error("Invalid clock time '{0}', expected HH:MM:SS or HH:MM")]
    InvalidClockTime(String),
}

/// An instant of the simulated day, in seconds since midnight
///
/// # Example
/// ```
/// use checkout_simulator_core_rs::ClockTime;
///
/// let opening: ClockTime = "09:00:00".parse().unwrap();
/// assert_eq!(opening, ClockTime::from_hms(9, 0, 0));
/// assert_eq!(opening.plus_seconds(90).to_string(), "09:01:30");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u64);

impl ClockTime {
    /// Start of the simulated day
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Create an instant from hour, minute and second
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Self {
        Self(u64::from(hour) * 3600 + u64::from(minute) * 60 + u64::from(second))
    }

    /// Create an instant from raw seconds since midnight
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Seconds elapsed since midnight
    pub fn seconds_from_midnight(&self) -> u64 {
        self.0
    }

    /// Instant `seconds` later, clamped at `u64::MAX`
    pub fn plus_seconds(self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Instant `seconds` earlier, clamped at midnight
    pub fn minus_seconds(self, seconds: u64) -> Self {
        Self(self.0.saturating_sub(seconds))
    }

    /// Seconds from `earlier` to `self`, or `None` if `earlier` is later
    ///
    /// # Example
    /// ```
    /// use checkout_simulator_core_rs::ClockTime;
    ///
    /// let a = ClockTime::from_hms(9, 0, 0);
    /// let b = ClockTime::from_hms(9, 10, 0);
    /// assert_eq!(b.seconds_since(a), Some(600));
    /// assert_eq!(a.seconds_since(b), None);
    /// ```
    pub fn seconds_since(self, earlier: ClockTime) -> Option<u64> {
        self.0.checked_sub(earlier.0)
    }

    /// Convert to a chrono time of day; `None` once past midnight
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        let seconds = u32::try_from(self.0).ok()?;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self(u64::from(time.num_seconds_from_midnight()))
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(ClockTime::from)
            .map_err(|_| TimeError::InvalidClockTime(s.to_string()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
