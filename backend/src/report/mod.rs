//! Run reports
//!
//! Statistics are snapshots taken after a run; they own their data and can
//! be serialized to JSON or rendered as a plain-text table.

use crate::core::time::ClockTime;
use crate::models::CheckoutServer;
use crate::orchestrator::OpeningHours;
use serde::Serialize;
use std::fmt;

/// Statistics of one checkout server after a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerStatistics {
    pub name: String,
    pub policy: String,
    pub served_count: usize,
    pub average_wait_seconds: f64,
    pub max_wait_seconds: u64,
    pub max_queue_length: usize,
    pub average_service_seconds: f64,
    pub total_idle_seconds: u64,
    pub total_wait_seconds: u64,
    pub total_service_seconds: u64,
}

impl From<&CheckoutServer> for ServerStatistics {
    fn from(server: &CheckoutServer) -> Self {
        Self {
            name: server.name().to_string(),
            policy: server.policy().to_string(),
            served_count: server.served_count(),
            average_wait_seconds: server.average_waiting_time(),
            max_wait_seconds: server.max_wait_seconds(),
            max_queue_length: server.max_queue_length(),
            average_service_seconds: server.average_service_time(),
            total_idle_seconds: server.total_idle_seconds(),
            total_wait_seconds: server.total_wait_seconds(),
            total_service_seconds: server.total_service_seconds(),
        }
    }
}

/// Aggregates over all servers of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStatistics {
    pub served_count: usize,

    /// Mean of the per-server averages; every server counts once
    pub average_wait_seconds: f64,

    /// Total wait over total customers
    pub weighted_average_wait_seconds: f64,

    pub max_wait_seconds: u64,
    pub max_queue_length: usize,
    pub average_service_seconds: f64,

    /// Total service over total customers
    pub weighted_average_service_seconds: f64,

    pub total_idle_seconds: u64,
}

impl OverallStatistics {
    pub fn from_servers(servers: &[ServerStatistics]) -> Self {
        let served_count: usize = servers.iter().map(|s| s.served_count).sum();
        let total_wait: u64 = servers.iter().map(|s| s.total_wait_seconds).sum();
        let total_service: u64 = servers.iter().map(|s| s.total_service_seconds).sum();
        let per_customer = |total: u64| {
            if served_count == 0 {
                0.0
            } else {
                total as f64 / served_count as f64
            }
        };

        Self {
            served_count,
            average_wait_seconds: mean(servers.iter().map(|s| s.average_wait_seconds)),
            weighted_average_wait_seconds: per_customer(total_wait),
            max_wait_seconds: servers.iter().map(|s| s.max_wait_seconds).max().unwrap_or(0),
            max_queue_length: servers.iter().map(|s| s.max_queue_length).max().unwrap_or(0),
            average_service_seconds: mean(servers.iter().map(|s| s.average_service_seconds)),
            weighted_average_service_seconds: per_customer(total_service),
            total_idle_seconds: servers.iter().map(|s| s.total_idle_seconds).sum(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Outcome of running one configuration over one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub scenario: String,
    pub label: String,
    pub hours: OpeningHours,
    pub fingerprint: String,
    pub servers: Vec<ServerStatistics>,
    pub overall: OverallStatistics,
}

impl SimulationReport {
    pub fn new(
        scenario: impl Into<String>,
        label: impl Into<String>,
        hours: OpeningHours,
        fingerprint: impl Into<String>,
        servers: &[CheckoutServer],
    ) -> Self {
        let servers: Vec<ServerStatistics> = servers.iter().map(ServerStatistics::from).collect();
        let overall = OverallStatistics::from_servers(&servers);
        Self {
            scenario: scenario.into(),
            label: label.into(),
            hours,
            fingerprint: fingerprint.into(),
            servers,
            overall,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulation '{}' [{}] {} - {}",
            self.scenario, self.label, self.hours.open_time, self.hours.closing_time
        )?;
        writeln!(f, "Fingerprint: {}", self.fingerprint)?;
        writeln!(
            f,
            "{:<16} {:<14} {:>7} {:>9} {:>9} {:>7} {:>9} {:>9}",
            "Server", "Policy", "Served", "AvgWait", "MaxWait", "MaxQ", "AvgSvc", "Idle"
        )?;
        for s in &self.servers {
            writeln!(
                f,
                "{:<16} {:<14} {:>7} {:>9.1} {:>9} {:>7} {:>9.1} {:>9}",
                s.name,
                s.policy,
                s.served_count,
                s.average_wait_seconds,
                s.max_wait_seconds,
                s.max_queue_length,
                s.average_service_seconds,
                s.total_idle_seconds
            )?;
        }
        let o = &self.overall;
        writeln!(
            f,
            "{:<16} {:<14} {:>7} {:>9.1} {:>9} {:>7} {:>9.1} {:>9}",
            "Overall",
            "",
            o.served_count,
            o.average_wait_seconds,
            o.max_wait_seconds,
            o.max_queue_length,
            o.average_service_seconds,
            o.total_idle_seconds
        )?;
        write!(
            f,
            "Weighted average wait: {:.1}s, service: {:.1}s",
            o.weighted_average_wait_seconds, o.weighted_average_service_seconds
        )
    }
}

/// Revenue and favourite product of one zip code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZipCodeSummary {
    pub zip_code: String,
    pub revenue: f64,
    pub most_bought: Option<String>,
}

/// Summary of a scenario's customer stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStatistics {
    pub scenario: String,
    pub open_time: ClockTime,
    pub closing_time: ClockTime,
    pub customers: usize,
    pub total_items: u64,
    pub products: usize,
    pub zip_codes: Vec<ZipCodeSummary>,
}

impl CustomerStatistics {
    pub fn total_revenue(&self) -> f64 {
        self.zip_codes.iter().map(|zip| zip.revenue).sum()
    }
}

impl fmt::Display for CustomerStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Customer statistics of '{}' between {} and {}:",
            self.scenario, self.open_time, self.closing_time
        )?;
        writeln!(
            f,
            "{} customers bought {} items from {} products",
            self.customers, self.total_items, self.products
        )?;
        writeln!(f, "{:<8} {:>12}  {}", "Zip", "Revenue", "Most bought")?;
        for zip in &self.zip_codes {
            writeln!(
                f,
                "{:<8} {:>12.2}  {}",
                zip.zip_code,
                zip.revenue,
                zip.most_bought.as_deref().unwrap_or("-")
            )?;
        }
        write!(f, "{:<8} {:>12.2}", "Total", self.total_revenue())
    }
}
