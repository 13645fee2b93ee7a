//! checkout-sim - command line front end for the checkout simulator
//!
//! Usage:
//!   checkout-sim run --scenario day.json --config tills.json --config express.json
//!   checkout-sim run --scenario day.json --config tills.json --random-customers 500 --seed 7 --json
//!   checkout-sim generate --scenario day.json --customers 500 --output busy-day.json
//!
//! Logs go to stderr; reports go to stdout. Set RUST_LOG=debug to trace
//! every admission.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use checkout_simulator_core_rs::{
    ArrivalConfig, RngManager, Scenario, SimulationDriver, SimulationReport, SimulatorConfig,
};

/// Checkout Simulator - compare checkout line-ups over a simulated day
#[derive(Parser, Debug)]
#[command(name = "checkout-sim", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one or more server configurations over a scenario
    Run {
        /// Scenario JSON file (opening hours, products, customers)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Server configuration JSON file; repeat to compare line-ups
        #[arg(short, long, required = true)]
        config: Vec<PathBuf>,

        /// Add this many random customers before running
        #[arg(long, default_value_t = 0)]
        random_customers: usize,

        /// Mean basket size of random customers
        #[arg(long, default_value_t = 5)]
        average_items: u32,

        /// Seed for random customers
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Print reports as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Add random customers to a scenario and save the result
    Generate {
        /// Scenario JSON file to start from
        #[arg(short, long)]
        scenario: PathBuf,

        /// Number of customers to add
        #[arg(long)]
        customers: usize,

        /// Mean basket size
        #[arg(long, default_value_t = 5)]
        average_items: u32,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match Args::parse().command {
        Command::Run {
            scenario,
            config,
            random_customers,
            average_items,
            seed,
            json,
        } => {
            let mut scenario = load_scenario(&scenario)?;
            if random_customers > 0 {
                let mut rng = RngManager::new(seed);
                scenario.add_random_customers(
                    ArrivalConfig {
                        num_customers: random_customers,
                        average_items,
                    },
                    &mut rng,
                );
            }
            if !json {
                println!("{}\n", scenario.customer_statistics());
            }

            for path in &config {
                let config = load_config(path)?;
                let report = run_once(&scenario, &config)
                    .with_context(|| format!("simulation with '{}' failed", path.display()))?;
                if json {
                    println!("{}", report.to_json().context("failed to serialize report")?);
                } else {
                    println!("{}\n", report);
                }
            }
        }
        Command::Generate {
            scenario,
            customers,
            average_items,
            seed,
            output,
        } => {
            let mut scenario = load_scenario(&scenario)?;
            let mut rng = RngManager::new(seed);
            scenario.add_random_customers(
                ArrivalConfig {
                    num_customers: customers,
                    average_items,
                },
                &mut rng,
            );
            scenario
                .save(&output)
                .with_context(|| format!("failed to write '{}'", output.display()))?;
            info!(
                output = %output.display(),
                customers = scenario.customers().len(),
                "scenario written"
            );
        }
    }
    Ok(())
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    Scenario::load(path).with_context(|| format!("failed to load scenario '{}'", path.display()))
}

fn load_config(path: &Path) -> Result<SimulatorConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    let mut config = SimulatorConfig::from_json(&json)
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    if config.label.is_empty() {
        config.label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(config)
}

/// Run `config` on a fresh copy of the scenario's customers
fn run_once(scenario: &Scenario, config: &SimulatorConfig) -> Result<SimulationReport> {
    let fingerprint = scenario.fingerprint(config)?;
    let mut driver = SimulationDriver::new(config, scenario.opening_hours())?;
    let mut customers = scenario.customers().to_vec();
    driver.run(&mut customers)?;

    info!(label = %config.label, %fingerprint, "configuration simulated");
    Ok(SimulationReport::new(
        scenario.name(),
        &config.label,
        *driver.hours(),
        fingerprint,
        driver.servers(),
    ))
}
