//! PyO3 wrapper around a scenario plus a server line-up
//!
//! # Example (from Python)
//!
//! ```python
//! from checkout_simulator_core_rs import CheckoutSimulator
//!
//! sim = CheckoutSimulator(open("day.json").read(), open("tills.json").read())
//! report = json.loads(sim.run())
//! print(report["overall"]["weighted_average_wait_seconds"])
//! ```

use pyo3::prelude::*;
use pyo3::types::PyList;

use super::types::{catalog_err, server_statistics_to_py, simulation_err};
use crate::catalog::Scenario;
use crate::orchestrator::{SimulationDriver, SimulatorConfig};
use crate::report::SimulationReport;

#[pyclass(name = "CheckoutSimulator")]
pub struct PyCheckoutSimulator {
    scenario: Scenario,
    config: SimulatorConfig,
    last_report: Option<SimulationReport>,
}

#[pymethods]
impl PyCheckoutSimulator {
    /// Parse a scenario and a configuration, both JSON
    ///
    /// Raises ValueError on malformed input or an invalid line-up.
    #[new]
    fn new(scenario_json: &str, config_json: &str) -> PyResult<Self> {
        let scenario = Scenario::from_json(scenario_json).map_err(catalog_err)?;
        let config = SimulatorConfig::from_json(config_json).map_err(simulation_err)?;
        config.validate().map_err(simulation_err)?;
        Ok(Self {
            scenario,
            config,
            last_report: None,
        })
    }

    /// Run the day and return the report as JSON
    fn run(&mut self) -> PyResult<String> {
        let hours = self
            .scenario
            .opening_hours()
            .with_overtime(self.config.overtime_seconds);
        let fingerprint = self.scenario.fingerprint(&self.config).map_err(simulation_err)?;

        let mut driver = SimulationDriver::new(&self.config, hours).map_err(simulation_err)?;
        let mut customers = self.scenario.customers().to_vec();
        driver.run(&mut customers).map_err(simulation_err)?;

        let report = SimulationReport::new(
            self.scenario.name(),
            &self.config.label,
            *driver.hours(),
            fingerprint,
            driver.servers(),
        );
        let json = report.to_json().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Report serialization failed: {}", e))
        })?;
        self.last_report = Some(report);
        Ok(json)
    }

    /// SHA256 of scenario plus configuration
    fn fingerprint(&self) -> PyResult<String> {
        self.scenario.fingerprint(&self.config).map_err(simulation_err)
    }

    /// Per-server statistics of the last run (empty before `run`)
    fn servers(&self, py: Python) -> PyResult<Py<PyList>> {
        match &self.last_report {
            Some(report) => server_statistics_to_py(py, &report.servers),
            None => Ok(PyList::empty_bound(py).unbind()),
        }
    }

    /// Customer statistics table of the scenario
    fn customer_statistics(&self) -> String {
        self.scenario.customer_statistics().to_string()
    }
}
