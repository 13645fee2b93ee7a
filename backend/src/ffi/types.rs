//! Conversions between simulator types and Python objects

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::catalog::CatalogError;
use crate::orchestrator::SimulationError;
use crate::report::ServerStatistics;

pub fn catalog_err(e: CatalogError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid scenario: {}", e))
}

pub fn simulation_err(e: SimulationError) -> PyErr {
    match e {
        SimulationError::InvalidConfig(_) | SimulationError::EmptyServerSet => {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
        }
        _ => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
            "Simulation failed: {}",
            e
        )),
    }
}

/// One dict per server, keys named after the `ServerStatistics` fields
pub fn server_statistics_to_py(py: Python, servers: &[ServerStatistics]) -> PyResult<Py<PyList>> {
    let list = PyList::empty_bound(py);
    for stats in servers {
        let dict = PyDict::new_bound(py);
        dict.set_item("name", &stats.name)?;
        dict.set_item("policy", &stats.policy)?;
        dict.set_item("served_count", stats.served_count)?;
        dict.set_item("average_wait_seconds", stats.average_wait_seconds)?;
        dict.set_item("max_wait_seconds", stats.max_wait_seconds)?;
        dict.set_item("max_queue_length", stats.max_queue_length)?;
        dict.set_item("average_service_seconds", stats.average_service_seconds)?;
        dict.set_item("total_idle_seconds", stats.total_idle_seconds)?;
        list.append(dict)?;
    }
    Ok(list.unbind())
}
