//! PyO3 wrapper for Orchestrator
//!
//! # Example (from Python)
//!
//! ```python
//! from fraud_sim_core_rs import TransactionSimulator
//!
//! sim = TransactionSimulator('{"rng_seed": 42, "num_users": 100}')
//! rows = sim.take(1000)
//! print(rows[0]["timestamp"], rows[0]["label"])
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::event_to_py;
use crate::orchestrator::{Orchestrator, OrchestratorConfig};

#[pyclass(name = "TransactionSimulator", unsendable)]
pub struct PyTransactionSimulator {
    inner: Orchestrator,
}

#[pymethods]
impl PyTransactionSimulator {
    /// Create a simulator from an optional JSON config string.
    ///
    /// Raises ValueError for malformed configuration.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => OrchestratorConfig::from_json_str(json)
                .map_err(|e| PyValueError::new_err(format!("Invalid config: {}", e)))?,
            None => OrchestratorConfig::default(),
        };
        let inner = Orchestrator::new(config)
            .map_err(|e| PyValueError::new_err(format!("Failed to create simulator: {}", e)))?;
        Ok(Self { inner })
    }

    /// Next transaction as a dict
    fn next_event<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let event = self
            .inner
            .next_event()
            .map_err(|e| PyRuntimeError::new_err(format!("Simulation failed: {}", e)))?;
        event_to_py(py, &event)
    }

    /// Next `count` transactions as a list of dicts
    fn take<'py>(&mut self, py: Python<'py>, count: usize) -> PyResult<Bound<'py, PyList>> {
        let events = Orchestrator::take(&mut self.inner, count)
            .map_err(|e| PyRuntimeError::new_err(format!("Simulation failed: {}", e)))?;
        let list = PyList::empty_bound(py);
        for event in &events {
            list.append(event_to_py(py, event)?)?;
        }
        Ok(list)
    }

    fn current_time(&self) -> Option<u64> {
        self.inner.current_time()
    }

    fn events_emitted(&self) -> u64 {
        self.inner.events_emitted()
    }

    fn config_hash(&self) -> String {
        self.inner.config_hash().to_string()
    }

    /// JSON snapshot of the complete simulation state
    fn save_state(&self) -> PyResult<String> {
        self.inner
            .save_state()
            .map_err(|e| PyRuntimeError::new_err(format!("Save failed: {}", e)))
    }
}
