//! PyO3 wrapper for the Arena
//!
//! This module provides the Python interface to the Rust arena, the entry
//! point for the external analysis and visualization tooling.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{day_result_to_py, parse_arena_config, run_result_to_py};
use crate::metrics;
use crate::orchestrator::Arena;

/// Python wrapper for the Rust Arena
///
/// # Example (from Python)
///
/// ```python
/// from slot_exchange_core_rs import Arena
///
/// config = {
///     "num_days": 50,
///     "rounds_per_day": 200,
///     "slots_per_agent": 4,
///     "slot_universe": 24,
///     "slot_capacity": 16,
///     "rng_seed": 12345,
///     "agent_types": ["self_interested"] * 48 + ["prosocial"] * 48,
/// }
///
/// arena = Arena.new(config)
/// day = arena.run_day()
/// print(day["random_baseline_satisfaction"], day["optimum_bound_satisfaction"])
/// ```
#[pyclass(name = "Arena")]
pub struct PyArena {
    inner: Arena,
}

#[pymethods]
impl PyArena {
    /// Create a new arena from a configuration dict
    ///
    /// # Errors
    ///
    /// Raises ValueError for missing/invalid fields and RuntimeError when
    /// structural validation fails (zero parameters, empty population).
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_arena_config(config)?;

        let inner = Arena::new(rust_config).map_err(|e| {
            PyRuntimeError::new_err(format!("Failed to create arena: {}", e))
        })?;

        Ok(PyArena { inner })
    }

    /// Execute one simulated day and return its metrics as a dict
    fn run_day(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let result = self
            .inner
            .run_day()
            .map_err(|e| PyRuntimeError::new_err(format!("Day execution failed: {}", e)))?;

        day_result_to_py(py, &result)
    }

    /// Execute all remaining configured days and return the run result
    fn run(&mut self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let result = self
            .inner
            .run()
            .map_err(|e| PyRuntimeError::new_err(format!("Run execution failed: {}", e)))?;

        run_result_to_py(py, &result)
    }

    /// Get current simulated day
    fn current_day(&self) -> usize {
        self.inner.current_day()
    }

    /// Get current global exchange round
    fn current_round(&self) -> usize {
        self.inner.current_round()
    }

    /// Get population size
    fn num_agents(&self) -> usize {
        self.inner.state().num_agents()
    }

    /// Get one agent's current satisfaction, or None if the ID is unknown
    fn agent_satisfaction(&self, agent_id: u32) -> Option<f64> {
        self.inner
            .state()
            .agent(agent_id)
            .map(|agent| agent.satisfaction())
    }

    /// Get the population's current average satisfaction
    fn average_satisfaction(&self) -> f64 {
        metrics::average_satisfaction(self.inner.state().population())
    }

    /// Get the optimum bound for the current allocation state
    fn optimum_bound(&self) -> f64 {
        metrics::optimum_bound(self.inner.state().population())
    }
}
