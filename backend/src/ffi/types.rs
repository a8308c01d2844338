//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::agent::AgentType;
use crate::orchestrator::{ArenaConfig, DayResult, RoundResult, RunResult, TypeAverage};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with a clear error message
fn extract_required<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<T> {
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field with a default value if missing
fn extract_with_default<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
    default: T,
) -> PyResult<T> {
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Parse an agent type name ("self_interested" or "prosocial")
fn parse_agent_type(name: &str) -> PyResult<AgentType> {
    match name {
        "self_interested" => Ok(AgentType::SelfInterested),
        "prosocial" => Ok(AgentType::Prosocial),
        other => Err(PyValueError::new_err(format!(
            "Unknown agent type '{}', expected 'self_interested' or 'prosocial'",
            other
        ))),
    }
}

/// Convert a Python dict to an ArenaConfig
///
/// # Errors
///
/// Returns PyValueError if required fields are missing, type conversions
/// fail, or an agent type name is unknown. Range validation happens in
/// `Arena::new`, not here.
pub fn parse_arena_config(py_config: &Bound<'_, PyDict>) -> PyResult<ArenaConfig> {
    let num_days: usize = extract_required(py_config, "num_days")?;
    let rounds_per_day: usize = extract_required(py_config, "rounds_per_day")?;
    let slots_per_agent: usize = extract_required(py_config, "slots_per_agent")?;
    let slot_universe: u32 = extract_required(py_config, "slot_universe")?;
    let slot_capacity: u32 = extract_required(py_config, "slot_capacity")?;
    let rng_seed: u64 = extract_with_default(py_config, "rng_seed", 0)?;

    let type_names: Vec<String> = extract_required(py_config, "agent_types")?;
    let agent_types = type_names
        .iter()
        .map(|name| parse_agent_type(name))
        .collect::<PyResult<Vec<AgentType>>>()?;

    Ok(ArenaConfig {
        num_days,
        rounds_per_day,
        slots_per_agent,
        slot_universe,
        slot_capacity,
        rng_seed,
        agent_types,
    })
}

// ========================================================================
// Result Converters
// ========================================================================

fn type_averages_to_py<'py>(
    py: Python<'py>,
    averages: &[TypeAverage],
) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty_bound(py);
    for average in averages {
        let entry = PyDict::new_bound(py);
        entry.set_item("agent_type", average.agent_type.label())?;
        entry.set_item("satisfaction", average.satisfaction)?;
        list.append(entry)?;
    }
    Ok(list)
}

fn round_result_to_py<'py>(py: Python<'py>, round: &RoundResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("round", round.round)?;
    dict.set_item("adverts_posted", round.adverts_posted)?;
    dict.set_item("offers_delivered", round.offers_delivered)?;
    dict.set_item("swaps_completed", round.swaps_completed)?;
    dict.set_item("type_averages", type_averages_to_py(py, &round.type_averages)?)?;
    Ok(dict)
}

/// Convert a DayResult to a Python dict
pub fn day_result_to_py(py: Python<'_>, result: &DayResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("day", result.day)?;
    dict.set_item(
        "random_baseline_satisfaction",
        result.random_baseline_satisfaction,
    )?;
    dict.set_item(
        "optimum_bound_satisfaction",
        result.optimum_bound_satisfaction,
    )?;

    let per_agent = PyList::empty_bound(py);
    for satisfaction in &result.per_agent_satisfaction {
        let entry = PyDict::new_bound(py);
        entry.set_item("agent_id", satisfaction.agent_id)?;
        entry.set_item("agent_type", satisfaction.agent_type.label())?;
        entry.set_item("satisfaction", satisfaction.satisfaction)?;
        per_agent.append(entry)?;
    }
    dict.set_item("per_agent_satisfaction", per_agent)?;

    let rounds = PyList::empty_bound(py);
    for round in &result.rounds {
        rounds.append(round_result_to_py(py, round)?)?;
    }
    dict.set_item("rounds", rounds)?;

    dict.set_item(
        "end_of_day_type_averages",
        type_averages_to_py(py, &result.end_of_day_type_averages)?,
    )?;

    Ok(dict.unbind())
}

/// Convert a RunResult to a Python dict
pub fn run_result_to_py(py: Python<'_>, result: &RunResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("run_id", &result.run_id)?;
    dict.set_item("rng_seed", result.rng_seed)?;
    dict.set_item("config_hash", &result.config_hash)?;

    let days = PyList::empty_bound(py);
    for day in &result.days {
        days.append(day_result_to_py(py, day)?)?;
    }
    dict.set_item("days", days)?;

    Ok(dict.unbind())
}
