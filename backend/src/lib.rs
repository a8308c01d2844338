//! Slot Exchange Arena - Rust Engine
//!
//! Simulates decentralized allocation of scarce time slots among a
//! population of agents that repeatedly negotiate bilateral swaps, and
//! measures how close purely local pairwise exchanges converge to the
//! globally optimal allocation.
//!
//! # Architecture
//!
//! - **core**: Round/day time management
//! - **models**: Domain types (SlotPool, Agent, ArenaState, Event)
//! - **strategy**: Agent decision interface and behavioral variants
//! - **allocation**: Randomized initial allocation from the daily pool
//! - **exchange**: The four-phase advertise/request/consider/confirm round
//! - **metrics**: Satisfaction averages and the optimum bound
//! - **orchestrator**: Day loop, batch driver, checkpointing
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Requests and allocations are multisets; all matching counts multiplicity
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Within a round, each agent commits to at most one exchange
//! 4. Swaps move slot units, they never create or destroy them

// Module declarations
pub mod allocation;
pub mod core;
pub mod exchange;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod strategy;

// Re-exports for convenience
pub use crate::core::time::ExchangeClock;
pub use models::{
    agent::{Agent, AgentId, AgentType},
    event::{Event, EventLog},
    slot::{SlotPool, SlotType},
    state::ArenaState,
};
pub use orchestrator::{
    run_batch, AgentSatisfaction, Arena, ArenaConfig, BatchResult, DayAverages, DayResult,
    RoundResult, RunResult, SimulationError, StateSnapshot, TypeAverage,
};
pub use rng::RngManager;
pub use strategy::{strategy_for, ExchangeStrategy};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn slot_exchange_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyArena>()?;
    Ok(())
}
