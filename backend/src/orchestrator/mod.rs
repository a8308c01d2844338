//! Arena orchestration: day loop, batch driver, checkpointing

pub mod batch;
pub mod checkpoint;
pub mod engine;

pub use batch::{run_batch, BatchResult, DayAverages};
pub use checkpoint::{compute_config_hash, validate_snapshot, AgentSnapshot, StateSnapshot};
pub use engine::{
    AgentSatisfaction, Arena, ArenaConfig, DayResult, RoundResult, RunResult, SimulationError,
    TypeAverage,
};
