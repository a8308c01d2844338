//! Checkpoint - Save/Load Arena State
//!
//! Enables serialization and deserialization of complete arena state for
//! pause/resume functionality, and hashes configurations so results and
//! snapshots can be paired with the exact parameters that produced them.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored arena continues the exact random sequence
//!   of the original (the snapshot carries the RNG state).
//! - **Capacity Conservation**: no slot type is held by more agents than
//!   the pool ever contained copies.
//! - **Config Matching**: state can only be loaded with a matching config.

use crate::models::agent::{Agent, AgentType};
use crate::models::slot::SlotType;
use crate::orchestrator::engine::{ArenaConfig, SimulationError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete arena state snapshot
///
/// Captures everything necessary to resume a run from an arbitrary point:
/// clock position, RNG state, and the full population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Global round position
    pub current_round: usize,

    /// Day position
    pub current_day: usize,

    /// RNG state at time of snapshot (CRITICAL for determinism)
    pub rng_state: u64,

    /// All agent states, in ID order
    pub agents: Vec<AgentSnapshot>,

    /// SHA256 hash of the originating config (for validation)
    pub config_hash: String,
}

/// Agent state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: u32,
    pub agent_type: AgentType,
    pub requested_slots: Vec<SlotType>,
    pub allocated_slots: Vec<SlotType>,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        AgentSnapshot {
            id: agent.id(),
            agent_type: agent.agent_type(),
            requested_slots: agent.requested_slots().to_vec(),
            allocated_slots: agent.allocated_slots().to_vec(),
        }
    }
}

impl From<AgentSnapshot> for Agent {
    fn from(snapshot: AgentSnapshot) -> Self {
        Agent::from_snapshot(
            snapshot.id,
            snapshot.agent_type,
            snapshot.requested_slots,
            snapshot.allocated_slots,
        )
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of a config
///
/// Serialization of [`ArenaConfig`] is order-stable (struct fields, no
/// maps), so the JSON form hashes deterministically.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let json = serde_json::to_string(config).map_err(|e| {
        SimulationError::SerializationError(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validate snapshot integrity against its configuration
///
/// Checks critical invariants:
/// - Population shape (contiguous IDs, types matching the config)
/// - Request/allocation sizes within day limits
/// - Slot identifiers inside the universe
/// - Per-type holder counts within pool capacity
pub fn validate_snapshot(
    snapshot: &StateSnapshot,
    config: &ArenaConfig,
) -> Result<(), SimulationError> {
    // 1. Population shape
    if snapshot.agents.len() != config.agent_types.len() {
        return Err(SimulationError::StateValidationError(format!(
            "Population size mismatch: snapshot {}, config {}",
            snapshot.agents.len(),
            config.agent_types.len()
        )));
    }
    for (index, agent) in snapshot.agents.iter().enumerate() {
        if agent.id as usize != index + 1 {
            return Err(SimulationError::StateValidationError(format!(
                "Non-contiguous agent ID {} at index {}",
                agent.id, index
            )));
        }
        if agent.agent_type != config.agent_types[index] {
            return Err(SimulationError::StateValidationError(format!(
                "Agent {} type mismatch: snapshot {}, config {}",
                agent.id, agent.agent_type, config.agent_types[index]
            )));
        }

        // 2. Day limits: requests are empty before the first day, fixed-size after
        if !agent.requested_slots.is_empty()
            && agent.requested_slots.len() != config.slots_per_agent
        {
            return Err(SimulationError::StateValidationError(format!(
                "Agent {} requests {} slots, expected {} or none",
                agent.id,
                agent.requested_slots.len(),
                config.slots_per_agent
            )));
        }
        if agent.allocated_slots.len() > config.slots_per_agent {
            return Err(SimulationError::StateValidationError(format!(
                "Agent {} holds {} slots, more than slots_per_agent {}",
                agent.id,
                agent.allocated_slots.len(),
                config.slots_per_agent
            )));
        }

        // 3. Slot identifiers inside the universe
        for &slot in agent.requested_slots.iter().chain(&agent.allocated_slots) {
            if slot == 0 || slot > config.slot_universe {
                return Err(SimulationError::StateValidationError(format!(
                    "Agent {} references slot {} outside universe [1, {}]",
                    agent.id, slot, config.slot_universe
                )));
            }
        }
    }

    // 4. Capacity conservation across the population
    let mut holders: HashMap<SlotType, usize> = HashMap::new();
    for agent in &snapshot.agents {
        for &slot in &agent.allocated_slots {
            *holders.entry(slot).or_insert(0) += 1;
        }
    }
    for (slot, count) in holders {
        if count > config.slot_capacity as usize {
            return Err(SimulationError::StateValidationError(format!(
                "Slot {} held {} times, exceeding capacity {}",
                slot, count, config.slot_capacity
            )));
        }
    }

    Ok(())
}
