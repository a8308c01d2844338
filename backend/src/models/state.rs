//! Arena State
//!
//! Holds the agent population for one simulation run. The population (and
//! each agent's identity and type) persists across days within the run;
//! request and allocation lists are overwritten each day.
//!
//! # Critical Invariants
//!
//! 1. **Contiguous IDs**: agent IDs are exactly `1..=population_size`,
//!    stored in ID order, so lookup is positional and deterministic.
//! 2. **Unit Conservation**: exchange rounds move slot units between
//!    agents, never create or destroy them — the total allocated unit
//!    count only changes at initial allocation.
//! 3. **Capacity**: no slot type is held by more than `capacity` agents,
//!    because the pool only ever contained `capacity` copies of it.

use crate::models::agent::{Agent, AgentId};
use crate::models::slot::SlotType;
use std::collections::HashMap;

/// Complete population state of one simulation run
///
/// # Example
///
/// ```
/// use slot_exchange_core_rs::{Agent, AgentType, ArenaState};
///
/// let state = ArenaState::new(vec![
///     Agent::new(1, AgentType::SelfInterested),
///     Agent::new(2, AgentType::Prosocial),
/// ]);
/// assert_eq!(state.num_agents(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ArenaState {
    /// All agents, stored in ID order (agent with ID `i` at index `i - 1`)
    population: Vec<Agent>,
}

impl ArenaState {
    /// Create a new arena state from a population
    ///
    /// # Panics
    ///
    /// Panics if agent IDs are not exactly `1..=len` in order. The arena
    /// constructor assigns IDs this way; direct construction must follow
    /// the same scheme.
    pub fn new(population: Vec<Agent>) -> Self {
        for (index, agent) in population.iter().enumerate() {
            assert!(
                agent.id() as usize == index + 1,
                "agent IDs must be contiguous from 1, got {} at index {}",
                agent.id(),
                index
            );
        }
        Self { population }
    }

    /// Get reference to an agent by ID
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.population.get(id as usize - 1)
    }

    /// Get mutable reference to an agent by ID
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.population.get_mut(id as usize - 1)
    }

    /// Get the full population in ID order
    pub fn population(&self) -> &[Agent] {
        &self.population
    }

    /// Get the full population mutably, in ID order
    pub fn population_mut(&mut self) -> &mut [Agent] {
        &mut self.population
    }

    /// Number of agents in the run
    pub fn num_agents(&self) -> usize {
        self.population.len()
    }

    /// Total allocated slot units across the population
    ///
    /// Used for invariant checking: this count is fixed by initial
    /// allocation and must survive any number of exchange rounds.
    pub fn total_allocated_units(&self) -> usize {
        self.population
            .iter()
            .map(|agent| agent.allocated_slots().len())
            .sum()
    }

    /// Holders per slot type across the population
    ///
    /// Used for capacity invariant checking (no type held more than
    /// `capacity` times).
    pub fn allocated_counts(&self) -> HashMap<SlotType, usize> {
        let mut counts = HashMap::new();
        for agent in &self.population {
            for &slot in agent.allocated_slots() {
                *counts.entry(slot).or_insert(0) += 1;
            }
        }
        counts
    }
}
