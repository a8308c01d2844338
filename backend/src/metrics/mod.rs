//! Satisfaction metrics
//!
//! Scores an allocation state three ways: the population (or per-type)
//! average of individual satisfactions, and the optimum bound — the upper
//! bound on average satisfaction achievable by any reallocation of the
//! same supply.
//!
//! # Critical Invariant
//!
//! The optimum bound matches pooled request units against pooled allocated
//! units as multisets. It answers "could the existing supply cover this
//! much aggregate demand under perfect reshuffling", NOT "can a feasible
//! swap sequence reach it", and it is deliberately not a per-agent
//! bipartite matching. Downstream comparisons rely on this exact
//! semantics; do not "improve" it.

use crate::models::agent::{Agent, AgentType};
use crate::models::slot::SlotType;
use std::collections::HashMap;

/// Arithmetic mean of individual satisfactions over the whole population
///
/// Returns 0.0 for an empty population (the arena validates a non-empty
/// population before any day runs).
pub fn average_satisfaction(population: &[Agent]) -> f64 {
    mean(population.iter().map(Agent::satisfaction))
}

/// Arithmetic mean of individual satisfactions over one agent type
///
/// Returns 0.0 when no agent of the type exists.
pub fn average_satisfaction_for(population: &[Agent], agent_type: AgentType) -> f64 {
    mean(
        population
            .iter()
            .filter(|agent| agent.agent_type() == agent_type)
            .map(Agent::satisfaction),
    )
}

/// Upper bound on average satisfaction under perfect reallocation
///
/// Pools every requested unit and every allocated unit across the
/// population, then greedily covers requests: each request unit consumes
/// one allocated unit of the same type if any remains, so no allocated
/// unit satisfies two requests. The bound is covered requests over total
/// requests, in `[0, 1]`.
pub fn optimum_bound(population: &[Agent]) -> f64 {
    let mut supply: HashMap<SlotType, usize> = HashMap::new();
    let mut total_requested = 0usize;
    let mut satisfied = 0usize;

    for agent in population {
        for &slot in agent.allocated_slots() {
            *supply.entry(slot).or_insert(0) += 1;
        }
        total_requested += agent.requested_slots().len();
    }

    for agent in population {
        for &slot in agent.requested_slots() {
            if let Some(count) = supply.get_mut(&slot) {
                if *count > 0 {
                    *count -= 1;
                    satisfied += 1;
                }
            }
        }
    }

    if total_requested == 0 {
        return 0.0;
    }
    satisfied as f64 / total_requested as f64
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
