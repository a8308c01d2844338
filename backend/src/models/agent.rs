//! Agent model
//!
//! Represents one participant in the slot exchange arena. Each agent has:
//! - A stable integer identity, immutable for the life of a run
//! - A behavioral type tag selecting its exchange strategy
//! - A request list of slot types desired for the current day (may repeat)
//! - An allocation list of slot types actually held (size ≤ request size)
//!
//! Per-round negotiation state (negotiated flag, incoming offer, approval)
//! deliberately does NOT live here: it is round-scoped and kept in
//! [`crate::exchange::RoundLedger`], reset at the start of every round.
//!
//! CRITICAL: Requests and allocations are multisets. All matching counts
//! multiplicity, never set membership — an agent requesting slot 7 twice is
//! only fully satisfied by holding two copies of slot 7.

use crate::models::slot::SlotType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable agent identifier, assigned contiguously from 1
pub type AgentId = u32;

/// Behavioral variant of an agent
///
/// The variant selects which exchange strategy implementation drives the
/// agent's decisions; the protocol itself is identical for all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// Approves only exchanges that raise its own satisfaction
    SelfInterested,
    /// Approves any request for a slot it does not need
    Prosocial,
}

impl AgentType {
    /// Human-readable label, used to organise exported results
    pub fn label(&self) -> &'static str {
        match self {
            AgentType::SelfInterested => "self_interested",
            AgentType::Prosocial => "prosocial",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One participant in the exchange arena
///
/// # Example
/// ```
/// use slot_exchange_core_rs::{Agent, AgentType};
///
/// let mut agent = Agent::new(1, AgentType::SelfInterested);
/// agent.begin_day(vec![3, 3, 7]);
/// agent.receive_allocation(vec![3, 9]);
///
/// // One of two requested 3s held, the 7 missing, the 9 unwanted.
/// assert!((agent.satisfaction() - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier, immutable
    id: AgentId,

    /// Behavioral variant, persists across days within a run
    agent_type: AgentType,

    /// Slot types requested for the current day (multiset, fixed size `S`)
    requested_slots: Vec<SlotType>,

    /// Slot types currently held (multiset, size ≤ `S`)
    allocated_slots: Vec<SlotType>,
}

impl Agent {
    /// Create a new agent with empty request and allocation lists
    pub fn new(id: AgentId, agent_type: AgentType) -> Self {
        Self {
            id,
            agent_type,
            requested_slots: Vec::new(),
            allocated_slots: Vec::new(),
        }
    }

    /// Recreate an agent from snapshot fields (for checkpoint restoration)
    pub fn from_snapshot(
        id: AgentId,
        agent_type: AgentType,
        requested_slots: Vec<SlotType>,
        allocated_slots: Vec<SlotType>,
    ) -> Self {
        Self {
            id,
            agent_type,
            requested_slots,
            allocated_slots,
        }
    }

    /// Get agent ID
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Get behavioral type tag
    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    /// Slot types requested for the current day
    pub fn requested_slots(&self) -> &[SlotType] {
        &self.requested_slots
    }

    /// Slot types currently held
    pub fn allocated_slots(&self) -> &[SlotType] {
        &self.allocated_slots
    }

    /// Start a new day: overwrite the request list and clear the allocation
    ///
    /// Identity and type persist; both day-scoped lists are replaced.
    pub fn begin_day(&mut self, requested: Vec<SlotType>) {
        self.requested_slots = requested;
        self.allocated_slots.clear();
    }

    /// Receive the day's initial allocation
    ///
    /// The allocation may be shorter than the request when the pool ran out
    /// (expected scarcity, not an error) and may contain repeated types.
    pub fn receive_allocation(&mut self, slots: Vec<SlotType>) {
        self.allocated_slots = slots;
    }

    /// Whether the agent currently holds at least one copy of `slot`
    pub fn holds(&self, slot: SlotType) -> bool {
        self.allocated_slots.contains(&slot)
    }

    /// Add one unit of `slot` to the allocation (swap inbound leg)
    pub fn add_slot(&mut self, slot: SlotType) {
        self.allocated_slots.push(slot);
    }

    /// Remove one unit of `slot` from the allocation (swap outbound leg)
    ///
    /// Returns true if a copy was held and removed, false otherwise.
    pub fn remove_slot(&mut self, slot: SlotType) -> bool {
        if let Some(pos) = self.allocated_slots.iter().position(|&s| s == slot) {
            self.allocated_slots.remove(pos);
            true
        } else {
            false
        }
    }

    /// Fraction of the requested multiset present in the allocation
    ///
    /// Counts multiplicity: a request of `[3, 3]` against an allocation of
    /// `[3]` scores 0.5. Always in `[0, 1]`; equals 1 exactly when the full
    /// requested multiset is a sub-multiset of the allocation. An empty
    /// request is trivially satisfied (the arena validates `S > 0` before
    /// any day runs, so this case never feeds an average).
    pub fn satisfaction(&self) -> f64 {
        if self.requested_slots.is_empty() {
            return 1.0;
        }

        let requested = slot_counts(&self.requested_slots);
        let allocated = slot_counts(&self.allocated_slots);

        let matched: usize = requested
            .iter()
            .map(|(slot, &want)| want.min(allocated.get(slot).copied().unwrap_or(0)))
            .sum();

        matched as f64 / self.requested_slots.len() as f64
    }

    /// Requested units not covered by the allocation (with multiplicity)
    ///
    /// These are the slot types the agent still wants to acquire.
    pub fn missing_slots(&self) -> Vec<SlotType> {
        multiset_difference(&self.requested_slots, &self.allocated_slots)
    }

    /// Allocated units in excess of the request (with multiplicity)
    ///
    /// These are the slot types the agent is willing to give up: releasing
    /// one of them cannot lower its satisfaction.
    pub fn unwanted_slots(&self) -> Vec<SlotType> {
        multiset_difference(&self.allocated_slots, &self.requested_slots)
    }
}

/// Count slot multiplicities
fn slot_counts(slots: &[SlotType]) -> HashMap<SlotType, usize> {
    let mut counts = HashMap::new();
    for &slot in slots {
        *counts.entry(slot).or_insert(0) += 1;
    }
    counts
}

/// Multiset difference `left − right`, preserving `left`'s ordering
fn multiset_difference(left: &[SlotType], right: &[SlotType]) -> Vec<SlotType> {
    let mut to_cancel = slot_counts(right);
    let mut difference = Vec::new();

    for &slot in left {
        match to_cancel.get_mut(&slot) {
            Some(count) if *count > 0 => *count -= 1,
            _ => difference.push(slot),
        }
    }
    difference
}
