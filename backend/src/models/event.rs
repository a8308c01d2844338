//! Event logging for simulation replay and auditing.
//!
//! This module defines the Event enum which captures all significant state
//! changes during a run. Events enable:
//! - Deterministic replay (re-run a day from its event trail)
//! - Debugging (understand which negotiation fell through and why)
//! - Auditing (verify swaps conserved slot units)
//! - Analysis (extract per-round exchange activity)
//!
//! # Event Types
//!
//! Events are categorised by protocol phase:
//! - **Day**: day start and initial allocation
//! - **Advertise**: agents publishing slots they would release
//! - **Request**: exchange offers delivered to advertisers
//! - **Consider**: approval or refusal of incoming offers
//! - **Confirm**: completed or dropped swaps
//! - **EOD**: end-of-day summary

use crate::models::agent::AgentId;
use crate::models::slot::SlotType;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
///
/// Round-scoped events carry the global round number (rounds count up
/// across days); day-scoped events carry the day number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A new day began with a freshly filled slot pool
    DayStarted { day: usize, pool_size: usize },

    /// An agent received its initial allocation for the day
    ///
    /// `granted` may be less than `requested` when the pool ran out.
    InitialAllocation {
        day: usize,
        agent_id: AgentId,
        requested: usize,
        granted: usize,
    },

    /// An agent posted slots on the advertising board
    Advertised {
        round: usize,
        agent_id: AgentId,
        slots: Vec<SlotType>,
    },

    /// A requester delivered an exchange offer to an advertiser
    ///
    /// Both parties are excluded from further negotiation this round from
    /// this moment, whatever the outcome.
    OfferDelivered {
        round: usize,
        requester: AgentId,
        advertiser: AgentId,
        wanted_slot: SlotType,
        offered_slot: SlotType,
    },

    /// An advertiser considered its incoming offer
    OfferConsidered {
        round: usize,
        advertiser: AgentId,
        approved: bool,
    },

    /// An approved offer passed both final re-checks and the swap executed
    SwapCompleted {
        round: usize,
        requester: AgentId,
        advertiser: AgentId,
        wanted_slot: SlotType,
        offered_slot: SlotType,
    },

    /// An approved offer failed a final re-check and was dropped unchanged
    SwapDropped {
        round: usize,
        requester: AgentId,
        advertiser: AgentId,
    },

    /// End-of-day summary after the last exchange round
    EndOfDay {
        day: usize,
        average_satisfaction: f64,
        optimum_bound: f64,
        swaps_completed: usize,
    },
}

/// Append-only log of simulation events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty event log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in logging order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Completed swaps logged for one round
    pub fn swaps_in_round(&self, round: usize) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::SwapCompleted { round: r, .. } if *r == round))
            .count()
    }
}
