//! Exchange Strategy Module
//!
//! This module defines the decision interface the exchange protocol calls
//! into. The protocol itself never decides anything on an agent's behalf:
//! what to request for the day, which held slots to unlock, which advert to
//! pursue, which slot to offer in return, and whether to approve an
//! incoming offer are all delegated to the agent's strategy.
//!
//! # Strategy Interface
//!
//! All behavioral variants implement the `ExchangeStrategy` trait:
//!
//! ```rust
//! use slot_exchange_core_rs::strategy::ExchangeStrategy;
//! use slot_exchange_core_rs::exchange::ExchangeOffer;
//! use slot_exchange_core_rs::Agent;
//!
//! struct Agreeable;
//!
//! impl ExchangeStrategy for Agreeable {
//!     fn consider_offer(&self, _agent: &Agent, _offer: &ExchangeOffer) -> bool {
//!         true
//!     }
//! }
//! ```
//!
//! Strategies are swappable per agent without changing the protocol; the
//! agent's type tag selects the implementation via [`strategy_for`].
//!
//! Available variants:
//! 1. **SelfInterested**: approves only exchanges that raise its own
//!    satisfaction
//! 2. **Prosocial**: approves any request for a slot it does not need

use crate::exchange::{Advert, ExchangeOffer};
use crate::models::agent::{Agent, AgentId, AgentType};
use crate::models::slot::SlotType;
use crate::rng::RngManager;

mod prosocial;
mod self_interested;

pub use prosocial::Prosocial;
pub use self_interested::SelfInterested;

/// A requester's choice of board entry to pursue: one advertiser and one
/// of that advertiser's published slot types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvertSelection {
    pub advertiser: AgentId,
    pub slot: SlotType,
}

/// Decision interface the exchange protocol calls into
///
/// Default implementations cover the behavior shared by all variants:
/// uniform random day requests, unlocking every surplus slot, pursuing the
/// first advert that covers a missing slot, and offering a uniformly
/// chosen surplus slot in return. Variants differ in how they judge an
/// incoming offer.
pub trait ExchangeStrategy: Send + Sync {
    /// Slot types to request for the day (multiset of size `slots_per_agent`)
    ///
    /// Draws uniformly from `[1, slot_universe]` with repeats allowed, so
    /// scarcity of popular types is modelled faithfully.
    fn requested_slots(
        &self,
        slots_per_agent: usize,
        slot_universe: u32,
        rng: &mut RngManager,
    ) -> Vec<SlotType> {
        (0..slots_per_agent)
            .map(|_| rng.range(1, slot_universe as i64 + 1) as SlotType)
            .collect()
    }

    /// Held slots the agent is willing to release this round
    ///
    /// Releasing an unlocked slot must not be able to lower the agent's
    /// satisfaction; the default unlocks exactly the surplus allocation.
    fn unlock_candidates(&self, agent: &Agent) -> Vec<SlotType> {
        agent.unwanted_slots()
    }

    /// Select at most one board entry to pursue, or None to sit out
    ///
    /// `open_adverts` contains only entries from agents still free to
    /// negotiate this round (never the agent's own advert). The default
    /// takes the first entry covering a missing slot — the board order is
    /// already a random permutation, so "first" carries no bias — and only
    /// pursues at all while it has a surplus slot to give in return.
    fn choose_advert(&self, agent: &Agent, open_adverts: &[Advert]) -> Option<AdvertSelection> {
        if agent.unwanted_slots().is_empty() {
            return None;
        }

        let missing = agent.missing_slots();
        for advert in open_adverts {
            if let Some(&slot) = advert.slots.iter().find(|slot| missing.contains(slot)) {
                return Some(AdvertSelection {
                    advertiser: advert.advertiser,
                    slot,
                });
            }
        }
        None
    }

    /// Pick the slot offered in exchange: uniform random among the agent's
    /// surplus slots, or None if it has nothing to give
    fn choose_offered_slot(&self, agent: &Agent, rng: &mut RngManager) -> Option<SlotType> {
        let unwanted = agent.unwanted_slots();
        if unwanted.is_empty() {
            None
        } else {
            Some(unwanted[rng.index(unwanted.len())])
        }
    }

    /// Judge an incoming offer; the only effect of the answer is the
    /// approval flag read back in the confirm phase
    fn consider_offer(&self, agent: &Agent, offer: &ExchangeOffer) -> bool;
}

/// Select the strategy implementation for an agent type
pub fn strategy_for(agent_type: AgentType) -> Box<dyn ExchangeStrategy> {
    match agent_type {
        AgentType::SelfInterested => Box::new(SelfInterested),
        AgentType::Prosocial => Box::new(Prosocial),
    }
}
