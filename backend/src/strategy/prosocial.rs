//! Prosocial strategy
//!
//! Approves any incoming offer that costs it nothing: as long as the slot
//! being surrendered is surplus, the requester's need is reason enough.
//! (The original arena's favours ledger, where such goodwill was repaid on
//! later days, is a strategy-evolution concern outside the exchange core.)

use crate::exchange::ExchangeOffer;
use crate::models::agent::Agent;
use crate::strategy::ExchangeStrategy;

/// Strategy that trades whenever doing so is harmless to itself
#[derive(Debug, Clone, Copy, Default)]
pub struct Prosocial;

impl ExchangeStrategy for Prosocial {
    fn consider_offer(&self, agent: &Agent, offer: &ExchangeOffer) -> bool {
        agent.unwanted_slots().contains(&offer.wanted_slot)
    }
}
