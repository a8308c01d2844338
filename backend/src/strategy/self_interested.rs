//! Self-interested strategy
//!
//! Approves an incoming offer only when the trade is a strict improvement:
//! the slot received must cover one of the agent's unmet requests, and the
//! slot surrendered must be surplus.

use crate::exchange::ExchangeOffer;
use crate::models::agent::Agent;
use crate::strategy::ExchangeStrategy;

/// Strategy that trades purely for its own gain
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfInterested;

impl ExchangeStrategy for SelfInterested {
    fn consider_offer(&self, agent: &Agent, offer: &ExchangeOffer) -> bool {
        agent.unwanted_slots().contains(&offer.wanted_slot)
            && agent.missing_slots().contains(&offer.offered_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::AgentType;

    fn offer(wanted: u32, offered: u32) -> ExchangeOffer {
        ExchangeOffer {
            requester: 9,
            wanted_slot: wanted,
            offered_slot: offered,
        }
    }

    #[test]
    fn test_approves_strict_improvement() {
        let mut agent = Agent::new(1, AgentType::SelfInterested);
        agent.begin_day(vec![2, 3]);
        agent.receive_allocation(vec![3, 7]);

        // Gives up surplus 7, receives missing 2.
        assert!(SelfInterested.consider_offer(&agent, &offer(7, 2)));
    }

    #[test]
    fn test_refuses_unhelpful_slot() {
        let mut agent = Agent::new(1, AgentType::SelfInterested);
        agent.begin_day(vec![2, 3]);
        agent.receive_allocation(vec![3, 7]);

        // Slot 8 covers no unmet request.
        assert!(!SelfInterested.consider_offer(&agent, &offer(7, 8)));
    }

    #[test]
    fn test_refuses_giving_up_needed_slot() {
        let mut agent = Agent::new(1, AgentType::SelfInterested);
        agent.begin_day(vec![2, 3]);
        agent.receive_allocation(vec![3, 7]);

        // Slot 3 is needed, whatever comes back.
        assert!(!SelfInterested.consider_offer(&agent, &offer(3, 2)));
    }
}
