//! One exchange round: the four-phase negotiation protocol
//!
//! States run `RESET → ADVERTISE → REQUEST → CONSIDER → CONFIRM → done`.
//! Transitions are unconditional and totally ordered; there is no branching
//! between phases, only per-agent branching within a phase. Every phase is
//! a single bounded pass over the population in a fresh random permutation,
//! so a round can neither deadlock nor starve.
//!
//! Failure semantics: an unselected advertisement, an unapproved offer, and
//! a failed final re-check are all silent no-ops. "No exchange happened for
//! this agent this round" is an outcome, not an error.
//!
//! # Protocol
//!
//! ```text
//! RESET      fresh RoundLedger: all flags and offer records cleared
//! ADVERTISE  each agent may publish slots it would release
//! REQUEST    each free agent may deliver one offer to one free advertiser;
//!            both parties are then excluded for the rest of the round
//! CONSIDER   each advertiser holding an offer sets its approval flag
//! CONFIRM    approved offers re-validate both holdings, then swap
//! ```

use crate::exchange::{Advert, AdvertBoard, ExchangeOffer, RoundLedger};
use crate::models::event::{Event, EventLog};
use crate::models::state::ArenaState;
use crate::rng::RngManager;
use crate::strategy::ExchangeStrategy;

/// Exchange activity of one completed round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Agents that published a non-empty advert
    pub adverts_posted: usize,

    /// Offers delivered to advertisers
    pub offers_delivered: usize,

    /// Offers that were approved and passed both final re-checks
    pub swaps_completed: usize,
}

/// Run one exchange round over the whole population
///
/// `strategies` is positionally parallel to the population (strategy of
/// agent `i` at index `i - 1`). `round` is the global round number used
/// for event logging.
pub fn run_round(
    state: &mut ArenaState,
    strategies: &[Box<dyn ExchangeStrategy>],
    rng: &mut RngManager,
    event_log: &mut EventLog,
    round: usize,
) -> RoundOutcome {
    debug_assert_eq!(state.num_agents(), strategies.len());

    // RESET: a fresh ledger clears every per-round flag and offer record.
    let mut ledger = RoundLedger::new(state.num_agents());
    let mut board = AdvertBoard::new();

    advertise_phase(state, strategies, rng, &mut board, event_log, round);
    let offers_delivered =
        request_phase(state, strategies, rng, &board, &mut ledger, event_log, round);
    consider_phase(state, strategies, rng, &mut ledger, event_log, round);
    let swaps_completed = confirm_phase(state, rng, &mut ledger, event_log, round);

    RoundOutcome {
        adverts_posted: board.len(),
        offers_delivered,
        swaps_completed,
    }
}

/// ADVERTISE: agents publish the slots they are willing to release
fn advertise_phase(
    state: &ArenaState,
    strategies: &[Box<dyn ExchangeStrategy>],
    rng: &mut RngManager,
    board: &mut AdvertBoard,
    event_log: &mut EventLog,
    round: usize,
) {
    for index in rng.visit_order(state.num_agents()) {
        let agent = &state.population()[index];
        let unlocked = strategies[index].unlock_candidates(agent);
        if unlocked.is_empty() {
            continue;
        }

        event_log.log(Event::Advertised {
            round,
            agent_id: agent.id(),
            slots: unlocked.clone(),
        });
        board.post(Advert {
            advertiser: agent.id(),
            slots: unlocked,
        });
    }
}

/// REQUEST: each still-free agent may pursue one advert
///
/// Tie-break is first-come by the randomized visit order. The board shown
/// to each agent is filtered to advertisers that are still free, so an
/// offer always lands on a free target and a second incoming offer cannot
/// occur. Delivery marks both parties negotiated immediately, whatever the
/// later outcome.
fn request_phase(
    state: &ArenaState,
    strategies: &[Box<dyn ExchangeStrategy>],
    rng: &mut RngManager,
    board: &AdvertBoard,
    ledger: &mut RoundLedger,
    event_log: &mut EventLog,
    round: usize,
) -> usize {
    let mut offers_delivered = 0;

    for index in rng.visit_order(state.num_agents()) {
        let agent = &state.population()[index];
        if ledger.is_negotiated(agent.id()) {
            continue;
        }

        let open_adverts: Vec<Advert> = board
            .entries()
            .iter()
            .filter(|advert| {
                advert.advertiser != agent.id() && !ledger.is_negotiated(advert.advertiser)
            })
            .cloned()
            .collect();

        let Some(selection) = strategies[index].choose_advert(agent, &open_adverts) else {
            // Selecting nothing leaves the agent free for a future round.
            continue;
        };
        let Some(offered_slot) = strategies[index].choose_offered_slot(agent, rng) else {
            continue;
        };

        let offer = ExchangeOffer {
            requester: agent.id(),
            wanted_slot: selection.slot,
            offered_slot,
        };

        ledger.mark_negotiated(agent.id());
        ledger.mark_negotiated(selection.advertiser);
        ledger.deliver(selection.advertiser, offer.clone());
        offers_delivered += 1;

        event_log.log(Event::OfferDelivered {
            round,
            requester: offer.requester,
            advertiser: selection.advertiser,
            wanted_slot: offer.wanted_slot,
            offered_slot: offer.offered_slot,
        });
    }

    offers_delivered
}

/// CONSIDER: advertisers holding an offer set their approval flag
///
/// No side effects beyond the flag.
fn consider_phase(
    state: &ArenaState,
    strategies: &[Box<dyn ExchangeStrategy>],
    rng: &mut RngManager,
    ledger: &mut RoundLedger,
    event_log: &mut EventLog,
    round: usize,
) {
    for index in rng.visit_order(state.num_agents()) {
        let agent = &state.population()[index];
        let Some(offer) = ledger.incoming(agent.id()).cloned() else {
            continue;
        };

        let approved = strategies[index].consider_offer(agent, &offer);
        ledger.set_approval(agent.id(), approved);

        event_log.log(Event::OfferConsidered {
            round,
            advertiser: agent.id(),
            approved,
        });
    }
}

/// CONFIRM: execute approved offers that survive both final re-checks
///
/// Each side re-validates that it still holds the slot it is about to give
/// up. Nothing else in the round can have invalidated that, but the
/// invariant is checked, not assumed; a failed re-check drops the offer
/// with no state change. Offer records and approval flags are cleared
/// whether or not the swap completed.
fn confirm_phase(
    state: &mut ArenaState,
    rng: &mut RngManager,
    ledger: &mut RoundLedger,
    event_log: &mut EventLog,
    round: usize,
) -> usize {
    let mut swaps_completed = 0;

    for index in rng.visit_order(state.num_agents()) {
        let advertiser_id = state.population()[index].id();
        let Some(offer) = ledger.take_incoming(advertiser_id) else {
            continue;
        };
        if !ledger.is_approved(advertiser_id) {
            continue;
        }
        ledger.clear_approval(advertiser_id);

        let requester_index = offer.requester as usize - 1;
        let advertiser_holds = state.population()[index].holds(offer.wanted_slot);
        let requester_holds = state.population()[requester_index].holds(offer.offered_slot);

        if advertiser_holds && requester_holds {
            execute_swap(state, index, requester_index, &offer);
            swaps_completed += 1;

            event_log.log(Event::SwapCompleted {
                round,
                requester: offer.requester,
                advertiser: advertiser_id,
                wanted_slot: offer.wanted_slot,
                offered_slot: offer.offered_slot,
            });
        } else {
            event_log.log(Event::SwapDropped {
                round,
                requester: offer.requester,
                advertiser: advertiser_id,
            });
        }
    }

    swaps_completed
}

/// Execute one swap, atomic from the perspective of the round
///
/// The advertiser's advertised slot moves to the requester and the
/// requester's offered slot moves to the advertiser. Both holdings were
/// just re-validated, so both removals must succeed.
fn execute_swap(
    state: &mut ArenaState,
    advertiser_index: usize,
    requester_index: usize,
    offer: &ExchangeOffer,
) {
    {
        let advertiser = &mut state.population_mut()[advertiser_index];
        let held = advertiser.remove_slot(offer.wanted_slot);
        debug_assert!(held, "advertiser holding re-validated before swap");
        advertiser.add_slot(offer.offered_slot);
    }
    {
        let requester = &mut state.population_mut()[requester_index];
        let held = requester.remove_slot(offer.offered_slot);
        debug_assert!(held, "requester holding re-validated before swap");
        requester.add_slot(offer.wanted_slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::{Agent, AgentType};

    fn two_agent_state() -> ArenaState {
        let mut a = Agent::new(1, AgentType::SelfInterested);
        a.begin_day(vec![1]);
        a.receive_allocation(vec![2]);

        let mut b = Agent::new(2, AgentType::SelfInterested);
        b.begin_day(vec![2]);
        b.receive_allocation(vec![1]);

        ArenaState::new(vec![a, b])
    }

    #[test]
    fn test_confirm_executes_approved_offer() {
        let mut state = two_agent_state();
        let mut rng = RngManager::new(3);
        let mut event_log = EventLog::new();

        // Agent 2 asked agent 1 for slot 2, offering slot 1.
        let mut ledger = RoundLedger::new(2);
        ledger.deliver(
            1,
            ExchangeOffer {
                requester: 2,
                wanted_slot: 2,
                offered_slot: 1,
            },
        );
        ledger.set_approval(1, true);

        let swaps = confirm_phase(&mut state, &mut rng, &mut ledger, &mut event_log, 0);

        assert_eq!(swaps, 1);
        assert_eq!(state.agent(1).unwrap().allocated_slots(), &[1]);
        assert_eq!(state.agent(2).unwrap().allocated_slots(), &[2]);
    }

    #[test]
    fn test_failed_recheck_leaves_both_parties_untouched() {
        let mut state = two_agent_state();
        let mut rng = RngManager::new(3);
        let mut event_log = EventLog::new();

        // The requester no longer holds the offered slot: re-check fails.
        let mut ledger = RoundLedger::new(2);
        ledger.deliver(
            1,
            ExchangeOffer {
                requester: 2,
                wanted_slot: 2,
                offered_slot: 9,
            },
        );
        ledger.set_approval(1, true);

        let swaps = confirm_phase(&mut state, &mut rng, &mut ledger, &mut event_log, 0);

        assert_eq!(swaps, 0);
        assert_eq!(state.agent(1).unwrap().allocated_slots(), &[2]);
        assert_eq!(state.agent(2).unwrap().allocated_slots(), &[1]);
        assert!(event_log
            .events()
            .iter()
            .any(|event| matches!(event, Event::SwapDropped { .. })));
    }

    #[test]
    fn test_unapproved_offer_is_silent_noop() {
        let mut state = two_agent_state();
        let mut rng = RngManager::new(3);
        let mut event_log = EventLog::new();

        let mut ledger = RoundLedger::new(2);
        ledger.deliver(
            1,
            ExchangeOffer {
                requester: 2,
                wanted_slot: 2,
                offered_slot: 1,
            },
        );
        // No approval set.

        let swaps = confirm_phase(&mut state, &mut rng, &mut ledger, &mut event_log, 0);

        assert_eq!(swaps, 0);
        assert_eq!(state.agent(1).unwrap().allocated_slots(), &[2]);
        assert!(ledger.incoming(1).is_none(), "offer record cleared");
    }
}
