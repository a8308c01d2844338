//! Tests for the four-phase exchange round
//!
//! Drives `run_round` over hand-built populations so every negotiation
//! outcome is forced, then checks the protocol invariants: at most one
//! committed exchange per agent per round, conservation of slot units, and
//! silent no-op failure semantics.

use slot_exchange_core_rs::exchange::run_round;
use slot_exchange_core_rs::strategy::strategy_for;
use slot_exchange_core_rs::{
    Agent, AgentType, ArenaState, Event, EventLog, ExchangeStrategy, RngManager, SlotType,
};
use std::collections::HashMap;

fn build_state(specs: &[(AgentType, Vec<SlotType>, Vec<SlotType>)]) -> (ArenaState, Vec<Box<dyn ExchangeStrategy>>) {
    let mut agents = Vec::new();
    let mut strategies: Vec<Box<dyn ExchangeStrategy>> = Vec::new();

    for (index, (agent_type, requested, allocated)) in specs.iter().enumerate() {
        let mut agent = Agent::new(index as u32 + 1, *agent_type);
        agent.begin_day(requested.clone());
        agent.receive_allocation(allocated.clone());
        agents.push(agent);
        strategies.push(strategy_for(*agent_type));
    }
    (ArenaState::new(agents), strategies)
}

fn population_counts(state: &ArenaState) -> HashMap<SlotType, usize> {
    state.allocated_counts()
}

#[test]
fn test_two_agent_cross_holding_swaps_to_full_satisfaction() {
    // U=2, C=1: agent 1 wants type 1 but drew type 2, agent 2 the reverse.
    // One round must cross the holdings over and reach the optimum bound.
    let (mut state, strategies) = build_state(&[
        (AgentType::SelfInterested, vec![1], vec![2]),
        (AgentType::SelfInterested, vec![2], vec![1]),
    ]);
    let mut rng = RngManager::new(909);
    let mut event_log = EventLog::new();

    let outcome = run_round(&mut state, &strategies, &mut rng, &mut event_log, 0);

    assert_eq!(outcome.adverts_posted, 2);
    assert_eq!(outcome.offers_delivered, 1);
    assert_eq!(outcome.swaps_completed, 1);

    assert_eq!(state.agent(1).unwrap().allocated_slots(), &[1]);
    assert_eq!(state.agent(2).unwrap().allocated_slots(), &[2]);
    assert_eq!(state.agent(1).unwrap().satisfaction(), 1.0);
    assert_eq!(state.agent(2).unwrap().satisfaction(), 1.0);
}

#[test]
fn test_prosocial_approves_trade_that_only_helps_requester() {
    // Agent 2 asks agent 1 for slot 5, offering slot 9 which agent 1 has
    // no use for. Prosocial approves the harmless trade.
    let (mut state, strategies) = build_state(&[
        (AgentType::Prosocial, vec![1, 2], vec![2, 5]),
        (AgentType::SelfInterested, vec![5, 6], vec![6, 9]),
    ]);
    let mut rng = RngManager::new(17);
    let mut event_log = EventLog::new();

    let outcome = run_round(&mut state, &strategies, &mut rng, &mut event_log, 0);

    assert_eq!(outcome.swaps_completed, 1);
    assert!(state.agent(2).unwrap().holds(5));
    assert!(state.agent(1).unwrap().holds(9));
    assert_eq!(state.agent(2).unwrap().satisfaction(), 1.0);
}

#[test]
fn test_self_interested_declines_trade_without_gain() {
    // Identical setup, but agent 1 now demands a strict improvement and
    // slot 9 covers none of its requests: the offer dies at CONSIDER.
    let (mut state, strategies) = build_state(&[
        (AgentType::SelfInterested, vec![1, 2], vec![2, 5]),
        (AgentType::SelfInterested, vec![5, 6], vec![6, 9]),
    ]);
    let mut rng = RngManager::new(17);
    let mut event_log = EventLog::new();

    let outcome = run_round(&mut state, &strategies, &mut rng, &mut event_log, 0);

    assert_eq!(outcome.offers_delivered, 1);
    assert_eq!(outcome.swaps_completed, 0);
    assert!(state.agent(1).unwrap().holds(5), "no state change on refusal");
    assert!(state.agent(2).unwrap().holds(9));
    assert!(event_log.events().iter().any(|event| matches!(
        event,
        Event::OfferConsidered { approved: false, .. }
    )));
}

#[test]
fn test_fully_satisfied_population_trades_nothing() {
    let (mut state, strategies) = build_state(&[
        (AgentType::SelfInterested, vec![1], vec![1]),
        (AgentType::Prosocial, vec![2], vec![2]),
    ]);
    let mut rng = RngManager::new(5);
    let mut event_log = EventLog::new();

    let outcome = run_round(&mut state, &strategies, &mut rng, &mut event_log, 0);

    assert_eq!(outcome.adverts_posted, 0);
    assert_eq!(outcome.offers_delivered, 0);
    assert_eq!(outcome.swaps_completed, 0);
    assert!(event_log.is_empty());
}

#[test]
fn test_round_conserves_slot_units() {
    let (mut state, strategies) = build_state(&[
        (AgentType::SelfInterested, vec![1, 2], vec![3, 4]),
        (AgentType::Prosocial, vec![3, 4], vec![1, 2]),
        (AgentType::SelfInterested, vec![1, 3], vec![2, 4]),
        (AgentType::Prosocial, vec![2, 4], vec![1, 3]),
    ]);
    let before = population_counts(&state);
    let mut rng = RngManager::new(2024);
    let mut event_log = EventLog::new();

    run_round(&mut state, &strategies, &mut rng, &mut event_log, 0);

    assert_eq!(population_counts(&state), before);
    assert_eq!(state.total_allocated_units(), 8);
}

#[test]
fn test_each_agent_is_swap_endpoint_at_most_once() {
    // Six agents in three complementary pairs; run several seeds and check
    // the per-round commitment invariant from the completed-swap events.
    for seed in [1, 7, 42, 1234, 99999] {
        let (mut state, strategies) = build_state(&[
            (AgentType::Prosocial, vec![1], vec![2]),
            (AgentType::Prosocial, vec![2], vec![1]),
            (AgentType::Prosocial, vec![3], vec![4]),
            (AgentType::Prosocial, vec![4], vec![3]),
            (AgentType::Prosocial, vec![5], vec![6]),
            (AgentType::Prosocial, vec![6], vec![5]),
        ]);
        let mut rng = RngManager::new(seed);
        let mut event_log = EventLog::new();

        let outcome = run_round(&mut state, &strategies, &mut rng, &mut event_log, 0);

        assert!(outcome.swaps_completed <= 3, "at most population/2 swaps");

        let mut endpoint_uses: HashMap<u32, usize> = HashMap::new();
        for event in event_log.events() {
            if let Event::SwapCompleted {
                requester,
                advertiser,
                ..
            } = event
            {
                *endpoint_uses.entry(*requester).or_insert(0) += 1;
                *endpoint_uses.entry(*advertiser).or_insert(0) += 1;
            }
        }
        for (agent_id, uses) in endpoint_uses {
            assert_eq!(uses, 1, "agent {} committed twice in one round", agent_id);
        }
    }
}

#[test]
fn test_round_outcome_matches_event_log() {
    let (mut state, strategies) = build_state(&[
        (AgentType::Prosocial, vec![1], vec![2]),
        (AgentType::Prosocial, vec![2], vec![1]),
        (AgentType::Prosocial, vec![3], vec![4]),
        (AgentType::Prosocial, vec![4], vec![3]),
    ]);
    let mut rng = RngManager::new(64);
    let mut event_log = EventLog::new();

    let outcome = run_round(&mut state, &strategies, &mut rng, &mut event_log, 5);

    assert_eq!(event_log.swaps_in_round(5), outcome.swaps_completed);
    assert_eq!(event_log.swaps_in_round(6), 0);
}
