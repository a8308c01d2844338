//! Tests for the Agent model
//!
//! CRITICAL: requests and allocations are multisets; satisfaction and the
//! missing/unwanted views all count multiplicity, never set membership.

use slot_exchange_core_rs::{Agent, AgentType};

fn agent_with(requested: Vec<u32>, allocated: Vec<u32>) -> Agent {
    let mut agent = Agent::new(1, AgentType::SelfInterested);
    agent.begin_day(requested);
    agent.receive_allocation(allocated);
    agent
}

#[test]
fn test_satisfaction_counts_multiplicity() {
    // Requesting slot 3 twice but holding it once is half a match, plus
    // the matched 7 out of four requests in total.
    let agent = agent_with(vec![3, 3, 7, 9], vec![3, 7, 5, 5]);

    assert!((agent.satisfaction() - 0.5).abs() < 1e-12);
}

#[test]
fn test_full_satisfaction_iff_request_is_submultiset() {
    let satisfied = agent_with(vec![2, 2, 4], vec![4, 2, 2]);
    assert_eq!(satisfied.satisfaction(), 1.0);

    // Holding one 2 where two were requested is not full satisfaction,
    // however many other slots are held.
    let short = agent_with(vec![2, 2, 4], vec![4, 2, 9, 9]);
    assert!(short.satisfaction() < 1.0);
}

#[test]
fn test_partial_allocation_scores_fulfilled_portion() {
    // Pool exhaustion left this agent with one of three requested units.
    let agent = agent_with(vec![1, 2, 3], vec![2]);

    assert!((agent.satisfaction() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_empty_allocation_scores_zero() {
    let agent = agent_with(vec![1, 2], vec![]);
    assert_eq!(agent.satisfaction(), 0.0);
}

#[test]
fn test_missing_and_unwanted_are_complementary_views() {
    let agent = agent_with(vec![3, 3, 7], vec![3, 5, 5, 8]);

    assert_eq!(agent.missing_slots(), vec![3, 7]);
    assert_eq!(agent.unwanted_slots(), vec![5, 5, 8]);
}

#[test]
fn test_duplicate_allocation_beyond_request_is_unwanted() {
    // One requested 6 is covered; the second held 6 is surplus.
    let agent = agent_with(vec![6], vec![6, 6]);

    assert!(agent.missing_slots().is_empty());
    assert_eq!(agent.unwanted_slots(), vec![6]);
}

#[test]
fn test_swap_legs_update_allocation() {
    let mut agent = agent_with(vec![1], vec![4, 4]);

    assert!(agent.remove_slot(4));
    agent.add_slot(1);

    assert_eq!(agent.allocated_slots(), &[4, 1]);
    assert!(agent.holds(1));
    assert!(!agent.remove_slot(9));
}

#[test]
fn test_satisfaction_always_in_unit_interval() {
    let cases = [
        agent_with(vec![1], vec![]),
        agent_with(vec![1], vec![1, 1, 1]),
        agent_with(vec![1, 1, 1, 1], vec![1]),
        agent_with(vec![2, 3], vec![4, 5]),
    ];

    for agent in &cases {
        let satisfaction = agent.satisfaction();
        assert!((0.0..=1.0).contains(&satisfaction));
    }
}
