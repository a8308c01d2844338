//! Randomized initial allocation
//!
//! At the start of each day every agent states its requests and draws from
//! the shared slot pool. Agents are visited in a fresh random permutation:
//! visit order decides who gets first access to scarce slots, so it must be
//! seed-controlled, never incidental.
//!
//! Draws are by slot-type multiplicity, not unit identity, so an agent
//! whose request repeats a type may legitimately receive that type more
//! than once while copies remain. When the pool runs dry mid-request the
//! agent simply starts the day under-filled — expected scarcity, not an
//! error.

use crate::models::event::{Event, EventLog};
use crate::models::slot::SlotPool;
use crate::models::state::ArenaState;
use crate::rng::RngManager;
use crate::strategy::ExchangeStrategy;

/// Give every agent its day requests and a random initial allocation
///
/// Visits agents in a random permutation; each states
/// `slots_per_agent` requested types through its strategy and draws that
/// many units from the pool (fewer if the pool is exhausted).
pub fn allocate_initial(
    state: &mut ArenaState,
    strategies: &[Box<dyn ExchangeStrategy>],
    pool: &mut SlotPool,
    slots_per_agent: usize,
    slot_universe: u32,
    rng: &mut RngManager,
    event_log: &mut EventLog,
    day: usize,
) {
    debug_assert_eq!(state.num_agents(), strategies.len());

    for index in rng.visit_order(state.num_agents()) {
        let requested = strategies[index].requested_slots(slots_per_agent, slot_universe, rng);
        let granted = pool.draw(requested.len(), rng);

        let agent = &mut state.population_mut()[index];
        event_log.log(Event::InitialAllocation {
            day,
            agent_id: agent.id(),
            requested: requested.len(),
            granted: granted.len(),
        });

        agent.begin_day(requested);
        agent.receive_allocation(granted);
    }
}
