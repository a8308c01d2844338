//! Arena Engine
//!
//! Main simulation loop integrating all components:
//! - Daily slot pool creation and randomized initial allocation
//! - Baseline and optimum-bound metric capture before any exchange
//! - Exchange rounds (the four-phase negotiation protocol)
//! - Per-round and end-of-day satisfaction metrics
//! - Event logging (complete simulation history)
//!
//! # Architecture
//!
//! The Arena implements the day loop:
//!
//! ```text
//! For each day d:
//! 1. Fill a fresh slot pool (universe × capacity units)
//! 2. Randomized initial allocation (requests + pool draws)
//! 3. Capture random baseline and optimum bound
//! 4. Run rounds_per_day exchange rounds, recording per-type averages
//! 5. Capture per-agent and per-type end-of-day satisfactions
//! ```
//!
//! # Determinism
//!
//! All randomness flows through the seeded xorshift64* [`RngManager`].
//! Same seed + same config = bit-identical `DayResult`s. Independent runs
//! share no mutable state; parallelise at the run level, never inside a
//! day (phases are inherently sequential).
//!
//! # Example
//!
//! ```rust
//! use slot_exchange_core_rs::orchestrator::{Arena, ArenaConfig};
//! use slot_exchange_core_rs::AgentType;
//!
//! let config = ArenaConfig {
//!     num_days: 2,
//!     rounds_per_day: 10,
//!     slots_per_agent: 4,
//!     slot_universe: 24,
//!     slot_capacity: 16,
//!     rng_seed: 12345,
//!     agent_types: vec![AgentType::SelfInterested, AgentType::Prosocial],
//! };
//!
//! let mut arena = Arena::new(config).unwrap();
//! let day = arena.run_day().unwrap();
//! assert!(day.optimum_bound_satisfaction >= day.random_baseline_satisfaction);
//! ```

use crate::allocation::allocate_initial;
use crate::core::time::ExchangeClock;
use crate::exchange::run_round;
use crate::metrics;
use crate::models::agent::{Agent, AgentId, AgentType};
use crate::models::event::{Event, EventLog};
use crate::models::slot::SlotPool;
use crate::models::state::ArenaState;
use crate::orchestrator::checkpoint::{self, StateSnapshot};
use crate::rng::RngManager;
use crate::strategy::{strategy_for, ExchangeStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete arena configuration
///
/// # Fields
///
/// * `num_days` - Simulated days per run
/// * `rounds_per_day` - Exchange rounds executed each day
/// * `slots_per_agent` - Slot types each agent requests per day (`S`)
/// * `slot_universe` - Unique slot types per day (`U`)
/// * `slot_capacity` - Copies of each type, i.e. max concurrent holders (`C`)
/// * `rng_seed` - Seed for deterministic random number generation
/// * `agent_types` - One behavioral type per agent; IDs are assigned
///   contiguously from 1 in this order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub num_days: usize,
    pub rounds_per_day: usize,
    pub slots_per_agent: usize,
    pub slot_universe: u32,
    pub slot_capacity: u32,
    pub rng_seed: u64,
    pub agent_types: Vec<AgentType>,
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Serialization error (config hashing, export)
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Snapshot failed an integrity check
    #[error("State validation error: {0}")]
    StateValidationError(String),

    /// Snapshot was taken under a different configuration
    #[error("Config hash mismatch: snapshot {snapshot}, config {config}")]
    ConfigMismatch { snapshot: String, config: String },
}

// ============================================================================
// Result Types
// ============================================================================

/// Average satisfaction of one agent type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAverage {
    pub agent_type: AgentType,
    pub satisfaction: f64,
}

/// End-of-day satisfaction of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSatisfaction {
    pub agent_id: AgentId,
    pub agent_type: AgentType,
    pub satisfaction: f64,
}

/// Exchange activity and per-type averages of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Global round number (rounds count up across days)
    pub round: usize,

    /// Agents that published a non-empty advert
    pub adverts_posted: usize,

    /// Offers delivered to advertisers
    pub offers_delivered: usize,

    /// Offers approved and confirmed into swaps
    pub swaps_completed: usize,

    /// Average satisfaction per agent type at the end of the round
    pub type_averages: Vec<TypeAverage>,
}

/// Complete metrics of one simulated day
///
/// The baseline and optimum bound are captured after initial allocation and
/// before the first exchange round: the baseline is what a no-exchange
/// population scores, the bound what perfect reallocation of the same
/// supply could score. This shape is the stable contract with external
/// reporting and visualization collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    /// Day number (0-indexed)
    pub day: usize,

    /// Population average satisfaction if no exchanges had run
    pub random_baseline_satisfaction: f64,

    /// Upper bound on average satisfaction under perfect reallocation
    pub optimum_bound_satisfaction: f64,

    /// End-of-day satisfaction of every agent
    pub per_agent_satisfaction: Vec<AgentSatisfaction>,

    /// Activity and per-type averages of every round, in order
    pub rounds: Vec<RoundResult>,

    /// Average satisfaction per agent type after the last round
    pub end_of_day_type_averages: Vec<TypeAverage>,
}

/// Complete result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Tag pairing all artifacts of this run (not part of determinism)
    pub run_id: String,

    /// Seed the run was driven by
    pub rng_seed: u64,

    /// SHA256 hash of the configuration
    pub config_hash: String,

    /// One result per simulated day, in order
    pub days: Vec<DayResult>,
}

// ============================================================================
// Arena
// ============================================================================

/// Main arena owning simulation state and the day loop
///
/// The Arena owns the agent population, the seeded RNG, the clock, the
/// per-agent strategies, and the event log. The population persists across
/// days within a run; the slot pool is private to each day.
pub struct Arena {
    /// Configuration the run was created from
    config: ArenaConfig,

    /// Agent population state
    state: ArenaState,

    /// Round/day tracking
    clock: ExchangeClock,

    /// Deterministic RNG (all randomness flows through here)
    rng: RngManager,

    /// Per-agent strategy executors, positionally parallel to the population
    strategies: Vec<Box<dyn ExchangeStrategy>>,

    /// Event log (all simulation events)
    event_log: EventLog,

    /// Results of completed days
    day_results: Vec<DayResult>,
}

impl Arena {
    /// Create a new arena from configuration
    ///
    /// Initialises the population (IDs assigned contiguously from 1, in
    /// `agent_types` order), strategies, clock, and RNG.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfig` when any structural precondition
    /// fails; validation runs before any day executes so that degenerate
    /// parameters can never produce silently-broken averages.
    pub fn new(config: ArenaConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let agents: Vec<Agent> = config
            .agent_types
            .iter()
            .enumerate()
            .map(|(index, &agent_type)| Agent::new(index as AgentId + 1, agent_type))
            .collect();
        let strategies: Vec<Box<dyn ExchangeStrategy>> = config
            .agent_types
            .iter()
            .map(|&agent_type| strategy_for(agent_type))
            .collect();

        Ok(Self {
            state: ArenaState::new(agents),
            clock: ExchangeClock::new(config.rounds_per_day),
            rng: RngManager::new(config.rng_seed),
            strategies,
            event_log: EventLog::new(),
            day_results: Vec::new(),
            config,
        })
    }

    /// Validate configuration
    fn validate_config(config: &ArenaConfig) -> Result<(), SimulationError> {
        if config.num_days == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_days must be > 0".to_string(),
            ));
        }
        if config.rounds_per_day == 0 {
            return Err(SimulationError::InvalidConfig(
                "rounds_per_day must be > 0".to_string(),
            ));
        }
        if config.slots_per_agent == 0 {
            return Err(SimulationError::InvalidConfig(
                "slots_per_agent must be > 0".to_string(),
            ));
        }
        if config.slot_universe == 0 {
            return Err(SimulationError::InvalidConfig(
                "slot_universe must be > 0".to_string(),
            ));
        }
        if config.slot_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "slot_capacity must be > 0".to_string(),
            ));
        }
        if config.agent_types.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "Must have at least one agent".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current global round number
    pub fn current_round(&self) -> usize {
        self.clock.current_round()
    }

    /// Get current day number
    pub fn current_day(&self) -> usize {
        self.clock.current_day()
    }

    /// Get the configuration the arena was created from
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Get reference to the population state
    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    /// Get reference to the event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Results of the days completed so far
    pub fn day_results(&self) -> &[DayResult] {
        &self.day_results
    }

    // ========================================================================
    // Day Loop
    // ========================================================================

    /// Execute one simulated day
    ///
    /// Creates the day's slot pool, performs initial allocation, captures
    /// the random baseline and optimum bound, runs `rounds_per_day`
    /// exchange rounds, and returns the day's metrics.
    pub fn run_day(&mut self) -> Result<DayResult, SimulationError> {
        let day = self.clock.current_day();

        // STEP 1: fresh pool, replenished once per day
        let mut pool = SlotPool::new(self.config.slot_universe, self.config.slot_capacity);
        self.event_log.log(Event::DayStarted {
            day,
            pool_size: pool.len(),
        });

        // STEP 2: randomized initial allocation
        allocate_initial(
            &mut self.state,
            &self.strategies,
            &mut pool,
            self.config.slots_per_agent,
            self.config.slot_universe,
            &mut self.rng,
            &mut self.event_log,
            day,
        );

        // STEP 3: score the allocation before any exchange happens
        let random_baseline = metrics::average_satisfaction(self.state.population());
        let optimum_bound = metrics::optimum_bound(self.state.population());

        // STEP 4: exchange rounds
        let mut rounds = Vec::with_capacity(self.config.rounds_per_day);
        let mut swaps_today = 0;
        for _ in 0..self.config.rounds_per_day {
            let round = self.clock.current_round();
            let outcome = run_round(
                &mut self.state,
                &self.strategies,
                &mut self.rng,
                &mut self.event_log,
                round,
            );
            swaps_today += outcome.swaps_completed;

            rounds.push(RoundResult {
                round,
                adverts_posted: outcome.adverts_posted,
                offers_delivered: outcome.offers_delivered,
                swaps_completed: outcome.swaps_completed,
                type_averages: self.type_averages(),
            });
            self.clock.advance_round();
        }

        // STEP 5: end-of-day metrics
        let per_agent_satisfaction = self
            .state
            .population()
            .iter()
            .map(|agent| AgentSatisfaction {
                agent_id: agent.id(),
                agent_type: agent.agent_type(),
                satisfaction: agent.satisfaction(),
            })
            .collect();
        let end_of_day_type_averages = self.type_averages();

        self.event_log.log(Event::EndOfDay {
            day,
            average_satisfaction: metrics::average_satisfaction(self.state.population()),
            optimum_bound,
            swaps_completed: swaps_today,
        });

        let result = DayResult {
            day,
            random_baseline_satisfaction: random_baseline,
            optimum_bound_satisfaction: optimum_bound,
            per_agent_satisfaction,
            rounds,
            end_of_day_type_averages,
        };
        self.day_results.push(result.clone());
        Ok(result)
    }

    /// Execute all configured days and return the run's results
    ///
    /// Runs the remaining days from the current clock position, so a
    /// restored arena picks up where its snapshot left off.
    pub fn run(&mut self) -> Result<RunResult, SimulationError> {
        while self.clock.current_day() < self.config.num_days {
            self.run_day()?;
        }

        Ok(RunResult {
            run_id: uuid::Uuid::new_v4().to_string(),
            rng_seed: self.config.rng_seed,
            config_hash: checkpoint::compute_config_hash(&self.config)?,
            days: self.day_results.clone(),
        })
    }

    /// Average satisfaction per agent type, types in ascending order
    fn type_averages(&self) -> Vec<TypeAverage> {
        let types: BTreeSet<AgentType> = self
            .state
            .population()
            .iter()
            .map(Agent::agent_type)
            .collect();

        types
            .into_iter()
            .map(|agent_type| TypeAverage {
                agent_type,
                satisfaction: metrics::average_satisfaction_for(
                    self.state.population(),
                    agent_type,
                ),
            })
            .collect()
    }

    // ========================================================================
    // Checkpointing
    // ========================================================================

    /// Capture a snapshot of the arena state
    ///
    /// The snapshot holds everything needed to resume: clock position, RNG
    /// state, and the full population. Already-exported day results and the
    /// event log are history, not state, and are not captured.
    pub fn snapshot(&self) -> Result<StateSnapshot, SimulationError> {
        Ok(StateSnapshot {
            current_round: self.clock.current_round(),
            current_day: self.clock.current_day(),
            rng_state: self.rng.get_state(),
            agents: self.state.population().iter().map(Into::into).collect(),
            config_hash: checkpoint::compute_config_hash(&self.config)?,
        })
    }

    /// Restore an arena from a snapshot taken under the same configuration
    ///
    /// # Errors
    ///
    /// - `ConfigMismatch` when the snapshot's config hash differs
    /// - `StateValidationError` when the snapshot violates an invariant
    pub fn restore(config: ArenaConfig, snapshot: StateSnapshot) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let config_hash = checkpoint::compute_config_hash(&config)?;
        if config_hash != snapshot.config_hash {
            return Err(SimulationError::ConfigMismatch {
                snapshot: snapshot.config_hash,
                config: config_hash,
            });
        }
        checkpoint::validate_snapshot(&snapshot, &config)?;

        let agents: Vec<Agent> = snapshot.agents.into_iter().map(Into::into).collect();
        let strategies = agents
            .iter()
            .map(|agent| strategy_for(agent.agent_type()))
            .collect();

        Ok(Self {
            state: ArenaState::new(agents),
            clock: ExchangeClock::resume(config.rounds_per_day, snapshot.current_round),
            rng: RngManager::new(snapshot.rng_state),
            strategies,
            event_log: EventLog::new(),
            day_results: Vec::new(),
            config,
        })
    }
}

// Manual Debug implementation (strategies don't implement Debug)
impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("current_round", &self.current_round())
            .field("current_day", &self.current_day())
            .field("num_agents", &self.state.num_agents())
            .field("event_count", &self.event_log.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
