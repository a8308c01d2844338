//! Time management for the simulation
//!
//! The arena operates in discrete exchange rounds. A fixed number of rounds
//! forms a simulated day. This module provides deterministic time
//! advancement.

use serde::{Deserialize, Serialize};

/// Tracks simulation time in exchange rounds and days
///
/// # Example
/// ```
/// use slot_exchange_core_rs::ExchangeClock;
///
/// let mut clock = ExchangeClock::new(200); // 200 exchange rounds per day
/// assert_eq!(clock.current_round(), 0);
/// assert_eq!(clock.current_day(), 0);
///
/// clock.advance_round();
/// assert_eq!(clock.current_round(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeClock {
    /// Total rounds elapsed since simulation start
    current_round: usize,
    /// Number of exchange rounds in one day
    rounds_per_day: usize,
}

impl ExchangeClock {
    /// Create a new ExchangeClock
    ///
    /// # Arguments
    /// * `rounds_per_day` - Number of exchange rounds in one simulated day
    pub fn new(rounds_per_day: usize) -> Self {
        assert!(rounds_per_day > 0, "rounds_per_day must be positive");
        Self {
            current_round: 0,
            rounds_per_day,
        }
    }

    /// Resume a clock at an arbitrary round (for checkpoint restoration)
    pub fn resume(rounds_per_day: usize, current_round: usize) -> Self {
        assert!(rounds_per_day > 0, "rounds_per_day must be positive");
        Self {
            current_round,
            rounds_per_day,
        }
    }

    /// Advance time by one exchange round
    pub fn advance_round(&mut self) {
        self.current_round += 1;
    }

    /// Get the current round (total rounds since start)
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Get the current day (0-indexed)
    pub fn current_day(&self) -> usize {
        self.current_round / self.rounds_per_day
    }

    /// Get the round within the current day (0-indexed)
    pub fn round_within_day(&self) -> usize {
        self.current_round % self.rounds_per_day
    }

    /// Check if the current round is the last round of the day
    pub fn is_end_of_day(&self) -> bool {
        self.round_within_day() == self.rounds_per_day - 1
    }

    /// Get rounds per day
    pub fn rounds_per_day(&self) -> usize {
        self.rounds_per_day
    }
}
