//! Time-slot types and the daily slot pool
//!
//! A slot type is a category of the discrete resource being allocated
//! (e.g. a time-of-day bucket), identified by an integer in
//! `[1, slot_universe]`. The pool is a multiset holding `capacity` copies
//! of every slot type; it is created fresh at the start of each simulated
//! day and destroyed at the end of it.
//!
//! CRITICAL: Slot identity is by type, not by unit. Draws remove one copy
//! of a type; two copies of the same type are indistinguishable.

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Identifier of a slot type, in `[1, slot_universe]`
pub type SlotType = u32;

/// Multiset of allocatable slot units for one simulated day
///
/// # Invariants
///
/// - At day start the pool holds exactly `slot_universe × capacity` units.
/// - Draws strictly decrement pool membership.
/// - A slot type can be drawn at most `capacity` times per day.
///
/// # Example
///
/// ```
/// use slot_exchange_core_rs::{RngManager, SlotPool};
///
/// let mut rng = RngManager::new(42);
/// let mut pool = SlotPool::new(24, 16);
/// assert_eq!(pool.len(), 24 * 16);
///
/// let drawn = pool.draw(4, &mut rng);
/// assert_eq!(drawn.len(), 4);
/// assert_eq!(pool.len(), 24 * 16 - 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPool {
    /// Remaining undrawn units, one entry per copy of a slot type
    available: Vec<SlotType>,
}

impl SlotPool {
    /// Create a full pool for one day
    ///
    /// # Arguments
    /// * `slot_universe` - Number of unique slot types (`U`)
    /// * `capacity` - Copies of each type, i.e. maximum concurrent holders (`C`)
    pub fn new(slot_universe: u32, capacity: u32) -> Self {
        assert!(slot_universe > 0, "slot_universe must be positive");
        assert!(capacity > 0, "capacity must be positive");

        let mut available = Vec::with_capacity((slot_universe * capacity) as usize);
        for slot in 1..=slot_universe {
            for _ in 0..capacity {
                available.push(slot);
            }
        }
        Self { available }
    }

    /// Number of undrawn units remaining
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// Whether the pool is exhausted
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Remaining copies of one slot type
    pub fn remaining_of(&self, slot: SlotType) -> usize {
        self.available.iter().filter(|&&s| s == slot).count()
    }

    /// Draw up to `count` units uniformly at random without replacement
    ///
    /// Returns fewer than `count` units if the pool runs out. This never
    /// fails: partial allocation is a normal, expected outcome of scarcity,
    /// not an error.
    ///
    /// Because draws are by slot-type multiplicity, the same type can be
    /// returned more than once while copies remain.
    pub fn draw(&mut self, count: usize, rng: &mut RngManager) -> Vec<SlotType> {
        let mut drawn = Vec::with_capacity(count);

        for _ in 0..count {
            if self.available.is_empty() {
                break;
            }
            let selector = rng.index(self.available.len());
            drawn.push(self.available.remove(selector));
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_starts_full() {
        let pool = SlotPool::new(24, 16);
        assert_eq!(pool.len(), 384);
        assert_eq!(pool.remaining_of(1), 16);
        assert_eq!(pool.remaining_of(24), 16);
    }

    #[test]
    fn test_draw_decrements_pool() {
        let mut rng = RngManager::new(1);
        let mut pool = SlotPool::new(4, 2);

        let drawn = pool.draw(3, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_draw_from_exhausted_pool_is_partial() {
        let mut rng = RngManager::new(1);
        let mut pool = SlotPool::new(2, 1);

        let first = pool.draw(2, &mut rng);
        assert_eq!(first.len(), 2);
        assert!(pool.is_empty());

        let second = pool.draw(2, &mut rng);
        assert!(second.is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_zero_capacity_panics() {
        SlotPool::new(4, 0);
    }
}
