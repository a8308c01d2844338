//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random number
//! generation. CRITICAL: All randomness in the arena MUST go through this
//! module — pool draws, agent visit orders, request generation, and offered
//! slot selection are all seed-controlled.

mod xorshift;

pub use xorshift::RngManager;
