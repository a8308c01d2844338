//! Core simulation plumbing: time management

pub mod time;

pub use time::ExchangeClock;
