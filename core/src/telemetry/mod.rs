//! telemetry/mod.rs
//! Per-stream counters.
//!
//! Each reader/writer owns its own `StreamCounters`; callers merge them if
//! they want totals across streams. No locks, no atomics.

pub mod counters;

pub use counters::*;
