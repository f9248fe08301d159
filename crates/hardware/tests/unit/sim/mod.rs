//! Simulation driver unit tests.

/// End-to-end trace replay.
pub mod simulator;

/// Trace parsing, loading, and generation.
pub mod trace;
