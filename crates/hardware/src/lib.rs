//! Adaptive offset prefetcher and trace-driven cache simulator.
//!
//! This crate implements a hardware prefetcher that learns a single block
//! offset online, with the following:
//! 1. **Prefetcher:** Recent Request table, candidate offsets, scores, and the training state machine.
//! 2. **Host:** A set-associative cache with per-line prefetch bits and a bounded prefetch queue.
//! 3. **Simulation:** Trace loading, configuration, and statistics collection.

/// Common constants and error types.
pub mod common;
/// Simulator configuration (defaults, cache and prefetcher sections).
pub mod config;
/// Cache host and prefetcher units.
pub mod core;
/// Trace loading and replay.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Cache host the simulator drives the prefetcher against.
pub use crate::core::units::cache::CacheSim;
/// The prefetcher and the host capabilities it consumes.
pub use crate::core::units::prefetch::{AccessStat, OffsetPrefetcher, PrefetchHost};
/// Trace replay loop.
pub use crate::sim::Simulator;
