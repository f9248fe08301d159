//! Trace-driven simulation.
//!
//! Provides trace loading and generation, and the simulator that replays a
//! trace through the cache host and the offset prefetcher.

/// Top-level trace replay loop.
pub mod simulator;

/// Trace parsing, writing, and synthetic stride streams.
pub mod trace;

pub use simulator::Simulator;
pub use trace::{AccessKind, TraceRecord, load_trace, parse_trace, stride_trace, write_trace};
