//! Common constants and error types shared across the prefetcher and its host.
//!
//! 1. **Constants:** Table sizes, training thresholds, and the default block size.
//! 2. **Error Handling:** Configuration, trace, and simulation error enums.

/// Fixed sizes and thresholds.
pub mod constants;

/// Error types for configuration, trace input, and simulation.
pub mod error;

pub use constants::{DEFAULT_BLOCK_SIZE, OFFSET_DISABLED, RR_TABLE_SIZE, ROUND_MAX, SCORE_MAX};
pub use error::{ConfigError, SimError, TraceError};
