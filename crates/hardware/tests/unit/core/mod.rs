//! # Core Unit Tests
//!
//! Tests for the memory-side units: the cache host and the offset prefetcher.

/// Cache and prefetcher unit tests.
pub mod units;
