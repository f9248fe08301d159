//! Memory-side units.
//!
//! This module contains the cache that hosts the prefetcher and the offset
//! prefetcher itself.

/// Cache host and prefetcher.
pub mod units;
