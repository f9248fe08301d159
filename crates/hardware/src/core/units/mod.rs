//! Memory-side functional components.
//!
//! This module contains the cache simulator that stands in for the memory
//! system and the adaptive offset prefetcher it drives.

/// Set-associative cache with prefetch-bit metadata and a prefetch queue.
pub mod cache;

/// Adaptive offset prefetcher (Recent Request table, scoring, training).
pub mod prefetch;
