//! Adaptive Offset Prefetcher.
//!
//! This module contains the offset prefetcher and the host interface it is
//! driven through. The prefetcher learns a single block offset online:
//! 1. **Issue:** On a demand miss or a hit to a prefetched line, request `addr + offset`.
//! 2. **Train:** Test one candidate offset per access against the Recent Request table.
//! 3. **Select:** After 32 rounds (or an early saturation), adopt the best-scoring candidate.
//!
//! The host simulator owns the cache, the prefetch queue, and the per-line
//! prefetch bit. It is injected into [`OffsetPrefetcher`] at construction and
//! reached only through [`PrefetchHost`].

/// Fixed list of candidate offsets tested during training.
pub mod candidates;

/// The prefetcher state object and its two event callbacks.
pub mod offset;

/// Recent Request table of trigger addresses.
pub mod rrt;

/// Saturating per-candidate scores.
pub mod scoreboard;

/// Round/phase state machine and offset selection.
pub mod training;

pub use self::candidates::{OFFSET_LIST, OffsetCandidateSet};
pub use self::offset::{OffsetPrefetcher, TrainingStats};
pub use self::rrt::RecentRequestTable;
pub use self::scoreboard::ScoreBoard;
pub use self::training::{Advance, TrainingController, TrainingState};

/// Capabilities the prefetcher consumes from the simulated memory system.
///
/// Callbacks are invoked synchronously from within
/// [`OffsetPrefetcher::on_access`] and [`OffsetPrefetcher::on_prefetch_complete`].
pub trait PrefetchHost {
    /// Requests that the block containing `addr` be fetched.
    ///
    /// Fire-and-forget: the host may drop the request. If it is satisfied, the
    /// host later reports the same `addr` to `on_prefetch_complete`.
    fn issue_prefetch(&mut self, addr: u64);

    /// Returns whether the block containing `addr` was filled by a prefetch.
    fn prefetch_bit(&self, addr: u64) -> bool;

    /// Marks the block containing `addr` as filled by a prefetch.
    fn set_prefetch_bit(&mut self, addr: u64);

    /// Size of a cache block in bytes.
    fn block_size(&self) -> u64;
}

/// A single observed memory access, as delivered by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessStat {
    /// Program counter of the accessing instruction (0 when unknown).
    pub pc: u64,
    /// Accessed byte address.
    pub mem_addr: u64,
    /// Host time at which the access was observed.
    pub time: u64,
    /// Whether the access missed in the cache.
    pub miss: bool,
}

impl AccessStat {
    /// Creates an access record with no program counter or timestamp.
    ///
    /// # Arguments
    ///
    /// * `mem_addr` - The accessed byte address.
    /// * `miss` - Whether the access missed in the cache.
    pub fn new(mem_addr: u64, miss: bool) -> Self {
        Self {
            pc: 0,
            mem_addr,
            time: 0,
            miss,
        }
    }
}
