//! Offset Prefetcher.
//!
//! Owns every piece of prefetcher state (Recent Request table, training
//! controller, active offset) together with the injected host, and exposes the
//! two event callbacks the host drives it with.
//!
//! * **On access:** If an offset is active and the access missed (or hit a line
//!   that a prefetch brought in), request `addr + offset * block`. Then test the
//!   candidate under training: if `addr - candidate * block` is a recorded
//!   trigger, the candidate scores.
//! * **On prefetch completion:** Mark the line as prefetched and record the
//!   address that triggered the prefetch, `addr - offset * block`.
//!
//! Address arithmetic wraps at 2^64.

use tracing::{debug, trace};

use super::rrt::RecentRequestTable;
use super::training::{Advance, TrainingController};
use super::{AccessStat, PrefetchHost};
use crate::common::constants::OFFSET_DISABLED;

/// Counters describing what the prefetcher has done since the last `init`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingStats {
    /// Passes over the candidate list completed (including phase ends).
    pub rounds_completed: u64,
    /// Training phases completed (offset selections made).
    pub phases_completed: u64,
    /// Phases cut short by a saturated score.
    pub early_terminations: u64,
    /// Accesses explained by the candidate under test.
    pub correlation_hits: u64,
    /// Selections that changed the active offset.
    pub offset_changes: u64,
    /// Prefetch requests handed to the host.
    pub prefetches_requested: u64,
}

/// Adaptive single-offset prefetcher bound to a host memory system.
#[derive(Debug)]
pub struct OffsetPrefetcher<H> {
    host: H,
    block_size: u64,
    initial_offset: u64,
    active_offset: u64,
    rrt: RecentRequestTable,
    training: TrainingController,
    stats: TrainingStats,
}

impl<H: PrefetchHost> OffsetPrefetcher<H> {
    /// Creates a prefetcher with prefetching disabled until training selects
    /// an offset.
    ///
    /// # Arguments
    ///
    /// * `host` - The memory system the prefetcher observes and issues into.
    pub fn new(host: H) -> Self {
        Self::with_initial_offset(host, OFFSET_DISABLED)
    }

    /// Creates a prefetcher that starts out issuing with `initial_offset`.
    ///
    /// A cold Recent Request table only fills through completed prefetches, so
    /// a non-zero seed lets training gather evidence from the first accesses.
    ///
    /// # Arguments
    ///
    /// * `host` - The memory system the prefetcher observes and issues into.
    /// * `initial_offset` - Offset in blocks restored by every `init`.
    pub fn with_initial_offset(host: H, initial_offset: u64) -> Self {
        let block_size = host.block_size();
        Self {
            host,
            block_size,
            initial_offset,
            active_offset: initial_offset,
            rrt: RecentRequestTable::new(),
            training: TrainingController::new(),
            stats: TrainingStats::default(),
        }
    }

    /// Clears the Recent Request table, the scores, and the training cursor,
    /// and restores the initial offset.
    pub fn init(&mut self) {
        self.rrt.reset();
        self.training.reset();
        self.active_offset = self.initial_offset;
        self.stats = TrainingStats::default();
    }

    /// Handles one demand access.
    pub fn on_access(&mut self, access: AccessStat) {
        let addr = access.mem_addr;

        if self.active_offset != OFFSET_DISABLED && (access.miss || self.host.prefetch_bit(addr)) {
            let target = addr.wrapping_add(self.distance(self.active_offset));
            trace!(
                addr,
                target,
                offset = self.active_offset,
                miss = access.miss,
                "issuing prefetch"
            );
            self.host.issue_prefetch(target);
            self.stats.prefetches_requested += 1;
        }

        let candidate = self.training.offset_under_test();
        let test_addr = addr.wrapping_sub(self.distance(candidate));
        if self.rrt.contains(test_addr) {
            self.stats.correlation_hits += 1;
            if self.training.record_hit() {
                self.stats.early_terminations += 1;
                debug!(offset = candidate, "score saturated, ending phase early");
            }
        }

        match self.training.advance() {
            Advance::Testing => {}
            Advance::RoundEnd { .. } => self.stats.rounds_completed += 1,
            Advance::Select { offset, score } => {
                self.stats.rounds_completed += 1;
                self.stats.phases_completed += 1;
                if offset != self.active_offset {
                    self.stats.offset_changes += 1;
                }
                debug!(offset, score, previous = self.active_offset, "chose new offset");
                self.active_offset = offset;
            }
        }
    }

    /// Handles completion of a prefetch previously issued for `addr`.
    pub fn on_prefetch_complete(&mut self, addr: u64) {
        self.host.set_prefetch_bit(addr);
        let trigger = addr.wrapping_sub(self.distance(self.active_offset));
        trace!(addr, trigger, "recording trigger");
        self.rrt.record_keyed(addr, trigger);
    }

    /// Byte distance covered by `offset` blocks.
    #[inline]
    const fn distance(&self, offset: u64) -> u64 {
        offset.wrapping_mul(self.block_size)
    }

    /// Offset in blocks currently used for issuing (0 when disabled).
    pub const fn active_offset(&self) -> u64 {
        self.active_offset
    }

    /// Block size in bytes, read from the host at construction.
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// The Recent Request table.
    pub const fn rrt(&self) -> &RecentRequestTable {
        &self.rrt
    }

    /// The training controller.
    pub const fn training(&self) -> &TrainingController {
        &self.training
    }

    /// Activity counters since the last `init`.
    pub const fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Shared access to the host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Exclusive access to the host, for driving it between callbacks.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the prefetcher and returns its host.
    pub fn into_host(self) -> H {
        self.host
    }
}
