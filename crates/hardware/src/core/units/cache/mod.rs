//! Set-Associative Cache Simulator.
//!
//! This module implements the memory system the offset prefetcher runs
//! against. It models tag/valid state per line, the per-line prefetch bit, and
//! a bounded queue of outstanding prefetch requests that fill after a fixed
//! number of accesses. Victims are chosen among invalid ways first, then by
//! least recent use.
//!
//! `CacheSim` implements [`PrefetchHost`], so it can be handed directly to
//! [`OffsetPrefetcher`](crate::core::units::prefetch::OffsetPrefetcher).

use std::collections::VecDeque;

use crate::config::CacheConfig;
use crate::core::units::prefetch::PrefetchHost;

/// Cache line entry containing tag, validity, and prefetch metadata.
#[derive(Clone, Copy, Debug, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    prefetched: bool,
    referenced: bool,
    last_used: u64,
}

/// A prefetch request waiting to fill.
#[derive(Clone, Copy, Debug)]
struct PendingPrefetch {
    /// Address exactly as requested; reported back on completion.
    addr: u64,
    /// Line number (`addr / line_bytes`), used for duplicate detection.
    line: u64,
    ready_at: u64,
}

/// Outcome of a demand access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessResult {
    /// The line was resident.
    pub hit: bool,
    /// The line was resident and had been filled by a prefetch.
    pub prefetched: bool,
    /// This is the first demand reference to a prefetched line.
    pub first_use: bool,
}

/// Counters for the prefetch request queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrefetchQueueStats {
    /// Requests accepted into the queue.
    pub issued: u64,
    /// Requests dropped because the line was already resident.
    pub dropped_resident: u64,
    /// Requests dropped because the line was already queued.
    pub dropped_pending: u64,
    /// Requests dropped because the queue was full.
    pub dropped_full: u64,
    /// Requests that completed and filled a line.
    pub filled: u64,
    /// Requests retired unfilled because a demand miss installed the line first.
    pub superseded: u64,
}

impl PrefetchQueueStats {
    /// Total requests the host refused.
    pub const fn dropped(&self) -> u64 {
        self.dropped_resident + self.dropped_pending + self.dropped_full
    }
}

/// Cache simulator acting as the prefetcher's host.
#[derive(Debug)]
pub struct CacheSim {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: u64,
    prefetch_latency: u64,
    max_pending: usize,
    pending: VecDeque<PendingPrefetch>,
    clock: u64,
    /// Prefetch queue counters.
    pub queue_stats: PrefetchQueueStats,
}

impl CacheSim {
    /// Creates a new cache simulator with the specified configuration.
    ///
    /// Unbuildable geometry is clamped so a cache can always be built; use
    /// `Config::validate` to reject it instead.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache configuration specifying size, associativity,
    ///   line size, and prefetch queue behaviour
    pub fn new(config: &CacheConfig) -> Self {
        let defaults = CacheConfig::default();
        let safe_line = if config.line_bytes.is_power_of_two() {
            config.line_bytes
        } else {
            defaults.line_bytes
        };
        // No more ways than the cache has lines.
        let safe_ways = config
            .ways
            .clamp(1, (config.size_bytes / safe_line).max(1));
        let safe_size = config.size_bytes.max(safe_line * safe_ways);

        let num_sets = (safe_size / safe_line) / safe_ways;

        Self {
            lines: vec![CacheLine::default(); num_sets * safe_ways],
            num_sets,
            ways: safe_ways,
            line_bytes: safe_line as u64,
            prefetch_latency: config.prefetch_latency,
            max_pending: config.max_pending,
            pending: VecDeque::new(),
            clock: 0,
            queue_stats: PrefetchQueueStats::default(),
        }
    }

    /// Number of demand accesses seen so far.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> u64 {
        self.line_bytes
    }

    /// Number of prefetch requests waiting to fill.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Splits an address into `(set index, tag)`.
    #[inline]
    const fn locate(&self, addr: u64) -> (usize, u64) {
        let line = addr / self.line_bytes;
        let set = (line % self.num_sets as u64) as usize;
        (set, line / self.num_sets as u64)
    }

    /// Index into `lines` of the resident line holding `addr`.
    fn find(&self, addr: u64) -> Option<usize> {
        let (set, tag) = self.locate(addr);
        let base = set * self.ways;
        (base..base + self.ways).find(|&idx| self.lines[idx].valid && self.lines[idx].tag == tag)
    }

    /// Checks if the cache contains the specified address.
    pub fn contains(&self, addr: u64) -> bool {
        self.find(addr).is_some()
    }

    /// Installs the line holding `addr`, evicting an invalid or LRU way.
    ///
    /// `referenced` is true for demand installs and false for prefetch fills.
    fn install(&mut self, addr: u64, referenced: bool) {
        let (set, tag) = self.locate(addr);
        let base = set * self.ways;
        let ways = &self.lines[base..base + self.ways];
        let victim = ways
            .iter()
            .position(|line| !line.valid)
            .or_else(|| {
                ways.iter()
                    .enumerate()
                    .min_by_key(|(_, line)| line.last_used)
                    .map(|(way, _)| way)
            })
            .unwrap_or(0);

        let idx = base + victim;
        self.lines[idx] = CacheLine {
            tag,
            valid: true,
            prefetched: false,
            referenced,
            last_used: self.clock,
        };
    }

    /// Performs a demand access and advances the clock by one.
    ///
    /// Hits refresh the line's recency; misses install the line with its
    /// prefetch bit clear.
    pub fn access(&mut self, addr: u64) -> AccessResult {
        self.clock += 1;

        if let Some(idx) = self.find(addr) {
            let line = &mut self.lines[idx];
            line.last_used = self.clock;
            let first_use = line.prefetched && !line.referenced;
            line.referenced = true;
            AccessResult {
                hit: true,
                prefetched: line.prefetched,
                first_use,
            }
        } else {
            self.install(addr, true);
            AccessResult::default()
        }
    }

    /// Fills every pending request whose latency has elapsed.
    ///
    /// A request whose line a demand miss already installed is retired
    /// without filling and is not reported.
    ///
    /// # Returns
    ///
    /// The requested addresses that filled a line, in issue order, for
    /// delivery to the prefetcher.
    pub fn complete_ready(&mut self) -> Vec<u64> {
        let mut completed = Vec::new();
        while let Some(req) = self.pending.pop_front() {
            if req.ready_at > self.clock {
                self.pending.push_front(req);
                break;
            }
            if self.fill(req.addr) {
                completed.push(req.addr);
            }
        }
        completed
    }

    /// Fills every pending request regardless of latency.
    ///
    /// # Returns
    ///
    /// The requested addresses that filled a line, as for `complete_ready`.
    pub fn drain(&mut self) -> Vec<u64> {
        let requests: Vec<u64> = self.pending.drain(..).map(|req| req.addr).collect();
        requests
            .into_iter()
            .filter(|&addr| self.fill(addr))
            .collect()
    }

    /// Brings a prefetched line in unless a demand access already did.
    ///
    /// # Returns
    ///
    /// `true` if the prefetch installed the line.
    fn fill(&mut self, addr: u64) -> bool {
        if self.contains(addr) {
            self.queue_stats.superseded += 1;
            return false;
        }
        self.install(addr, false);
        self.queue_stats.filled += 1;
        true
    }
}

impl PrefetchHost for CacheSim {
    fn issue_prefetch(&mut self, addr: u64) {
        let line = addr / self.line_bytes;
        if self.contains(addr) {
            self.queue_stats.dropped_resident += 1;
        } else if self.pending.iter().any(|req| req.line == line) {
            self.queue_stats.dropped_pending += 1;
        } else if self.pending.len() >= self.max_pending {
            self.queue_stats.dropped_full += 1;
        } else {
            self.pending.push_back(PendingPrefetch {
                addr,
                line,
                ready_at: self.clock.saturating_add(self.prefetch_latency),
            });
            self.queue_stats.issued += 1;
        }
    }

    fn prefetch_bit(&self, addr: u64) -> bool {
        self.find(addr).is_some_and(|idx| self.lines[idx].prefetched)
    }

    fn set_prefetch_bit(&mut self, addr: u64) {
        if let Some(idx) = self.find(addr) {
            self.lines[idx].prefetched = true;
        }
    }

    fn block_size(&self) -> u64 {
        self.line_bytes
    }
}
