//! Simulator: replays a trace through the cache and the offset prefetcher.
//!
//! The prefetcher owns the cache as its host, so the simulator drives the
//! cache through `host_mut` between the prefetcher's callbacks. Each step:
//! 1. Demand-access the cache (advancing its clock).
//! 2. Report the access to the prefetcher, which may issue into the cache.
//! 3. Deliver every prefetch whose fill latency has elapsed.

use tracing::{debug, info};

use super::trace::TraceRecord;
use crate::config::Config;
use crate::core::units::cache::CacheSim;
use crate::core::units::prefetch::{AccessStat, OffsetPrefetcher};
use crate::stats::SimStats;

/// Top-level simulator: cache host, prefetcher, and demand counters.
#[derive(Debug)]
pub struct Simulator {
    prefetcher: OffsetPrefetcher<CacheSim>,
    enabled: bool,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator from a configuration.
    ///
    /// The configuration is assumed valid; see `Config::validate`.
    pub fn new(config: &Config) -> Self {
        let cache = CacheSim::new(&config.cache);
        Self {
            prefetcher: OffsetPrefetcher::with_initial_offset(
                cache,
                config.prefetcher.initial_offset,
            ),
            enabled: config.prefetcher.enabled,
            stats: SimStats::default(),
        }
    }

    /// Replays a single access.
    pub fn step(&mut self, record: &TraceRecord) {
        let result = self.prefetcher.host_mut().access(record.addr);

        self.stats.accesses += 1;
        if result.hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        if result.prefetched {
            self.stats.prefetch_hits += 1;
        }
        if result.first_use {
            self.stats.useful_prefetches += 1;
        }

        if self.enabled {
            let access = AccessStat {
                pc: record.pc,
                mem_addr: record.addr,
                time: self.prefetcher.host().clock(),
                miss: !result.hit,
            };
            let before = self.prefetcher.active_offset();
            self.prefetcher.on_access(access);
            if self.prefetcher.active_offset() != before {
                info!(
                    offset = self.prefetcher.active_offset(),
                    previous = before,
                    at = access.time,
                    "active offset changed"
                );
            }
        }

        for addr in self.prefetcher.host_mut().complete_ready() {
            self.prefetcher.on_prefetch_complete(addr);
        }
    }

    /// Replays every record, then fills whatever prefetches are still pending.
    pub fn run<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a TraceRecord>,
    {
        for record in records {
            self.step(record);
        }
        let drained = self.prefetcher.host_mut().drain();
        debug!(count = drained.len(), "draining pending prefetches");
        for addr in drained {
            self.prefetcher.on_prefetch_complete(addr);
        }
    }

    /// The prefetcher (and, through it, the cache).
    pub const fn prefetcher(&self) -> &OffsetPrefetcher<CacheSim> {
        &self.prefetcher
    }

    /// The cache host.
    pub fn cache(&self) -> &CacheSim {
        self.prefetcher.host()
    }

    /// Snapshot of all statistics.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.stats.clone();
        stats.queue = self.prefetcher.host().queue_stats;
        stats.training = *self.prefetcher.stats();
        stats.active_offset = self.prefetcher.active_offset();
        stats
    }
}
