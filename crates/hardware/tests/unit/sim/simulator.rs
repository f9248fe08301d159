//! Simulator end-to-end tests.
//!
//! Replays synthetic streams through the default cache and checks that the
//! prefetcher learns the stream's stride and that its prefetches are used.

use offsetpf_core::config::Config;
use offsetpf_core::sim::{Simulator, TraceRecord, stride_trace};
use pretty_assertions::assert_eq;

use crate::common::logging::with_captured_logs;

fn seeded_config(initial_offset: u64) -> Config {
    let mut config = Config::default();
    config.prefetcher.initial_offset = initial_offset;
    config
}

/// A seeded prefetcher learns a stride-4 stream and covers its misses.
#[test]
fn learns_stride_four_stream() {
    let trace = stride_trace(0x8000_0000, 4, 3000, 64);
    let mut sim = Simulator::new(&seeded_config(1));
    sim.run(&trace);

    let stats = sim.stats();
    assert_eq!(stats.active_offset, 4);
    assert_eq!(stats.accesses, 3000);
    assert_eq!(stats.hits + stats.misses, 3000);
    assert!(stats.hits >= 1400, "hits: {}", stats.hits);
    assert_eq!(stats.useful_prefetches, stats.hits);
    assert_eq!(stats.training.phases_completed, 1);
    assert_eq!(stats.training.early_terminations, 1);
}

/// Without a seed the Recent Request table never fills, so nothing is prefetched.
#[test]
fn cold_default_config_never_prefetches() {
    let trace = stride_trace(0x8000_0000, 4, 4000, 64);
    let mut sim = Simulator::new(&Config::default());
    sim.run(&trace);

    let stats = sim.stats();
    assert_eq!(stats.active_offset, 0);
    assert_eq!(stats.queue.issued, 0);
    assert_eq!(stats.training.prefetches_requested, 0);
    assert_eq!(stats.misses, 4000);
}

/// A disabled prefetcher sees no accesses at all.
#[test]
fn disabled_prefetcher_issues_nothing() {
    let mut config = seeded_config(1);
    config.prefetcher.enabled = false;
    let trace = stride_trace(0x8000_0000, 1, 500, 64);
    let mut sim = Simulator::new(&config);
    sim.run(&trace);

    let stats = sim.stats();
    assert_eq!(stats.queue.issued, 0);
    assert_eq!(stats.training, Default::default());
    assert_eq!(stats.active_offset, 1);
}

/// Repeating accesses hit in the cache without prefetcher help.
#[test]
fn repeated_line_hits() {
    let trace = vec![TraceRecord::read(0x1000); 10];
    let mut sim = Simulator::new(&Config::default());
    sim.run(&trace);

    let stats = sim.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 9);
    assert_eq!(stats.prefetch_hits, 0);
    assert_eq!(sim.cache().clock(), 10);
}

/// Offset changes are reported at info level with the access time.
#[test]
fn offset_change_is_logged() {
    let trace = stride_trace(0x8000_0000, 4, 2000, 64);
    let (stats, logs) = with_captured_logs("offsetpf_core=info", || {
        let mut sim = Simulator::new(&seeded_config(1));
        sim.run(&trace);
        sim.stats()
    });

    assert_eq!(stats.active_offset, 4);
    assert_eq!(logs.matches("active offset changed").count(), 1, "{logs}");
    assert!(logs.contains("offset=4 previous=1"), "{logs}");
    assert!(!logs.contains("chose new offset"), "debug events are filtered out");
}
