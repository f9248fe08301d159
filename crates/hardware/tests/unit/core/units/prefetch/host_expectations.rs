//! Host interaction tests using a `mockall` host.
//!
//! Pins down exactly which host capabilities each callback touches.

use mockall::predicate::eq;
use offsetpf_core::core::units::prefetch::{AccessStat, OffsetPrefetcher};

use crate::common::mocks::MockHost;

fn host() -> MockHost {
    let mut host = MockHost::new();
    host.expect_block_size().return_const(64u64);
    host
}

/// A disabled prefetcher neither issues nor consults the prefetch bit.
#[test]
fn disabled_prefetcher_leaves_host_alone() {
    let mut host = host();
    host.expect_issue_prefetch().never();
    host.expect_prefetch_bit().never();

    let mut pf = OffsetPrefetcher::new(host);
    for k in 0..64 {
        pf.on_access(AccessStat::new(k * 64, k % 3 == 0));
    }
}

/// On a miss the prefetch bit is not consulted.
#[test]
fn miss_skips_prefetch_bit_lookup() {
    let mut host = host();
    host.expect_prefetch_bit().never();
    host
        .expect_issue_prefetch()
        .with(eq(0x9000 + 4 * 64))
        .times(1)
        .return_const(());

    let mut pf = OffsetPrefetcher::with_initial_offset(host, 4);
    pf.on_access(AccessStat::new(0x9000, true));
}

/// On a hit the bit decides; a clear bit issues nothing.
#[test]
fn hit_consults_prefetch_bit() {
    let mut host = host();
    host
        .expect_prefetch_bit()
        .with(eq(0x9000))
        .times(1)
        .return_const(false);
    host.expect_issue_prefetch().never();

    let mut pf = OffsetPrefetcher::with_initial_offset(host, 4);
    pf.on_access(AccessStat::new(0x9000, false));
}

/// Completion marks exactly the completed address.
#[test]
fn completion_sets_bit_on_completed_address() {
    let mut host = host();
    host
        .expect_set_prefetch_bit()
        .with(eq(0x4000))
        .times(1)
        .return_const(());

    let mut pf = OffsetPrefetcher::with_initial_offset(host, 1);
    pf.on_prefetch_complete(0x4000);
    assert!(pf.rrt().contains(0x4000 - 64));
}
