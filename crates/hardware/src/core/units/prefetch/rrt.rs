//! Recent Request Table.
//!
//! Holds the trigger addresses of prefetches that have completed. Writes are
//! placed by a cheap 8-bit hash and overwrite whatever occupied the slot; reads
//! scan every slot for an exact match. The table is never cleared outside
//! `reset`, and a zeroed table therefore reports address 0 as present.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `record()`: O(1)
//!   - `contains()`: O(T), a full scan of all slots
//! - **Space Complexity:** O(T) where T = 256
//! - **Hardware Cost:** Low - one 256-entry address array, no tags or valid bits

use crate::common::constants::{RR_HASH_MASK, RR_TABLE_SIZE};

/// Fixed-size table of recently recorded trigger addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentRequestTable {
    slots: [u64; RR_TABLE_SIZE],
}

impl Default for RecentRequestTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentRequestTable {
    /// Creates a table with every slot zeroed.
    pub fn new() -> Self {
        Self {
            slots: [0; RR_TABLE_SIZE],
        }
    }

    /// Zeroes every slot.
    pub fn reset(&mut self) {
        self.slots = [0; RR_TABLE_SIZE];
    }

    /// Computes the slot index for an address.
    ///
    /// ANDs the low byte of the address with the next byte up. Many addresses
    /// collide; in particular every address whose low byte is zero maps to slot 0.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to hash.
    ///
    /// # Returns
    ///
    /// A slot index in `0..256`.
    #[inline]
    pub fn hash(addr: u64) -> usize {
        ((addr & RR_HASH_MASK) & ((addr >> 8) & RR_HASH_MASK)) as usize
    }

    /// Stores `addr` in the slot selected by its own hash.
    pub fn record(&mut self, addr: u64) {
        self.slots[Self::hash(addr)] = addr;
    }

    /// Stores `trigger` in the slot selected by the hash of `key`.
    ///
    /// The completion path keys on the prefetched address while storing the
    /// address that triggered it, so a trigger may sit outside its own hash slot.
    pub fn record_keyed(&mut self, key: u64, trigger: u64) {
        self.slots[Self::hash(key)] = trigger;
    }

    /// Returns whether `addr` is present in any slot.
    ///
    /// Scans the whole table rather than probing `hash(addr)`.
    pub fn contains(&self, addr: u64) -> bool {
        self.slots.iter().any(|&slot| slot == addr)
    }

    /// Returns the raw contents of one slot.
    ///
    /// The index is reduced modulo the table size.
    pub fn slot(&self, index: usize) -> u64 {
        self.slots[index % RR_TABLE_SIZE]
    }

    /// Number of slots in the table.
    pub const fn len(&self) -> usize {
        RR_TABLE_SIZE
    }

    /// Always `false`; the table has a fixed, non-zero size.
    pub const fn is_empty(&self) -> bool {
        false
    }
}
