//! Global Prefetcher Constants.
//!
//! This module defines the fixed sizes and thresholds shared by the prefetcher
//! core and its host. It includes:
//! 1. **Table Geometry:** Recent Request table slot count and hash mask.
//! 2. **Training Limits:** Score saturation, rounds per phase, and the "no evidence" score.
//! 3. **Host Defaults:** Block size used when a host does not say otherwise.

/// Number of slots in the Recent Request table.
///
/// The hash function produces exactly 8 bits, so this must stay at 256.
pub const RR_TABLE_SIZE: usize = 256;

/// Mask applied to each byte of an address by the Recent Request hash.
pub const RR_HASH_MASK: u64 = 0xFF;

/// Score at which a candidate offset ends the current training phase early.
pub const SCORE_MAX: u8 = 31;

/// Number of full passes over the candidate list in one training phase.
pub const ROUND_MAX: u32 = 32;

/// Scores at or below this value never win a selection.
pub const BAD_SCORE: u8 = 0;

/// Offset value meaning "prefetching disabled".
pub const OFFSET_DISABLED: u64 = 0;

/// Default cache block (line) size in bytes.
pub const DEFAULT_BLOCK_SIZE: u64 = 64;
