//! Candidate offsets tested during training.
//!
//! The list holds every number of the form 2^i * 3^j * 5^k between 1 and 256,
//! in ascending order. Positions in this list identify candidates everywhere
//! else in the prefetcher (scores, training cursor).

/// Number of candidate offsets.
pub const OFFSET_COUNT: usize = 52;

/// Candidate offsets in blocks, ascending.
pub const OFFSET_LIST: [u64; OFFSET_COUNT] = [
    1, 2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 18, //
    20, 24, 25, 27, 30, 32, 36, 40, 45, 48, 50, 54, 60, //
    64, 72, 75, 80, 81, 90, 96, 100, 108, 120, 125, 128, 135, //
    144, 150, 160, 162, 180, 192, 200, 216, 225, 240, 243, 250, 256,
];

/// Immutable, ordered view of the candidate offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetCandidateSet {
    offsets: &'static [u64; OFFSET_COUNT],
}

impl Default for OffsetCandidateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetCandidateSet {
    /// Returns the standard candidate set.
    pub const fn new() -> Self {
        Self {
            offsets: &OFFSET_LIST,
        }
    }

    /// Offset at `index`, in blocks. The index wraps modulo the list length.
    #[inline]
    pub const fn get(&self, index: usize) -> u64 {
        self.offsets[index % OFFSET_COUNT]
    }

    /// Number of candidates.
    pub const fn len(&self) -> usize {
        OFFSET_COUNT
    }

    /// Always `false`; the list is fixed and non-empty.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Index of the last candidate.
    pub const fn last_index(&self) -> usize {
        OFFSET_COUNT - 1
    }

    /// Position of `offset` in the list, if it is a candidate.
    pub fn position(&self, offset: u64) -> Option<usize> {
        self.offsets.iter().position(|&o| o == offset)
    }

    /// Returns whether `offset` is one of the candidates.
    pub fn contains(&self, offset: u64) -> bool {
        self.position(offset).is_some()
    }

    /// Iterates over the candidate offsets in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.offsets.iter().copied()
    }
}
