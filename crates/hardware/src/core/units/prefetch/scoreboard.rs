//! Per-candidate score counters.
//!
//! One counter per entry of the candidate list. Counters only grow during a
//! training phase; the phase ends (and the board is cleared) no later than the
//! access on which any counter reaches [`SCORE_MAX`].

use super::candidates::OFFSET_COUNT;
use crate::common::constants::SCORE_MAX;

/// Saturating score counters, indexed like the candidate list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBoard {
    scores: [u8; OFFSET_COUNT],
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBoard {
    /// Creates a board with all scores at zero.
    pub const fn new() -> Self {
        Self {
            scores: [0; OFFSET_COUNT],
        }
    }

    /// Zeroes every counter.
    pub fn clear(&mut self) {
        self.scores = [0; OFFSET_COUNT];
    }

    /// Score of the candidate at `index` (wrapping modulo the list length).
    #[inline]
    pub const fn score(&self, index: usize) -> u8 {
        self.scores[index % OFFSET_COUNT]
    }

    /// Adds one to the score at `index`.
    ///
    /// # Returns
    ///
    /// `true` once the counter has reached [`SCORE_MAX`]. The counter never
    /// moves past it.
    pub fn increment(&mut self, index: usize) -> bool {
        let slot = &mut self.scores[index % OFFSET_COUNT];
        if *slot < SCORE_MAX {
            *slot += 1;
        }
        *slot >= SCORE_MAX
    }

    /// Iterates over scores in candidate order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.scores.iter().copied()
    }

    /// Sum of all scores in the current phase.
    pub fn total(&self) -> u32 {
        self.scores.iter().map(|&s| u32::from(s)).sum()
    }
}
