//! Offset Training Controller.
//!
//! Drives the search for the best prefetch offset. Each access tests exactly
//! one candidate; the cursor walks the candidate list in order, a full pass is
//! a *round*, and [`ROUND_MAX`] rounds make a *phase*. At the end of a phase
//! the highest-scoring candidate is selected and all scores are cleared.
//!
//! A candidate whose score saturates at [`SCORE_MAX`] short-circuits the
//! phase: the cursor is moved to the last position of the last round, so the
//! very next advance (made on the same access) performs the selection.
//!
//! [`SCORE_MAX`]: crate::common::constants::SCORE_MAX

use tracing::debug;

use super::candidates::OffsetCandidateSet;
use super::scoreboard::ScoreBoard;
use crate::common::constants::{BAD_SCORE, OFFSET_DISABLED, ROUND_MAX};

/// Position of the training cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingState {
    /// Completed rounds in the current phase, in `0..ROUND_MAX`.
    pub round: u32,
    /// Index of the candidate tested by the next access.
    pub offset_index: usize,
}

/// Result of advancing the training cursor by one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Still walking the candidate list.
    Testing,
    /// A pass over the candidate list finished; `round` is the new round number.
    RoundEnd {
        /// Round about to start.
        round: u32,
    },
    /// A phase finished and a winner was chosen.
    Select {
        /// Selected offset in blocks ([`OFFSET_DISABLED`] if nothing scored).
        offset: u64,
        /// Score the winner accumulated.
        score: u8,
    },
}

/// Training state machine: cursor, scores, and candidate list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrainingController {
    state: TrainingState,
    scores: ScoreBoard,
    candidates: OffsetCandidateSet,
}

impl TrainingController {
    /// Creates a controller at round 0, candidate 0, with empty scores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the controller to its initial state.
    pub fn reset(&mut self) {
        self.state = TrainingState::default();
        self.scores.clear();
    }

    /// Current cursor position.
    pub const fn state(&self) -> TrainingState {
        self.state
    }

    /// Scores accumulated in the current phase.
    pub const fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// The candidate list being searched.
    pub const fn candidates(&self) -> &OffsetCandidateSet {
        &self.candidates
    }

    /// Offset (in blocks) tested by the current access.
    pub const fn offset_under_test(&self) -> u64 {
        self.candidates.get(self.state.offset_index)
    }

    /// Zeroes all scores without moving the cursor.
    pub fn clear_scores(&mut self) {
        self.scores.clear();
    }

    /// Credits the candidate under test with one correlation hit.
    ///
    /// # Returns
    ///
    /// `true` if the score saturated and the phase was fast-forwarded to its
    /// final step.
    pub fn record_hit(&mut self) -> bool {
        if self.scores.increment(self.state.offset_index) {
            self.state.round = ROUND_MAX - 1;
            self.state.offset_index = self.candidates.last_index();
            true
        } else {
            false
        }
    }

    /// Moves the cursor to the next candidate.
    ///
    /// Wrapping the candidate index ends a round; wrapping the round count ends
    /// the phase, selects the winner and clears the scores.
    pub fn advance(&mut self) -> Advance {
        self.state.offset_index = (self.state.offset_index + 1) % self.candidates.len();
        if self.state.offset_index != 0 {
            return Advance::Testing;
        }

        self.state.round = (self.state.round + 1) % ROUND_MAX;
        if self.state.round != 0 {
            return Advance::RoundEnd {
                round: self.state.round,
            };
        }

        debug!("ending training phase");
        let (offset, score) = self.best();
        self.clear_scores();
        Advance::Select { offset, score }
    }

    /// Finds the winning candidate for the current scores.
    ///
    /// Scans in ascending order and takes any candidate whose score is at
    /// least the best so far and above [`BAD_SCORE`], so ties go to the later
    /// candidate.
    ///
    /// # Returns
    ///
    /// `(offset, score)`, or `(OFFSET_DISABLED, 0)` if no candidate scored.
    pub fn best(&self) -> (u64, u8) {
        let mut best_offset = OFFSET_DISABLED;
        let mut best_score = 0;
        for (offset, score) in self.candidates.iter().zip(self.scores.iter()) {
            if score >= best_score && score > BAD_SCORE {
                best_offset = offset;
                best_score = score;
                debug!(offset, score, "current best offset");
            }
        }
        (best_offset, best_score)
    }
}
