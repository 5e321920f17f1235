//! High score leaderboard
//!
//! Kept in memory for the lifetime of a session, tracks the top 10 runs.
//! Runs rank by score; equal scores rank the quicker run first, and a run
//! that ties on both goes behind the one already on the board.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::session::Character;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// How long the run lasted, in simulation ticks
    pub ticks: u64,
    pub character: Character,
}

impl HighScoreEntry {
    /// Larger is better
    fn rank_key(&self) -> (u32, Reverse<u64>) {
        (self.score, Reverse(self.ticks))
    }
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board index a run would be inserted at, if it makes the board at all
    fn slot(&self, score: u32, ticks: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let key = (score, Reverse(ticks));
        let idx = self.entries.partition_point(|e| e.rank_key() >= key);
        (idx < MAX_HIGH_SCORES).then_some(idx)
    }

    pub fn qualifies(&self, score: u32, ticks: u64) -> bool {
        self.slot(score, ticks).is_some()
    }

    /// 1-indexed rank a run would achieve
    pub fn potential_rank(&self, score: u32, ticks: u64) -> Option<usize> {
        self.slot(score, ticks).map(|idx| idx + 1)
    }

    /// Record a finished run. Returns its rank, or None if it fell off the board.
    pub fn add_score(&mut self, score: u32, ticks: u64, character: Character) -> Option<usize> {
        let idx = self.slot(score, ticks)?;
        self.entries.insert(
            idx,
            HighScoreEntry {
                score,
                ticks,
                character,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!(
            "{} scored {} in {} ticks, rank #{}",
            character.as_str(),
            score,
            ticks,
            idx + 1
        );
        Some(idx + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
