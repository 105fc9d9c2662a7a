//! Session leaderboard
//!
//! Tracks the best finished episodes of a run, in memory only.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Maximum number of entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Blocks hit
    pub score: u32,
    /// Total reward earned
    pub reward: i64,
    pub ticks: u64,
    pub seed: u64,
    pub outcome: Outcome,
}

/// Best-first leaderboard plus whole-session totals
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Episodes recorded, ranked or not
    pub episodes: u32,
    pub wins: u32,
    total_score: u64,
}

impl HighScores {
    /// Empty board for a new session
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an episode breaking `score` blocks earns a place
    ///
    /// Episodes that broke nothing never rank.
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= MAX_HIGH_SCORES => score > lowest.score,
            _ => true,
        }
    }

    /// 1-based place `score` would take, behind any equal scores
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        self.qualifies(score).then(|| {
            self.entries
                .iter()
                .take_while(|e| e.score >= score)
                .count()
                + 1
        })
    }

    /// Fold a finished episode into the session totals and board
    ///
    /// Returns its 1-based place, if it ranked.
    pub fn add_episode(&mut self, entry: HighScoreEntry) -> Option<usize> {
        self.episodes += 1;
        self.total_score += u64::from(entry.score);
        if entry.outcome == Outcome::Won {
            self.wins += 1;
        }

        if !self.qualifies(entry.score) {
            return None;
        }

        // Best first; an equal score lands behind earlier episodes
        let slot = self
            .entries
            .iter()
            .take_while(|e| e.score >= entry.score)
            .count();
        self.entries.insert(slot, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(slot + 1)
    }

    /// No episode has ranked yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-scoring episode so far
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Mean score over every recorded episode
    pub fn mean_score(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_score as f64 / f64::from(self.episodes)
        }
    }
}
