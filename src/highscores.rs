//! High score leaderboard
//!
//! Kept in memory for the lifetime of the process; tracks the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Run number within the session (1-based)
    pub run: u32,
    /// Seconds survived
    pub survived_secs: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished run to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, run: u32, survived_secs: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            run,
            survived_secs,
        };

        // Find insertion point (sorted descending by score, ties keep the older run first)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Session high score: the best finished run, 0 before any
    pub fn high_score(&self) -> u64 {
        self.top_score().unwrap_or(0)
    }

    /// Record a finished run; returns the new high score if it was beaten
    pub fn record_run(&mut self, score: u64, run: u32, survived_secs: f64) -> Option<u64> {
        let previous = self.high_score();
        let rank = self.add_score(score, run, survived_secs);
        if score > previous {
            log::info!("New high score {} (run {})", score, run);
            Some(score)
        } else {
            if let Some(rank) = rank {
                log::debug!("Run {} placed #{} with {}", run, rank, score);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_board() {
        let scores = HighScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.high_score(), 0);
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(40, 1, 10.0), Some(1));
        assert_eq!(scores.add_score(90, 2, 20.0), Some(1));
        assert_eq!(scores.add_score(60, 3, 15.0), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![90, 60, 40]);
        assert_eq!(scores.top_score(), Some(90));
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=12u64 {
            scores.add_score(i * 10, i as u32, 1.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(30));
        assert!(scores.qualifies(31));
        assert_eq!(scores.entries.last().unwrap().score, 30);
    }

    #[test]
    fn test_record_run_reports_new_best() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record_run(42, 1, 8.0), Some(42));
        assert_eq!(scores.record_run(42, 2, 8.0), None);
        assert_eq!(scores.record_run(10, 3, 2.0), None);
        assert_eq!(scores.record_run(0, 4, 0.5), None);
        assert_eq!(scores.high_score(), 42);
    }

    proptest! {
        #[test]
        fn prop_high_score_is_max_of_runs(runs in prop::collection::vec(0u64..10_000, 0..40)) {
            let mut scores = HighScores::new();
            for (i, score) in runs.iter().enumerate() {
                scores.record_run(*score, i as u32 + 1, 1.0);
            }
            prop_assert_eq!(scores.high_score(), runs.iter().copied().max().unwrap_or(0));
        }
    }
}
