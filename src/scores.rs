//! The persisted high-score table.
//!
//! One best score per game, written to ~/.arcade/high_scores.json. The
//! table implements [`ScoreStore`], so game-over submission goes through
//! the same strict-improvement rule the core tests lock down.

use crate::core::score::{submit_best, ScoreStore};
use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;

pub const SCORES_FILE: &str = "high_scores.json";

/// A recorded best: the score and when it was set (unix seconds).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub achieved_at: i64,
}

/// Per-game best scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: HashMap<String, HighScoreEntry>,
}

impl HighScores {
    /// Load from disk; missing or corrupt files become an empty table.
    pub fn load() -> Self {
        load_json_or_default(SCORES_FILE)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(SCORES_FILE, self)
    }

    pub fn best(&self, key: &str) -> u64 {
        self.entries.get(key).map_or(0, |e| e.score)
    }

    pub fn entry(&self, key: &str) -> Option<&HighScoreEntry> {
        self.entries.get(key)
    }

    /// Submit a finished session. The stored best changes only on strict
    /// improvement; returns whether a new record was set.
    pub fn submit(&mut self, key: &str, score: u64) -> bool {
        submit_best(self, key, score)
    }
}

impl ScoreStore for HighScores {
    fn get(&self, key: &str) -> u64 {
        self.best(key)
    }

    fn set(&mut self, key: &str, value: u64) {
        self.entries.insert(
            key.to_string(),
            HighScoreEntry {
                score: value,
                achieved_at: chrono::Utc::now().timestamp(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_has_zero_bests() {
        let scores = HighScores::default();
        assert_eq!(scores.best("runner"), 0);
        assert!(scores.entry("runner").is_none());
    }

    #[test]
    fn test_submit_records_new_best() {
        let mut scores = HighScores::default();
        assert!(scores.submit("runner", 120));
        assert_eq!(scores.best("runner"), 120);
        assert!(scores.entry("runner").unwrap().achieved_at > 0);
    }

    #[test]
    fn test_submit_keeps_higher_best() {
        let mut scores = HighScores::default();
        scores.submit("runner", 120);
        assert!(!scores.submit("runner", 119));
        assert!(!scores.submit("runner", 120));
        assert_eq!(scores.best("runner"), 120);
    }

    #[test]
    fn test_submit_improvement_overwrites() {
        let mut scores = HighScores::default();
        scores.submit("blocks", 30);
        assert!(scores.submit("blocks", 50));
        assert_eq!(scores.best("blocks"), 50);
    }

    #[test]
    fn test_games_tracked_independently() {
        let mut scores = HighScores::default();
        scores.submit("runner", 500);
        scores.submit("flappy", 7);
        assert_eq!(scores.best("runner"), 500);
        assert_eq!(scores.best("flappy"), 7);
        assert_eq!(scores.best("space"), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut scores = HighScores::default();
        scores.submit("space", 321);

        let json = serde_json::to_string_pretty(&scores).unwrap();
        let loaded: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.best("space"), 321);
        assert_eq!(
            loaded.entry("space").unwrap().achieved_at,
            scores.entry("space").unwrap().achieved_at
        );
    }

    #[test]
    fn test_corrupt_json_loads_as_default() {
        let loaded: HighScores = serde_json::from_str("{not json").unwrap_or_default();
        assert_eq!(loaded.best("runner"), 0);
    }
}
