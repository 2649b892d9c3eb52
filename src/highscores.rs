//! High score leaderboard
//!
//! Lives outside the session: the best score is read from here when a
//! session is created and written back after every attempt.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::GameOverReport;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Seconds survived
    pub time: f32,
    /// Reached the score target in time
    pub survived: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score if it qualifies, returning the rank achieved
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| entry.score > e.score);
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
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Record a finished attempt
    pub fn record(
        &mut self,
        report: &GameOverReport,
        survived: bool,
        timestamp: u64,
    ) -> Option<usize> {
        self.add_score(HighScoreEntry {
            score: report.score,
            time: report.time,
            survived,
            timestamp,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from a JSON file. Missing or corrupt files start fresh.
    pub fn load(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path) {
            match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("Ignoring corrupt high scores {}: {}", path.display(), e),
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32) -> HighScoreEntry {
        HighScoreEntry {
            score,
            time: 10.0,
            survived: false,
            timestamp: 0,
        }
    }

    #[test]
    fn test_sorted_and_capped() {
        let mut scores = HighScores::new();
        for s in [50, 300, 10, 200] {
            scores.add_score(entry(s));
        }
        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![300, 200, 50, 10]);
        assert_eq!(scores.top_score(), Some(300));

        for s in 1..=20 {
            scores.add_score(entry(s * 1000));
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(20_000));
        assert!(!scores.qualifies(500));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.add_score(entry(0)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_potential_rank() {
        let mut scores = HighScores::new();
        scores.add_score(entry(100));
        scores.add_score(entry(50));
        assert_eq!(scores.potential_rank(75), Some(2));
        assert_eq!(scores.potential_rank(500), Some(1));
        assert_eq!(scores.potential_rank(1), Some(3));
    }

    #[test]
    fn test_record_report() {
        let mut scores = HighScores::new();
        let report = GameOverReport {
            score: 1500,
            time: 47.5,
            is_new_high_score: true,
        };
        assert_eq!(scores.record(&report, true, 123), Some(1));
        assert!(scores.entries[0].survived);
        assert_eq!(scores.entries[0].time, 47.5);
    }

    #[test]
    fn test_save_and_load() {
        let file = format!("hostile-dash-scores-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file);
        let mut scores = HighScores::new();
        scores.add_score(entry(42));
        scores.save(&path).unwrap();

        let loaded = HighScores::load(&path);
        assert_eq!(loaded.entries, scores.entries);
        let _ = std::fs::remove_file(&path);

        // Gone now: fresh board
        assert!(HighScores::load(&path).is_empty());
    }
}
