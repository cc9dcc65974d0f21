//! High score leaderboard
//!
//! Keeps the top 100 records, best first. Equal scores rank by who got
//! there first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 100;

/// How many entries a leaderboard screen shows
pub const DISPLAYED_HIGH_SCORES: usize = 15;

/// A single finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player's score
    pub score: u32,
    /// Nickname, if one was entered
    #[serde(default, alias = "nickname", skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    /// Unix timestamp (ms) when achieved
    #[serde(default)]
    pub timestamp: f64,
}

impl ScoreRecord {
    pub fn new(score: u32, player: Option<String>, timestamp: f64) -> Self {
        Self {
            score,
            player,
            timestamp,
        }
    }

    /// Name to show on the leaderboard
    pub fn display_name(&self) -> &str {
        self.player.as_deref().unwrap_or("Anonymous")
    }

    /// Leaderboard order: higher score first, then earlier timestamp
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.timestamp.total_cmp(&other.timestamp))
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HighScores {
    entries: Vec<ScoreRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from records in any order, keeping the best [`MAX_HIGH_SCORES`]
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut entries: Vec<ScoreRecord> = records.into_iter().collect();
        entries.sort_by(ScoreRecord::rank_cmp);
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a record would make the leaderboard
    pub fn qualifies(&self, record: &ScoreRecord) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if it beats the lowest entry
        self.entries
            .last()
            .map(|e| record.rank_cmp(e) == Ordering::Less)
            .unwrap_or(true)
    }

    fn insertion_index(&self, record: &ScoreRecord) -> usize {
        self.entries
            .iter()
            .position(|e| record.rank_cmp(e) == Ordering::Less)
            .unwrap_or(self.entries.len())
    }

    /// Add a record to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add(&mut self, record: ScoreRecord) -> Option<usize> {
        if !self.qualifies(&record) {
            return None;
        }
        let pos = self.insertion_index(&record);
        self.entries.insert(pos, record);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(pos + 1)
    }

    /// All entries, best first
    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    /// The slice a leaderboard screen shows
    pub fn displayed(&self) -> &[ScoreRecord] {
        &self.entries[..self.entries.len().min(DISPLAYED_HIGH_SCORES)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
