//! Score persistence
//!
//! Features:
//! - Versioned JSON envelope, with the older bare-array layouts still readable
//! - Temp-file-then-rename writes for the native file store
//! - Corrupt data loads as an empty leaderboard instead of failing

use thiserror::Error;

use crate::highscores::{HighScores, ScoreRecord};

pub mod envelope;
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

/// Why stored scores could not be read or written
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("score data has unsupported version {0}")]
    UnsupportedVersion(u32),
    #[error("malformed score data: {0}")]
    Malformed(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere a leaderboard can be kept between runs
pub trait ScoreStore {
    /// Load the stored leaderboard; missing storage is an empty board
    fn load(&self) -> Result<HighScores, PersistError>;
    /// Replace the stored leaderboard
    fn save(&mut self, scores: &HighScores) -> Result<(), PersistError>;
}

/// Load, treating any failure as an empty leaderboard
pub fn load_or_empty(store: &impl ScoreStore) -> HighScores {
    match store.load() {
        Ok(scores) => {
            log::info!("Loaded {} high scores", scores.len());
            scores
        }
        Err(e) => {
            log::warn!("Could not load high scores, starting fresh: {}", e);
            HighScores::new()
        }
    }
}

/// Merge one finished game into the stored leaderboard.
///
/// Returns the rank achieved, or `None` if the record didn't make the board
/// (in which case nothing is written).
pub fn record_score(
    store: &mut impl ScoreStore,
    record: ScoreRecord,
) -> Result<Option<usize>, PersistError> {
    let mut scores = load_or_empty(store);
    let score = record.score;
    let Some(rank) = scores.add(record) else {
        log::debug!("Score {} did not make the leaderboard", score);
        return Ok(None);
    };
    store.save(&scores)?;
    log::info!("High score {} saved at rank {}", score, rank);
    Ok(Some(rank))
}
