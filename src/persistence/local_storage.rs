//! Browser LocalStorage score store (wasm32 only)

use super::{PersistError, ScoreStore, envelope};
use crate::highscores::HighScores;

/// Leaderboard kept under one LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// LocalStorage key used by the game
    pub const DEFAULT_KEY: &'static str = "snake_scores";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("LocalStorage is not accessible".into()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<HighScores, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => envelope::decode(&json),
            Ok(None) => Ok(HighScores::new()),
            Err(_) => Err(PersistError::Unavailable("LocalStorage read failed".into())),
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), PersistError> {
        let storage = Self::storage()?;
        let json = envelope::encode(scores)?;
        storage
            .set_item(&self.key, &json)
            .map_err(|_| PersistError::Unavailable("LocalStorage write failed".into()))?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }
}
