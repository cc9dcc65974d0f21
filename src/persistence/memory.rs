//! In-memory score store
//!
//! Holds the encoded text rather than the parsed board so it goes through
//! the same envelope path as real storage.

use super::{PersistError, ScoreStore, envelope};
use crate::highscores::HighScores;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with raw text (possibly corrupt)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScores, PersistError> {
        match &self.raw {
            Some(text) => envelope::decode(text),
            None => Ok(HighScores::new()),
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), PersistError> {
        self.raw = Some(envelope::encode(scores)?);
        Ok(())
    }
}
