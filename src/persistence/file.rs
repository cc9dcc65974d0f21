//! JSON file score store (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PersistError, ScoreStore, envelope};
use crate::highscores::HighScores;

/// Leaderboard kept in a single JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<HighScores, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => envelope::decode(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HighScores::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), PersistError> {
        let text = envelope::encode(scores)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        // Write beside the target then swap, so a crash never leaves half a file
        let tmp = self.tmp_path();
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Wrote {} scores to {}", scores.len(), self.path.display());
        Ok(())
    }
}
