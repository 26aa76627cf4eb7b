use crate::error::ScoreError;
use log::{error, info};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Current score and the best score seen across sessions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    high_score: u32,
}

impl Scoreboard {
    pub fn new(high_score: u32) -> Self {
        Scoreboard {
            score: 0,
            high_score,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Closes out the session. Returns whether the score beat the high score,
    /// in which case it becomes the new high score.
    pub fn finish(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

/// Where the high score lives between sessions.
pub trait ScoreStore {
    fn load(&self) -> Result<u32, ScoreError>;
    fn save(&mut self, high_score: u32) -> Result<(), ScoreError>;
}

/// Keeps the high score as a decimal number in a text file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub const DEFAULT_FILE: &'static str = ".snekgrid_high_score.txt";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let text = text.trim();
                text.parse()
                    .map_err(|_| ScoreError::Parse(text.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, high_score: u32) -> Result<(), ScoreError> {
        fs::write(&self.path, high_score.to_string())?;
        info!("Saved high score {} to {}", high_score, self.path.display());
        Ok(())
    }
}

/// Remembers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScoreStore;

impl ScoreStore for NullScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(0)
    }

    fn save(&mut self, _high_score: u32) -> Result<(), ScoreError> {
        Ok(())
    }
}

/// Reads the stored high score, treating any failure as no high score yet.
pub fn load_high_score(store: &dyn ScoreStore) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(e) => {
            error!("Error loading high score: {}", e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scoreboard_accumulates() {
        let mut board = Scoreboard::new(0);
        board.add(10);
        board.add(15);
        assert_eq!(board.score(), 25);
        board.reset();
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_finish_only_promotes_a_better_score() {
        let mut board = Scoreboard::new(30);
        board.add(30);
        assert!(!board.finish());
        assert_eq!(board.high_score(), 30);

        board.add(10);
        assert!(board.finish());
        assert_eq!(board.high_score(), 40);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("high"));

        assert_eq!(store.load().unwrap(), 0);
        store.save(125).unwrap();
        assert_eq!(store.load().unwrap(), 125);
    }

    #[test]
    fn test_file_store_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("high");
        fs::write(&path, "lots\n").unwrap();

        let store = FileScoreStore::new(&path);
        assert!(matches!(store.load(), Err(ScoreError::Parse(s)) if s == "lots"));
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_null_store() {
        let mut store = NullScoreStore;
        store.save(99).unwrap();
        assert_eq!(store.load().unwrap(), 0);
    }
}
