//! Best-score persistence
//!
//! Persisted to LocalStorage on the web and to a JSON file natively. Only a
//! single best value is kept.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while reading or writing the stored best score
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored score is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("score storage is unavailable")]
    Unavailable,
}

/// The best score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// Check if a final score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Take `score` if it is a new best; returns whether it was
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        true
    }
}

/// Somewhere the best score survives between sessions
pub trait ScoreStore {
    /// Stored best, or the default when nothing was saved yet
    fn load(&mut self) -> Result<BestScore, ScoreStoreError>;
    fn save(&mut self, best: &BestScore) -> Result<(), ScoreStoreError>;
}

/// In-process store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best: Option<BestScore>,
    /// Number of successful saves
    pub saves: usize,
}

impl ScoreStore for MemoryStore {
    fn load(&mut self) -> Result<BestScore, ScoreStoreError> {
        Ok(self.best.unwrap_or_default())
    }

    fn save(&mut self, best: &BestScore) -> Result<(), ScoreStoreError> {
        self.best = Some(*best);
        self.saves += 1;
        Ok(())
    }
}

/// JSON file store
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn load(&mut self) -> Result<BestScore, ScoreStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let best: BestScore = serde_json::from_str(&json)?;
                log::info!("Loaded best score {} from {}", best.score, self.path.display());
                Ok(best)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best score found, starting fresh");
                Ok(BestScore::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, best: &BestScore) -> Result<(), ScoreStoreError> {
        let json = serde_json::to_string(best)?;
        std::fs::write(&self.path, json)?;
        log::info!("Best score {} saved", best.score);
        Ok(())
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "ablo_hyperdrive_highscore_v2";

    fn storage() -> Result<web_sys::Storage, ScoreStoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(ScoreStoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&mut self) -> Result<BestScore, ScoreStoreError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                // Older builds stored the bare number.
                let best = match raw.trim().parse::<u64>() {
                    Ok(score) => BestScore { score },
                    Err(_) => serde_json::from_str(&raw)?,
                };
                log::info!("Loaded best score {}", best.score);
                Ok(best)
            }
            _ => Ok(BestScore::default()),
        }
    }

    fn save(&mut self, best: &BestScore) -> Result<(), ScoreStoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(Self::STORAGE_KEY, &best.score.to_string())
            .map_err(|_| ScoreStoreError::Unavailable)?;
        log::info!("Best score {} saved", best.score);
        Ok(())
    }
}
