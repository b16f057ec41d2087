//! High score persistence
//!
//! Two concerns share this module: the local single best score the HUD
//! shows and the round-finalize step updates, and the top-10 leaderboard
//! the optional remote service keeps. Both are JSON via serde; the local
//! store degrades to zero on any load failure rather than blocking a
//! round from starting.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of leaderboard entries to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry, wire-compatible with the HTTP service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: u64,
    /// Client-supplied timestamp, stored verbatim
    pub created_at: String,
}

/// Top-10 leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Top entries, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Insert an entry at its rank, trimming past the cap. Returns the
    /// 1-indexed rank it landed at.
    pub fn add(&mut self, entry: HighScoreEntry) -> usize {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        pos + 1
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("score store encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Local best-score persistence.
///
/// Used only at round start (display) and round finalize
/// (compare-and-update); local-only semantics are all the game needs.
pub trait BestScoreStore {
    fn load(&self) -> u64;
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// In-memory store for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: u64,
}

impl BestScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreFile {
    best: u64,
}

/// JSON-file-backed store for native builds
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BestScoreStore for FileScoreStore {
    /// Missing or corrupt files read as zero; a fresh install has no
    /// best score and a broken one shouldn't block the game.
    fn load(&self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<BestScoreFile>(&json) {
                Ok(file) => file.best,
                Err(err) => {
                    log::warn!("best score file unreadable, starting fresh: {err}");
                    0
                }
            },
            Err(_) => 0,
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&BestScoreFile { best: score })?;
        fs::write(&self.path, json)?;
        log::info!("best score saved: {score}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> HighScoreEntry {
        HighScoreEntry {
            player_name: name.to_string(),
            score,
            created_at: "2025-06-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn leaderboard_sorts_descending() {
        let mut scores = HighScores::new();
        scores.add(entry("ada", 100));
        scores.add(entry("bea", 300));
        scores.add(entry("cal", 200));

        let listed: Vec<u64> = scores.entries().iter().map(|e| e.score).collect();
        assert_eq!(listed, vec![300, 200, 100]);
    }

    #[test]
    fn leaderboard_reports_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(entry("ada", 100)), 1);
        assert_eq!(scores.add(entry("bea", 300)), 1);
        assert_eq!(scores.add(entry("cal", 200)), 2);
        assert_eq!(scores.add(entry("dot", 50)), 4);
    }

    #[test]
    fn leaderboard_trims_to_cap() {
        let mut scores = HighScores::new();
        for i in 0..15u64 {
            scores.add(entry("p", i * 10));
        }
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
        // The lowest survivors are the best ten
        assert_eq!(scores.top_score(), Some(140));
        assert_eq!(scores.entries().last().unwrap().score, 50);
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryScoreStore::default();
        assert_eq!(store.load(), 0);
        store.save(4200).unwrap();
        assert_eq!(store.load(), 4200);
    }

    #[test]
    fn file_store_reads_zero_when_missing() {
        let store = FileScoreStore::new("/nonexistent/dir/best_score.json");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn file_store_round_trips() {
        let path = std::env::temp_dir().join("car_rush_best_score_test.json");
        let _ = fs::remove_file(&path);

        let mut store = FileScoreStore::new(&path);
        assert_eq!(store.load(), 0);
        store.save(999).unwrap();
        assert_eq!(store.load(), 999);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn entry_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&entry("ada", 10)).unwrap();
        assert!(json.contains("playerName"));
        assert!(json.contains("createdAt"));
    }
}
