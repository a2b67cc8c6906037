//! Score leaderboard
//!
//! Every submitted score is kept. The file is read whole when the
//! leaderboard screen opens and rewritten whole (old entries plus the new
//! one) on submission, so the last writer wins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Name recorded when the player leaves the name box empty
pub const DEFAULT_NAME: &str = "Player";

/// A single leaderboard record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u64) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                DEFAULT_NAME.to_owned()
            } else {
                name.to_owned()
            },
            score,
        }
    }
}

/// All recorded scores, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by score, highest first; ties keep submission order
    pub fn sorted_desc(&self) -> Vec<LeaderboardEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    /// Get the rank a score would achieve (1-indexed); ties rank below
    /// existing entries
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries.iter().filter(|e| e.score >= score).count() + 1
    }
}

/// Leaderboard file on disk
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Leaderboard, PersistError> {
        let board: Leaderboard = persistence::load_json(&self.path)?;
        log::info!("Loaded {} leaderboard entries", board.len());
        Ok(board)
    }

    /// Load, treating any failure as an empty board.
    ///
    /// A missing file is the normal first-run case; anything else means the
    /// file is unreadable and will be replaced by the next submission.
    pub fn load_or_empty(&self) -> Leaderboard {
        match self.load() {
            Ok(board) => board,
            Err(err) if err.is_not_found() => {
                log::debug!("No leaderboard yet, starting fresh ({})", err);
                Leaderboard::new()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable leaderboard: {}", err);
                Leaderboard::new()
            }
        }
    }

    pub fn save(&self, board: &Leaderboard) -> Result<(), PersistError> {
        persistence::save_json(&self.path, board)?;
        log::info!("Leaderboard saved ({} entries)", board.len());
        Ok(())
    }

    /// Read-modify-write: append one entry to whatever is on disk now
    pub fn append(&self, entry: LeaderboardEntry) -> Result<Leaderboard, PersistError> {
        let mut board = self.load_or_empty();
        board.push(entry);
        self.save(&board)?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[(&str, u64)]) -> Leaderboard {
        Leaderboard {
            entries: scores
                .iter()
                .map(|(n, s)| LeaderboardEntry::new(n, *s))
                .collect(),
        }
    }

    #[test]
    fn test_empty_name_defaults() {
        assert_eq!(LeaderboardEntry::new("   ", 5).name, DEFAULT_NAME);
        assert_eq!(LeaderboardEntry::new(" Ann ", 5).name, "Ann");
    }

    #[test]
    fn test_sorted_desc_is_stable() {
        let b = board(&[("a", 10), ("b", 300), ("c", 10), ("d", 50)]);
        let names: Vec<_> = b.sorted_desc().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_potential_rank() {
        let b = board(&[("a", 100), ("b", 50)]);
        assert_eq!(b.potential_rank(200), 1);
        assert_eq!(b.potential_rank(75), 2);
        assert_eq!(b.potential_rank(50), 3);
        assert_eq!(Leaderboard::new().potential_rank(0), 1);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeaderboardStore::new(dir.path().join("scores.json"));
        assert!(store.load().is_err());
        assert!(store.load_or_empty().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, b"\x80\x04garbage").unwrap();
        let store = LeaderboardStore::new(&path);
        assert!(store.load_or_empty().is_empty());
    }

    #[test]
    fn test_append_rewrites_whole_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeaderboardStore::new(dir.path().join("scores.json"));
        store.append(LeaderboardEntry::new("Ann", 120)).unwrap();
        store.append(LeaderboardEntry::new("Bob", 340)).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, board(&[("Ann", 120), ("Bob", 340)]));
    }

    #[test]
    fn test_append_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "[oops").unwrap();
        let store = LeaderboardStore::new(&path);
        store.append(LeaderboardEntry::new("Cy", 10)).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
