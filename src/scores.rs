//! Leaderboard persisted as JSON (XDG config dir or ~/.config/blockfall).

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{insert_ranked, ScoreEntry, ScoreKeeper};
use crate::types::LEADERBOARD_SIZE;

const FILENAME: &str = "scores.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct StoredEntry {
    name: String,
    score: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredBoard {
    entries: Vec<StoredEntry>,
}

/// Default leaderboard location (config dir / blockfall / scores.json).
pub fn default_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join("blockfall").join(FILENAME)
}

/// Top-10 leaderboard backed by a JSON file.
///
/// Submissions only touch memory; call [`ScoreFile::save`] to write them out.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
    dirty: bool,
}

impl ScoreFile {
    /// Read the leaderboard at `path`. A missing file is an empty board.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let board = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<StoredBoard>(&text)
                .with_context(|| format!("parsing leaderboard {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => StoredBoard::default(),
            Err(err) => {
                return Err(err).with_context(|| format!("reading leaderboard {}", path.display()))
            }
        };

        // Re-ranked and capped on load.
        let mut entries = Vec::with_capacity(LEADERBOARD_SIZE);
        for e in board.entries {
            insert_ranked(
                &mut entries,
                ScoreEntry {
                    name: e.name,
                    score: e.score,
                },
                LEADERBOARD_SIZE,
            );
        }

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Whether there are submissions not yet written to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the leaderboard, creating parent directories if needed.
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let board = StoredBoard {
            entries: self
                .entries
                .iter()
                .map(|e| StoredEntry {
                    name: e.name.clone(),
                    score: e.score,
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&board).context("encoding leaderboard")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing leaderboard {}", self.path.display()))?;
        self.dirty = false;
        Ok(())
    }
}

impl ScoreKeeper for ScoreFile {
    fn high_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    fn submit(&mut self, name: &str, score: u32) {
        let entry = ScoreEntry {
            name: name.to_owned(),
            score,
        };
        if insert_ranked(&mut self.entries, entry, LEADERBOARD_SIZE).is_some() {
            self.dirty = true;
        }
    }
}
