//! High-score seam between the engine and whatever stores finished runs.
//!
//! The engine only asks for the best score so far and submits each finished
//! run; where entries live (memory, a file, a server) is up to the keeper.

use crate::types::LEADERBOARD_SIZE;

/// Storage for finished runs.
pub trait ScoreKeeper {
    /// Best score recorded so far (0 when empty).
    fn high_score(&self) -> u32;

    /// Record a finished run.
    fn submit(&mut self, name: &str, score: u32);
}

/// A finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Insert `entry` into a descending leaderboard, keeping at most `cap` entries.
///
/// Ties keep earlier entries first. Returns the entry's rank (0-based) if it
/// made the board.
pub fn insert_ranked(entries: &mut Vec<ScoreEntry>, entry: ScoreEntry, cap: usize) -> Option<usize> {
    let pos = entries
        .iter()
        .position(|e| e.score < entry.score)
        .unwrap_or(entries.len());
    if pos >= cap {
        return None;
    }
    entries.insert(pos, entry);
    entries.truncate(cap);
    Some(pos)
}

/// In-memory top-10 leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryScores {
    entries: Vec<ScoreEntry>,
}

impl MemoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }
}

impl ScoreKeeper for MemoryScores {
    fn high_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    fn submit(&mut self, name: &str, score: u32) {
        let entry = ScoreEntry {
            name: name.to_owned(),
            score,
        };
        insert_ranked(&mut self.entries, entry, LEADERBOARD_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            name: name.to_owned(),
            score,
        }
    }

    #[test]
    fn insert_keeps_descending_order_and_ties_stable() {
        let mut v = Vec::new();
        assert_eq!(insert_ranked(&mut v, entry("a", 100), 3), Some(0));
        assert_eq!(insert_ranked(&mut v, entry("b", 300), 3), Some(0));
        assert_eq!(insert_ranked(&mut v, entry("c", 100), 3), Some(2));
        let names: Vec<&str> = v.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn insert_respects_capacity() {
        let mut v = vec![entry("a", 30), entry("b", 20)];
        assert_eq!(insert_ranked(&mut v, entry("c", 10), 2), None);
        assert_eq!(insert_ranked(&mut v, entry("d", 25), 2), Some(1));
        assert_eq!(v, vec![entry("a", 30), entry("d", 25)]);
    }

    #[test]
    fn memory_scores_tracks_high_score() {
        let mut scores = MemoryScores::new();
        assert_eq!(scores.high_score(), 0);
        scores.submit("p1", 500);
        scores.submit("p2", 200);
        assert_eq!(scores.high_score(), 500);
        assert_eq!(scores.entries().len(), 2);
    }
}
