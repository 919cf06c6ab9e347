//! Scoring module - line-clear rewards, hard-drop bonus and level progression
//!
//! - Line clears pay `LINE_SCORES[rows] * (level + 1)`, using the level
//!   before the clear is counted.
//! - A hard drop pays `2 * rows_travelled * (level + 1)`.
//! - The level goes up whenever `lines >= (level + 1) * 10`.
//! - Gravity is `max(100ms, 800ms - level * 80ms)`.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES,
};

/// Calculate line clear score
/// lines: number of lines cleared (0-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let Some(&base) = LINE_SCORES.get(lines) else {
        return 0;
    };
    base.saturating_mul(level.saturating_add(1))
}

/// Hard-drop bonus for `cells` rows travelled at `level`.
pub fn calculate_hard_drop_score(cells: u32, level: u32) -> u32 {
    HARD_DROP_POINTS_PER_ROW
        .saturating_mul(cells)
        .saturating_mul(level.saturating_add(1))
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

/// Result of crediting a line clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearAward {
    pub points: u32,
    /// Set when the clear pushed the level up.
    pub new_level: Option<u32>,
}

/// Score, cleared lines and level for one game.
///
/// All three only grow within a game and go back to zero on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    score: u32,
    lines: u32,
    level: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Gravity period for the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Credit a lock that removed `rows` rows.
    pub fn apply_line_clear(&mut self, rows: usize) -> ClearAward {
        let points = calculate_line_score(rows, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);

        let before = self.level;
        while self.lines >= (self.level + 1).saturating_mul(LINES_PER_LEVEL) {
            self.level += 1;
        }

        ClearAward {
            points,
            new_level: (self.level != before).then_some(self.level),
        }
    }

    /// Credit a hard drop that travelled `cells` rows. Returns the points added.
    pub fn apply_hard_drop(&mut self, cells: u32) -> u32 {
        let points = calculate_hard_drop_score(cells, self.level);
        self.score = self.score.saturating_add(points);
        points
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
