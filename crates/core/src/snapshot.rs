use crate::pieces::{ActivePiece, PieceMatrix};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Coarse lifecycle state exposed to renderers.
///
/// Game over is not a resting state: the engine submits the run and resets
/// within the same call, reporting it through
/// [`GameEvent::GameOver`](crate::types::GameEvent::GameOver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NoPiece,
    Falling,
    Grounded,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub gravity_ms: u32,
    pub lock_ms: u32,
    pub soft_drop_ms: u32,
}

/// Everything a renderer needs for one frame, by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Color index per cell, 0 = empty.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub next_matrix: PieceMatrix,
    pub hold: Option<PieceKind>,
    pub hold_matrix: Option<PieceMatrix>,
    pub can_hold: bool,
    pub phase: Phase,
    pub paused: bool,
    pub episode_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub high_score: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.paused && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            next_matrix: crate::pieces::spawn_matrix(PieceKind::I),
            hold: None,
            hold_matrix: None,
            can_hold: false,
            phase: Phase::NoPiece,
            paused: false,
            episode_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            high_score: 0,
            timers: TimersSnapshot::default(),
        }
    }
}
