//! Piece controller - the active piece, the hold slot and the next-piece preview.
//!
//! Every command is validated against the [`Board`] before it is committed,
//! so the active piece never overlaps the stack or leaves the field.
//! Scoring, timers and game-over handling live one level up in
//! [`GameState`](crate::game_state::GameState).

use crate::board::{Board, ClearedRows};
use crate::pieces::{spawn_matrix, try_rotate, ActivePiece, PieceMatrix};
use crate::rng::BagRandomizer;
use crate::types::{PieceKind, RotationDirection};

/// Controller-level view of the piece lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiecePhase {
    /// No active piece (before the first spawn).
    NoPiece,
    /// The active piece can still move down.
    Falling,
    /// The active piece rests on the floor or the stack.
    Grounded,
}

/// Result of placing a new active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The spawn position already collides with the stack.
    Blocked,
}

/// Result of a hold request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Hold was already used for this piece, or there is no active piece.
    Unavailable,
    /// The active piece went into the slot (or swapped with it).
    Held,
    /// The piece that came out of the queue or the slot has nowhere to go.
    Blocked,
}

#[derive(Debug, Clone)]
pub struct PieceController {
    board: Board,
    randomizer: BagRandomizer,
    active: Option<ActivePiece>,
    next: PieceKind,
    hold: Option<PieceKind>,
    hold_used: bool,
}

impl PieceController {
    pub fn new(seed: u32) -> Self {
        let mut randomizer = BagRandomizer::new(seed);
        let next = randomizer.next_piece();
        Self {
            board: Board::new(),
            randomizer,
            active: None,
            next,
            hold: None,
            hold_used: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn next_matrix(&self) -> PieceMatrix {
        spawn_matrix(self.next)
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Spawn-orientation matrix of the held kind. The slot keeps only the
    /// kind, so this is not the orientation the piece had when it was held.
    pub fn hold_matrix(&self) -> Option<PieceMatrix> {
        self.hold.map(spawn_matrix)
    }

    pub fn can_hold(&self) -> bool {
        self.active.is_some() && !self.hold_used
    }

    pub fn phase(&self) -> PiecePhase {
        match self.active {
            None => PiecePhase::NoPiece,
            Some(_) if self.is_grounded() => PiecePhase::Grounded,
            Some(_) => PiecePhase::Falling,
        }
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        self.board.is_valid_position(&piece.matrix, piece.x, piece.y)
    }

    /// Promote the queued piece to active and queue a fresh one.
    ///
    /// The active piece is placed even when blocked, so callers can show
    /// what collided before resetting.
    pub fn spawn(&mut self) -> SpawnOutcome {
        let kind = self.next;
        self.next = self.randomizer.next_piece();
        self.hold_used = false;
        self.place(ActivePiece::spawn(kind))
    }

    fn place(&mut self, piece: ActivePiece) -> SpawnOutcome {
        let fits = self.fits(&piece);
        self.active = Some(piece);
        if fits {
            SpawnOutcome::Spawned
        } else {
            SpawnOutcome::Blocked
        }
    }

    /// Shift the active piece by (dx, dy) if the new position is legal.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let Some(moved) = active.shifted(dx, dy) else {
            return false;
        };
        if self.fits(&moved) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    /// Rotate with wall kicks; the O piece reports success without changing.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let board = &self.board;
        match try_rotate(&active, direction, |m, x, y| board.is_valid_position(m, x, y)) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Put the active piece aside, once per spawn.
    ///
    /// With an empty slot the next queued piece spawns; otherwise the held
    /// piece comes back re-centered at the spawn row in spawn orientation.
    pub fn hold(&mut self) -> HoldOutcome {
        if self.hold_used {
            return HoldOutcome::Unavailable;
        }
        let Some(active) = self.active else {
            return HoldOutcome::Unavailable;
        };

        let outcome = match self.hold.replace(active.kind) {
            None => self.spawn(),
            Some(held) => self.place(ActivePiece::spawn(held)),
        };
        self.hold_used = true;

        match outcome {
            SpawnOutcome::Spawned => HoldOutcome::Held,
            SpawnOutcome::Blocked => HoldOutcome::Blocked,
        }
    }

    /// Whether the active piece cannot move down one row.
    pub fn is_grounded(&self) -> bool {
        self.active
            .map(|p| !p.shifted(0, 1).is_some_and(|below| self.fits(&below)))
            .unwrap_or(false)
    }

    /// Rows the active piece could fall before landing.
    pub fn drop_distance(&self) -> u32 {
        let Some(active) = self.active else {
            return 0;
        };
        let mut distance: i8 = 0;
        while let Some(step) = distance.checked_add(1) {
            if !active.shifted(0, step).is_some_and(|p| self.fits(&p)) {
                break;
            }
            distance = step;
        }
        distance as u32
    }

    /// Row the active piece would land on (for ghost rendering).
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + self.drop_distance() as i8)
    }

    /// Move the active piece straight down to its landing row.
    /// Returns the number of rows travelled.
    pub fn drop_to_floor(&mut self) -> u32 {
        let distance = self.drop_distance();
        if let Some(active) = self.active.as_mut() {
            active.y += distance as i8;
        }
        distance
    }

    /// Merge the active piece into the board and clear completed rows.
    ///
    /// Leaves the controller without an active piece; the caller spawns
    /// the next one once scoring is done.
    pub fn lock(&mut self) -> ClearedRows {
        if let Some(active) = self.active.take() {
            self.board.merge(&active);
        }
        self.board.clear_full_rows()
    }

    /// Empty the board and the hold slot. The randomizer keeps its bag.
    pub fn reset(&mut self) {
        self.board.reset();
        self.active = None;
        self.hold = None;
        self.hold_used = false;
    }

    /// Replace the active piece (used by scenario tests and tooling).
    pub fn set_active(&mut self, piece: Option<ActivePiece>) {
        self.active = piece;
    }

    /// Replace the queued piece.
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }
}
