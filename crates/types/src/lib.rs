//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn row**: -1 (one row above the visible field)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner (~60 FPS) |
//! | `BASE_DROP_MS` | 800 | Gravity at level 0 |
//! | `DROP_STEP_MS` | 80 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//! | `LOCK_DELAY_MS` | 450 | Time before a grounded piece locks |
//! | `DEFAULT_DAS_MS` | 150 | Delay before horizontal auto-repeat |
//! | `DEFAULT_ARR_MS` | 50 | Interval between horizontal repeats |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Interval between soft-drop steps |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color_index(), 6);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::West.index(), 3);
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Vertical origin of a freshly spawned piece (one row above the field).
pub const SPAWN_Y: i8 = -1;

/// Frame interval used by the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0
pub const BASE_DROP_MS: u32 = 800;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 80;

/// Gravity never gets faster than one row per 100ms
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lock delay when piece is grounded
pub const LOCK_DELAY_MS: u32 = 450;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Interval between soft-drop steps while soft drop is held.
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row travelled by a hard drop (before the level multiplier).
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table, indexed by rows cleared.
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Number of entries kept by leaderboards.
pub const LEADERBOARD_SIZE: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_DROP_MS, 800);
        assert_eq!(DROP_STEP_MS, 80);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(LOCK_DELAY_MS, 450);
        assert_eq!(DEFAULT_DAS_MS, 150);
        assert_eq!(DEFAULT_ARR_MS, 50);
        assert_eq!(SOFT_DROP_INTERVAL_MS, 50);
    }

    #[test]
    fn color_indices_are_unique_and_non_zero() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let c = kind.color_index() as usize;
            assert!(c > 0);
            assert!(!seen[c], "duplicate color index {c}");
            seen[c] = true;
            assert_eq!(PieceKind::from_color_index(c as u8), Some(kind));
        }
        assert_eq!(PieceKind::from_color_index(0), None);
        assert_eq!(PieceKind::from_color_index(8), None);
    }

    #[test]
    fn rotation_index_roundtrip() {
        for i in 0..4 {
            assert_eq!(Rotation::from_index(i).index(), i);
        }
        assert_eq!(Rotation::from_index(5), Rotation::East);
    }

    #[test]
    fn action_names_parse_back() {
        let all = [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::ReleaseLeft,
            GameAction::ReleaseRight,
            GameAction::SoftDropOn,
            GameAction::SoftDropOff,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::Hold,
            GameAction::Pause,
            GameAction::Restart,
        ];
        for action in all {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(GameAction::from_str("RESTART"), Some(GameAction::Restart));
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a fixed color index used by the board grid and renderers:
/// - **I** (1): Cyan, horizontal bar
/// - **J** (2): Blue, J-shaped
/// - **L** (3): Orange, L-shaped (mirror of J)
/// - **O** (4): Yellow, 2x2 square
/// - **S** (5): Green, S-shaped
/// - **T** (6): Purple, T-shaped
/// - **Z** (7): Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds, in color-index order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Color index (1..=7) written into board cells occupied by this kind.
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_index`]; 0 and out-of-range values are `None`.
    pub fn from_color_index(index: u8) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }
}

/// Orientation states reachable by 90° rotations.
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: Rotated 90° clockwise (index 1)
/// - **South**: Rotated 180° (index 2)
/// - **West**: Rotated 90° counter-clockwise (index 3)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotate one step in the given direction.
    pub fn rotate(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Orientation index in `0..4`.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Orientation for an index; wraps modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Direction of a rotation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Column of the kick tables used for this direction.
    pub fn index(&self) -> usize {
        match self {
            RotationDirection::Clockwise => 0,
            RotationDirection::CounterClockwise => 1,
        }
    }
}

/// Horizontal shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    /// Column delta for one step.
    pub fn dx(&self) -> i8 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Logical commands accepted by the engine.
///
/// Held inputs come as press/release pairs so the engine can own the
/// auto-repeat and soft-drop timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift one cell left and start auto-repeat to the left
    MoveLeft,
    /// Shift one cell right and start auto-repeat to the right
    MoveRight,
    /// Stop auto-repeat to the left
    ReleaseLeft,
    /// Stop auto-repeat to the right
    ReleaseRight,
    /// Start soft dropping
    SoftDropOn,
    /// Stop soft dropping
    SoftDropOff,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (if available)
    Hold,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("HARDDROP"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "releaseleft" => Some(GameAction::ReleaseLeft),
            "releaseright" => Some(GameAction::ReleaseRight),
            "softdropon" => Some(GameAction::SoftDropOn),
            "softdropoff" => Some(GameAction::SoftDropOff),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::ReleaseLeft => "releaseLeft",
            GameAction::ReleaseRight => "releaseRight",
            GameAction::SoftDropOn => "softDropOn",
            GameAction::SoftDropOff => "softDropOff",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Notable engine transitions, queued for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was merged into the board.
    Locked { lines_cleared: u32, points: u32 },
    /// The level went up after a line clear.
    LevelUp { level: u32 },
    /// A spawned or swapped-in piece collided at once; the run was submitted
    /// and the playfield reset.
    GameOver {
        score: u32,
        lines: u32,
        level: u32,
        new_high_score: bool,
    },
}
