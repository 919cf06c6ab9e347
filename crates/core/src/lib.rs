//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the playfield rules, the engine state and the frame timers.
//! It has no dependencies on terminals, files or clocks, which keeps it:
//!
//! - **Deterministic**: the same seed and the same inputs replay the same game
//! - **Testable**: every rule is reachable from plain unit tests
//! - **Portable**: usable from a terminal, a GUI or a headless driver
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and row clearing
//! - [`pieces`]: piece matrices, matrix rotation and SRS wall kicks
//! - [`rng`]: seeded 7-bag randomizer
//! - [`controller`]: active piece, hold slot and next-piece preview
//! - [`timing`]: gravity, auto-repeat, soft-drop and lock-delay accumulators
//! - [`scoring`]: line-clear table, hard-drop bonus and level curve
//! - [`score_keeper`]: high-score collaborator trait
//! - [`config`]: input timing knobs
//! - [`game_state`]: the engine object tying everything together
//! - [`snapshot`]: by-value view for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every bag of seven holds each piece exactly once
//! - **SRS Rotation**: five kick candidates per rotation; O never rotates
//! - **Lock Delay**: 450ms on the ground; any successful move or rotation restarts it
//! - **Hold**: once per piece, held pieces return in spawn orientation
//! - **Continuous Play**: game over submits the run and resets at once
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards 2 points per row travelled.
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame with
//! the elapsed milliseconds. Gravity runs every `max(100, 800 - 80 * level)` ms.

pub mod board;
pub mod config;
pub mod controller;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod score_keeper;
pub mod scoring;
pub mod snapshot;
pub mod timing;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::{ConfigError, EngineConfig};
pub use controller::{HoldOutcome, PieceController, PiecePhase, SpawnOutcome};
pub use game_state::{GameState, DEFAULT_PLAYER_NAME};
pub use pieces::{kick_offsets, matrix_for, spawn_matrix, try_rotate, ActivePiece, PieceMatrix};
pub use rng::{BagRandomizer, SimpleRng};
pub use score_keeper::{insert_ranked, MemoryScores, ScoreEntry, ScoreKeeper};
pub use scoring::{calculate_hard_drop_score, calculate_line_score, get_drop_interval_ms, Progress};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Phase, TimersSnapshot};
