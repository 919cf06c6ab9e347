//! Game state - the engine object that owns one playfield.
//!
//! [`GameState`] wires the [`PieceController`] to scoring, timers and the
//! high-score collaborator. Commands are synchronous methods; time only
//! moves through [`GameState::tick`].

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::controller::{HoldOutcome, PieceController, PiecePhase, SpawnOutcome};
use crate::pieces::{ActivePiece, PieceMatrix};
use crate::score_keeper::{MemoryScores, ScoreKeeper};
use crate::scoring::Progress;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, Phase, TimersSnapshot};
use crate::timing::Timers;
use crate::types::{GameAction, GameEvent, PieceKind, RotationDirection, Shift};

/// Name submitted with finished runs unless the caller sets one.
pub const DEFAULT_PLAYER_NAME: &str = "player";

/// Complete game state for one playfield.
#[derive(Debug, Clone)]
pub struct GameState<K = MemoryScores> {
    controller: PieceController,
    progress: Progress,
    timers: Timers,
    config: EngineConfig,
    keeper: K,
    player_name: String,
    /// Monotonic episode id (increments on every reset).
    episode_id: u32,
    paused: bool,
    started: bool,
    events: Vec<GameEvent>,
}

impl GameState<MemoryScores> {
    /// Create a new game with the given RNG seed, default timing and an
    /// in-memory leaderboard.
    pub fn new(seed: u32) -> Self {
        Self::build(seed, EngineConfig::default(), MemoryScores::new())
    }
}

impl<K: ScoreKeeper> GameState<K> {
    /// Create a game with explicit timing and a high-score collaborator.
    pub fn with_keeper(seed: u32, config: EngineConfig, keeper: K) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(seed, config, keeper))
    }

    fn build(seed: u32, config: EngineConfig, keeper: K) -> Self {
        Self {
            controller: PieceController::new(seed),
            progress: Progress::new(),
            timers: Timers::default(),
            config,
            keeper,
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
            episode_id: 0,
            paused: false,
            started: false,
            events: Vec::new(),
        }
    }

    /// Start the game and spawn the first piece.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms()
    }

    pub fn high_score(&self) -> u32 {
        self.keeper.high_score()
    }

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.controller.active().copied()
    }

    pub fn next_piece(&self) -> PieceKind {
        self.controller.next()
    }

    pub fn next_matrix(&self) -> PieceMatrix {
        self.controller.next_matrix()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.controller.hold_piece()
    }

    /// Held kind in spawn orientation (see [`PieceController::hold_matrix`]).
    pub fn hold_matrix(&self) -> Option<PieceMatrix> {
        self.controller.hold_matrix()
    }

    pub fn can_hold(&self) -> bool {
        self.controller.can_hold()
    }

    pub fn ghost_y(&self) -> Option<i8> {
        self.controller.ghost_y()
    }

    pub fn is_grounded(&self) -> bool {
        self.controller.is_grounded()
    }

    pub fn phase(&self) -> Phase {
        if self.paused {
            return Phase::Paused;
        }
        match self.controller.phase() {
            PiecePhase::NoPiece => Phase::NoPiece,
            PiecePhase::Falling => Phase::Falling,
            PiecePhase::Grounded => Phase::Grounded,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn controller(&self) -> &PieceController {
        &self.controller
    }

    /// Direct access to the playfield (scenario setup in tests and tooling).
    pub fn controller_mut(&mut self) -> &mut PieceController {
        &mut self.controller
    }

    pub fn score_keeper(&self) -> &K {
        &self.keeper
    }

    pub fn score_keeper_mut(&mut self) -> &mut K {
        &mut self.keeper
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn accepts_piece_commands(&self) -> bool {
        self.started && !self.paused
    }

    fn spawn_next(&mut self) {
        self.timers.reset_lock();
        if self.controller.spawn() == SpawnOutcome::Blocked {
            self.game_over();
        }
    }

    /// Move the active piece, resetting lock delay on success.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.controller.try_move(dx, dy) {
            self.timers.reset_lock();
            return true;
        }
        false
    }

    fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        match self.controller.active().map(|p| p.kind) {
            None => false,
            // O rotation succeeds without touching the piece or its timers.
            Some(PieceKind::O) => true,
            Some(_) => {
                if self.controller.try_rotate(direction) {
                    self.timers.reset_lock();
                    return true;
                }
                false
            }
        }
    }

    fn press_shift(&mut self, dir: Shift) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        self.timers.shift.press(dir);
        self.try_move(dir.dx(), 0)
    }

    pub fn move_left(&mut self) -> bool {
        self.press_shift(Shift::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.press_shift(Shift::Right)
    }

    /// Releases apply even while paused.
    pub fn release_left(&mut self) {
        self.timers.shift.release(Shift::Left);
    }

    pub fn release_right(&mut self) {
        self.timers.shift.release(Shift::Right);
    }

    /// Turn soft drop on or off. Switching it on also steps down one row immediately.
    pub fn set_soft_drop(&mut self, active: bool) -> bool {
        if !active {
            self.timers.set_soft_drop(false);
            return true;
        }
        if !self.accepts_piece_commands() || self.timers.soft_drop_active {
            return false;
        }
        self.timers.set_soft_drop(true);
        self.try_move(0, 1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(RotationDirection::CounterClockwise)
    }

    /// Drop the active piece to its landing row and lock it immediately.
    /// Returns the number of rows travelled, or `None` without a piece.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.accepts_piece_commands() || self.controller.active().is_none() {
            return None;
        }
        let distance = self.controller.drop_to_floor();
        self.progress.apply_hard_drop(distance);
        self.lock_piece();
        Some(distance)
    }

    pub fn hold(&mut self) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        match self.controller.hold() {
            HoldOutcome::Unavailable => false,
            HoldOutcome::Held => {
                self.timers.reset_lock();
                true
            }
            HoldOutcome::Blocked => {
                self.game_over();
                true
            }
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.started {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Manual reset. The abandoned run is not submitted.
    pub fn restart(&mut self) {
        self.started = true;
        self.reset_playfield();
    }

    /// Merge the active piece, score cleared rows and bring in the next piece.
    pub fn lock_piece(&mut self) {
        if self.controller.active().is_none() {
            return;
        }
        let cleared = self.controller.lock();
        let award = self.progress.apply_line_clear(cleared.len());
        self.events.push(GameEvent::Locked {
            lines_cleared: cleared.len() as u32,
            points: award.points,
        });
        if let Some(level) = award.new_level {
            self.events.push(GameEvent::LevelUp { level });
        }
        self.spawn_next();
    }

    fn game_over(&mut self) {
        let score = self.progress.score();
        let new_high_score = score > self.keeper.high_score();
        self.keeper.submit(&self.player_name, score);
        self.events.push(GameEvent::GameOver {
            score,
            lines: self.progress.lines(),
            level: self.progress.level(),
            new_high_score,
        });
        self.reset_playfield();
    }

    fn reset_playfield(&mut self) {
        self.controller.reset();
        self.progress.reset();
        self.timers.reset();
        self.paused = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        let outcome = self.controller.spawn();
        debug_assert_eq!(outcome, SpawnOutcome::Spawned, "spawn on an empty board");
    }

    /// Advance all timers by `elapsed_ms`.
    ///
    /// Order within one call: gravity, horizontal auto-repeat, soft drop,
    /// then the grounded/lock-delay check. Returns true if the piece moved
    /// or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.accepts_piece_commands() || self.controller.active().is_none() {
            return false;
        }
        let mut changed = false;

        if self.timers.gravity_due(elapsed_ms, self.progress.drop_interval_ms()) {
            changed |= self.try_move(0, 1);
        }

        if let Some(dir) = self.timers.shift.held() {
            let repeats = self
                .timers
                .shift
                .advance(elapsed_ms, self.config.das_ms, self.config.arr_ms);
            for _ in 0..repeats {
                if !self.try_move(dir.dx(), 0) {
                    break;
                }
                changed = true;
            }
        }

        let steps = self
            .timers
            .soft_drop_steps(elapsed_ms, self.config.soft_drop_interval_ms);
        for _ in 0..steps {
            if !self.try_move(0, 1) {
                break;
            }
            changed = true;
        }

        if self.controller.is_grounded() {
            if self.timers.lock_due(elapsed_ms, self.config.lock_delay_ms) {
                self.lock_piece();
                changed = true;
            }
        } else {
            self.timers.reset_lock();
        }

        changed
    }

    /// Apply a game action. Returns whether it had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::ReleaseLeft => {
                self.release_left();
                true
            }
            GameAction::ReleaseRight => {
                self.release_right();
                true
            }
            GameAction::SoftDropOn => self.set_soft_drop(true),
            GameAction::SoftDropOff => self.set_soft_drop(false),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Apply an action by name; unknown names are ignored.
    pub fn apply_named(&mut self, name: &str) -> bool {
        match GameAction::from_str(name) {
            Some(action) => self.apply_action(action),
            None => false,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.controller.board().write_u8_grid(&mut out.board);
        out.active = self.controller.active().copied().map(ActiveSnapshot::from);
        out.ghost_y = self.controller.ghost_y();
        out.next = self.controller.next();
        out.next_matrix = self.controller.next_matrix();
        out.hold = self.controller.hold_piece();
        out.hold_matrix = self.controller.hold_matrix();
        out.can_hold = self.controller.can_hold();
        out.phase = self.phase();
        out.paused = self.paused;
        out.episode_id = self.episode_id;
        out.score = self.progress.score();
        out.level = self.progress.level();
        out.lines = self.progress.lines();
        out.high_score = self.keeper.high_score();
        out.timers = TimersSnapshot {
            gravity_ms: self.timers.gravity_ms,
            lock_ms: self.timers.lock_ms,
            soft_drop_ms: self.timers.soft_drop_ms,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn started_with(kind: PieceKind) -> GameState {
        let mut state = GameState::new(12345);
        state.controller_mut().set_next(kind);
        state.start();
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert!(!state.started());
        assert!(!state.paused());
        assert_eq!(state.phase(), Phase::NoPiece);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 800);
    }

    #[test]
    fn test_commands_before_start_are_ignored() {
        let mut state = GameState::new(1);
        assert!(!state.move_left());
        assert!(state.hard_drop().is_none());
        assert!(!state.tick(1000));
        assert_eq!(state.phase(), Phase::NoPiece);
    }

    #[test]
    fn test_start_spawns_centered_piece() {
        let state = started_with(PieceKind::T);
        let active = state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (3, -1));
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_gravity_moves_o_piece_down_one_row() {
        let mut state = started_with(PieceKind::O);
        let before = state.active().unwrap();
        assert_eq!((before.x, before.y), (4, -1));

        for _ in 0..49 {
            state.tick(16);
        }
        assert_eq!(state.active().unwrap().y, -1);

        state.tick(16);
        let after = state.active().unwrap();
        assert_eq!(after.y, 0);
        assert_eq!(after.x, before.x);
    }

    #[test]
    fn test_grounded_piece_locks_after_delay() {
        let mut state = started_with(PieceKind::O);
        state.controller_mut().drop_to_floor();
        assert_eq!(state.phase(), Phase::Grounded);

        assert!(!state.tick(200));
        assert!(state.tick(250));
        assert!(state.board().is_occupied(4, 19));
        assert_eq!(state.board().filled_count(), 4);
    }

    #[test]
    fn test_successful_move_resets_lock_delay() {
        let mut state = started_with(PieceKind::O);
        state.controller_mut().drop_to_floor();

        state.tick(200);
        assert_eq!(state.timers().lock_ms, 200);

        assert!(state.move_left());
        state.release_left();
        assert_eq!(state.timers().lock_ms, 0);

        state.tick(300);
        state.tick(100);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.phase(), Phase::Grounded);

        state.tick(50);
        assert_eq!(state.board().filled_count(), 4);
        assert!(state.board().is_occupied(3, 19));
        assert!(state.board().is_occupied(4, 18));
    }

    #[test]
    fn test_failed_move_keeps_lock_delay() {
        let mut state = started_with(PieceKind::O);
        while state.move_left() {
            state.release_left();
        }
        state.release_left();
        state.controller_mut().drop_to_floor();
        state.tick(200);
        assert!(!state.move_left());
        state.release_left();
        assert_eq!(state.timers().lock_ms, 200);
    }

    #[test]
    fn test_o_rotation_does_not_reset_lock_delay() {
        let mut state = started_with(PieceKind::O);
        state.controller_mut().drop_to_floor();
        state.tick(200);
        assert!(state.rotate_cw());
        assert_eq!(state.timers().lock_ms, 200);
    }

    #[test]
    fn test_hard_drop_scores_distance_and_locks() {
        let mut state = started_with(PieceKind::O);
        assert_eq!(state.hard_drop(), Some(19));
        assert_eq!(state.score(), 38);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Locked {
                lines_cleared: 0,
                points: 0
            }]
        );
        assert!(state.active().is_some());
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_soft_drop_steps_immediately_and_repeats() {
        let mut state = started_with(PieceKind::T);
        assert!(state.set_soft_drop(true));
        assert_eq!(state.active().unwrap().y, 0);

        // Holding the key does not step again.
        assert!(!state.set_soft_drop(true));

        state.tick(100);
        assert_eq!(state.active().unwrap().y, 2);

        state.set_soft_drop(false);
        state.tick(100);
        assert_eq!(state.active().unwrap().y, 2);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_das_then_arr() {
        let mut state = started_with(PieceKind::O);
        assert!(state.move_right());
        assert_eq!(state.active().unwrap().x, 5);

        state.tick(150);
        assert_eq!(state.active().unwrap().x, 5);
        state.tick(50);
        assert_eq!(state.active().unwrap().x, 6);

        state.release_right();
        state.tick(200);
        assert_eq!(state.active().unwrap().x, 6);
    }

    #[test]
    fn test_zero_arr_shifts_to_wall() {
        let config = EngineConfig {
            arr_ms: 0,
            ..EngineConfig::default()
        };
        let mut state = GameState::with_keeper(7, config, MemoryScores::new()).unwrap();
        state.controller_mut().set_next(PieceKind::O);
        state.start();
        state.move_right();
        state.tick(150);
        assert_eq!(state.active().unwrap().x, BOARD_WIDTH as i8 - 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            soft_drop_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            GameState::with_keeper(1, config, MemoryScores::new()).err(),
            Some(ConfigError::ZeroSoftDropInterval)
        );
    }

    #[test]
    fn test_hold_once_per_lock() {
        let mut state = started_with(PieceKind::T);
        assert!(state.hold());
        assert_eq!(state.hold_piece(), Some(PieceKind::T));
        assert!(!state.can_hold());
        assert!(!state.hold());

        state.hard_drop();
        assert!(state.can_hold());
        assert!(state.hold());
        assert_eq!(state.active().unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_pause_blocks_piece_commands_and_time() {
        let mut state = started_with(PieceKind::T);
        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.phase(), Phase::Paused);

        let before = state.active().unwrap();
        assert!(!state.move_left());
        assert!(!state.rotate_cw());
        assert!(!state.hold());
        assert!(!state.tick(5000));
        assert_eq!(state.active().unwrap(), before);

        state.apply_action(GameAction::Pause);
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_bottom_row_clear() {
        let mut state = started_with(PieceKind::I);
        state
            .controller_mut()
            .board_mut()
            .fill_row_except(BOARD_HEIGHT as i8 - 1, PieceKind::Z, &[0, 1, 2, 3]);
        while state.move_left() {
            state.release_left();
        }
        state.release_left();
        assert_eq!(state.active().unwrap().x, 0);

        assert_eq!(state.hard_drop(), Some(19));
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 38 + 100);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Locked {
                lines_cleared: 1,
                points: 100
            }]
        );
    }

    #[test]
    fn test_game_over_submits_and_resets() {
        let mut state = started_with(PieceKind::O);
        state.controller_mut().set_next(PieceKind::T);
        state.hard_drop();
        let episode = state.episode_id();
        state.take_events();

        state
            .controller_mut()
            .board_mut()
            .fill_row_except(0, PieceKind::Z, &[0]);
        state.hard_drop();

        let events = state.take_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                score: 38,
                lines: 0,
                level: 0,
                new_high_score: true
            })
        );
        assert_eq!(state.high_score(), 38);
        assert_eq!(state.score_keeper().entries()[0].name, DEFAULT_PLAYER_NAME);

        assert_eq!(state.episode_id(), episode + 1);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.hold_piece(), None);
        assert_eq!(state.drop_interval_ms(), 800);
        assert_eq!(state.phase(), Phase::Falling);
    }

    #[test]
    fn test_lower_score_is_not_a_new_high() {
        let mut state = started_with(PieceKind::O);
        state.score_keeper_mut().submit("earlier", 1000);
        state
            .controller_mut()
            .board_mut()
            .fill_row_except(0, PieceKind::Z, &[0]);
        state.hard_drop();
        assert!(matches!(
            state.take_events().last(),
            Some(GameEvent::GameOver {
                new_high_score: false,
                ..
            })
        ));
        assert_eq!(state.high_score(), 1000);
    }

    #[test]
    fn test_restart_is_not_submitted() {
        let mut state = started_with(PieceKind::O);
        state.hard_drop();
        state.apply_action(GameAction::Restart);
        assert_eq!(state.score(), 0);
        assert_eq!(state.episode_id(), 1);
        assert!(state.score_keeper().entries().is_empty());
        assert!(state.active().is_some());
    }

    #[test]
    fn test_apply_named_ignores_unknown() {
        let mut state = started_with(PieceKind::T);
        let before = state.active().unwrap();
        assert!(!state.apply_named("teleport"));
        assert_eq!(state.active().unwrap(), before);
        assert!(state.apply_named("moveRight"));
        assert_eq!(state.active().unwrap().x, before.x + 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started_with(PieceKind::T);
        state.hold();
        let snap = state.snapshot();
        assert_eq!(snap.hold, Some(PieceKind::T));
        assert!(snap.hold_matrix.is_some());
        assert!(!snap.can_hold);
        assert_eq!(snap.next, state.next_piece());
        assert_eq!(snap.ghost_y, state.ghost_y());
        assert_eq!(snap.active.map(|a| a.kind), state.active().map(|a| a.kind));
        assert!(snap.playable());
    }
}
